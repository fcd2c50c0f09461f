//! Provider configuration block

use radarr_client::AuthContext;
use radarr_core::provider::{ProviderError, ProviderResult};
use radarr_core::resource::{Attributes, Value};
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use regex::Regex;

pub const URL_ENV: &str = "RADARR_URL";
pub const API_KEY_ENV: &str = "RADARR_API_KEY";

const URL_PATTERN: &str = r"^https?://[^/\s]+";

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub api_key: String,
}

impl ProviderConfig {
    pub fn schema() -> ResourceSchema {
        ResourceSchema::new("radarr")
            .attribute(
                AttributeSchema::new("url", AttributeType::String).with_description(format!(
                    "Full base URL including scheme and port; defaults to ${}",
                    URL_ENV
                )),
            )
            .attribute(
                AttributeSchema::new("api_key", AttributeType::String)
                    .sensitive()
                    .with_description(format!("API key; defaults to ${}", API_KEY_ENV)),
            )
            .with_description("Radarr provider")
    }

    /// Resolve from the provider block, falling back to the environment
    pub fn from_attributes(attributes: &Attributes) -> ProviderResult<Self> {
        Self::resolve(attributes, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve(
        attributes: &Attributes,
        env: impl Fn(&str) -> Option<String>,
    ) -> ProviderResult<Self> {
        // The environment is consulted only when the block leaves the option out
        let setting = |attribute: &str, variable: &str| -> ProviderResult<String> {
            let value = match attributes.get(attribute).and_then(Value::as_str) {
                Some(value) => Some(value.to_string()),
                None => env(variable),
            };
            value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                ProviderError::configuration(format!(
                    "Missing {attribute}: set '{attribute}' in the provider block or the {variable} environment variable"
                ))
            })
        };

        let url = setting("url", URL_ENV)?;
        let api_key = setting("api_key", API_KEY_ENV)?;

        let url = url.trim().trim_end_matches('/').to_string();
        let pattern = Regex::new(URL_PATTERN)
            .map_err(|e| ProviderError::internal("invalid url pattern").with_cause(e))?;
        if !pattern.is_match(&url) {
            return Err(ProviderError::configuration(format!(
                "Invalid url {url:?}: expected http:// or https:// followed by a host"
            )));
        }

        Ok(Self { url, api_key })
    }

    pub fn auth(&self) -> AuthContext {
        AuthContext::new(&self.url, &self.api_key)
    }
}
