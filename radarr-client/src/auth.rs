//! Authentication context.

use std::fmt;

/// Base URL and API key, built once at provider configure time.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Scheme, host and port, without a trailing slash
    pub base_url: String,
    pub api_key: String,
}

impl AuthContext {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("base_url", &self.base_url)
            .field("api_key", &"**********")
            .finish()
    }
}
