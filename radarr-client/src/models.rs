//! Wire models the provider inspects directly.
//!
//! Everything else travels as `serde_json::Value` and is mapped by schema.

use serde::{Deserialize, Serialize};

/// One entry of a provider's free-form settings list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Shared envelope of every polymorphic provider object
/// (indexers, download clients, notifications, import lists, metadata
/// consumers, custom-format specifications, auto-tag conditions).
///
/// Category-specific scalars (`enableRss`, `onGrab`, `negate`, ...) live in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResource {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub implementation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub config_contract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

/// Subset of `/api/v3/system/status` used at configure time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub version: String,
}
