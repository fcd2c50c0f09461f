//! Utility functions for name conversion, hashing and secret handling

use std::collections::BTreeMap;

use heck::{ToLowerCamelCase, ToSnakeCase};
use radarr_core::resource::{Attributes, Value};

/// Service-side name to attribute name.
///
/// Dotted paths bind to their last segment
/// (e.g., "seedCriteria.seedRatio" -> "seed_ratio").
pub fn attribute_name(wire: &str) -> String {
    let last = wire.rsplit('.').next().unwrap_or(wire);
    last.to_snake_case()
}

/// Attribute name to service-side JSON key (e.g., "quality_profile_id" -> "qualityProfileId")
pub fn wire_name(attribute: &str) -> String {
    attribute.to_lower_camel_case()
}

/// Compare service names ignoring the case of the first letter
pub fn same_wire_name(a: &str, b: &str) -> bool {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    match (a_chars.next(), b_chars.next()) {
        (Some(x), Some(y)) => {
            x.to_ascii_lowercase() == y.to_ascii_lowercase() && a_chars.as_str() == b_chars.as_str()
        }
        (None, None) => true,
        _ => false,
    }
}

/// True if the service masked a secret (e.g., "********")
pub fn is_secret_placeholder(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == '*')
}

/// Order-stable structural hash of an attribute bag, as a non-negative id
pub fn structural_hash(attributes: &Attributes) -> i64 {
    let ordered: BTreeMap<&String, serde_json::Value> = attributes
        .iter()
        .filter(|(_, v)| !v.is_unknown())
        .map(|(k, v)| (k, canonical_json(v)))
        .collect();
    hash_json(&serde_json::to_value(ordered).unwrap_or_default())
}

/// Order-stable hash of a JSON document, as a non-negative id
pub fn hash_json(value: &serde_json::Value) -> i64 {
    let digest = blake3::hash(value.to_string().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    (u64::from_le_bytes(bytes) & i64::MAX as u64) as i64
}

/// JSON with object keys sorted, so equal values hash equally
fn canonical_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Map(map) => {
            let ordered: BTreeMap<&String, serde_json::Value> =
                map.iter().map(|(k, v)| (k, canonical_json(v))).collect();
            serde_json::to_value(ordered).unwrap_or_default()
        }
        Value::List(items) => serde_json::Value::Array(items.iter().map(canonical_json).collect()),
        other => other.to_json(),
    }
}
