//! Schema - Define type schemas for resources
//!
//! Providers define schemas for each resource type and data source.
//! The engine uses them to validate configuration and to know which
//! attributes are computed or sensitive.

use std::collections::HashMap;
use std::fmt;

use crate::resource::{Attributes, Value};

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer (always 64-bit at this layer)
    Int,
    /// Floating point number
    Float,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// Ordered list
    List(Box<AttributeType>),
    /// Unordered collection without duplicates
    Set(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested object with its own attributes
    Object(Vec<AttributeSchema>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            // Unknown values are resolved by the engine after apply
            (_, Value::Unknown) => Ok(()),
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Float, Value::Float(_) | Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, base, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Set(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                    if items[..i].contains(item) {
                        return Err(TypeError::DuplicateSetElement { index: i });
                    }
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Object(attributes), Value::Map(map)) => {
                for attr in attributes {
                    if let Some(v) = map.get(&attr.name) {
                        attr.attr_type
                            .validate(v)
                            .map_err(|e| TypeError::MapValueError {
                                key: attr.name.clone(),
                                inner: Box::new(e),
                            })?;
                    } else if attr.required {
                        return Err(TypeError::MissingRequired {
                            name: attr.name.clone(),
                        });
                    }
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Float => "Float".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Set(inner) => format!("Set<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Object(_) => "Object".to_string(),
        }
    }

    /// Bring a value into canonical form: sets are sorted, integers in float
    /// positions become floats, nested objects are normalized recursively.
    pub fn normalize(&self, value: &mut Value) {
        if matches!(self, AttributeType::Float)
            && let Value::Int(i) = *value
        {
            *value = Value::Float(i as f64);
            return;
        }
        match (self, value) {
            (AttributeType::Set(inner), Value::List(items)) => {
                for item in items.iter_mut() {
                    inner.normalize(item);
                }
                items.sort_by(compare_values);
                items.dedup();
            }
            (AttributeType::List(inner), Value::List(items)) => {
                for item in items.iter_mut() {
                    inner.normalize(item);
                }
            }
            (AttributeType::Object(attributes), Value::Map(map)) => {
                for attr in attributes {
                    if let Some(v) = map.get_mut(&attr.name) {
                        attr.attr_type.normalize(v);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Total order over values used to canonicalize sets
fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_json().to_string().cmp(&b.to_json().to_string()),
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Attribute '{name}' is computed and cannot be set")]
    ComputedAttribute { name: String },

    #[error("Set element at index {index} is a duplicate")]
    DuplicateSetElement { index: usize },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Float(_) => "Float".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Unknown => "Unknown".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Set by the service; the user may not supply it unless also optional
    pub computed: bool,
    /// May be supplied by the user, filled by the service otherwise
    pub optional: bool,
    /// Value is a secret; never shown and carried over across reads
    pub sensitive: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Service-side JSON key (e.g., "qualityProfileId")
    pub provider_name: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            optional: true,
            sensitive: false,
            default: None,
            description: None,
            provider_name: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Computed only: the service owns the value
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    /// Optional and computed: the service fills the value when unset
    pub fn optional_computed(mut self) -> Self {
        self.computed = true;
        self.optional = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// JSON key on the wire (provider name, falling back to the attribute name)
    pub fn wire_name(&self) -> &str {
        self.provider_name.as_deref().unwrap_or(&self.name)
    }

    /// True if the user may never set this attribute
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn attributes(mut self, schemas: impl IntoIterator<Item = AttributeSchema>) -> Self {
        for schema in schemas {
            self.attributes.insert(schema.name.clone(), schema);
        }
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Names of attributes flagged sensitive, sorted
    pub fn sensitive_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .attributes
            .values()
            .filter(|a| a.sensitive)
            .map(|a| a.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Canonicalize attribute values in place (sorted sets)
    pub fn normalize(&self, attributes: &mut Attributes) {
        for (name, value) in attributes.iter_mut() {
            if let Some(schema) = self.attributes.get(name) {
                schema.attr_type.normalize(value);
            }
        }
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &Attributes) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        // Check required attributes
        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        // Type check each attribute
        for (name, value) in attributes {
            if let Some(schema) = self.attributes.get(name) {
                if schema.is_read_only() && !value.is_unknown() {
                    errors.push(TypeError::ComputedAttribute { name: name.clone() });
                } else if let Err(e) = schema.attr_type.validate(value) {
                    errors.push(e);
                }
            }
            // Unknown attributes are allowed (for flexibility)
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value {
                Value::Int(n) if *n > 0 => Ok(()),
                Value::Int(_) => Err("Value must be positive".to_string()),
                _ => Ok(()),
            },
        }
    }

    /// TCP port type (1-65535)
    pub fn port() -> AttributeType {
        AttributeType::Custom {
            name: "Port".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value {
                Value::Int(n) if (1..=65535).contains(n) => Ok(()),
                Value::Int(n) => Err(format!("Invalid port {}: must be 1-65535", n)),
                _ => Ok(()),
            },
        }
    }

    /// Set of numeric ids (tags, categories, ...)
    pub fn int_set() -> AttributeType {
        AttributeType::Set(Box::new(AttributeType::Int))
    }

    /// Set of strings
    pub fn string_set() -> AttributeType {
        AttributeType::Set(Box::new(AttributeType::String))
    }

    /// Enum built from string slices
    pub fn enumeration(values: &[&str]) -> AttributeType {
        AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
        assert!(t.validate(&Value::Unknown).is_ok());
    }

    #[test]
    fn validate_enum_type() {
        let t = types::enumeration(&["usenet", "torrent"]);
        assert!(t.validate(&Value::String("usenet".to_string())).is_ok());
        assert!(t.validate(&Value::String("ftp".to_string())).is_err());
    }

    #[test]
    fn validate_positive_int() {
        let t = types::positive_int();
        assert!(t.validate(&Value::Int(1)).is_ok());
        assert!(t.validate(&Value::Int(0)).is_err());
        assert!(t.validate(&Value::Int(-1)).is_err());
        assert!(t.validate(&Value::String("1".to_string())).is_err());
    }

    #[test]
    fn validate_port() {
        let t = types::port();
        assert!(t.validate(&Value::Int(7878)).is_ok());
        assert!(t.validate(&Value::Int(70000)).is_err());
    }

    #[test]
    fn set_rejects_duplicates() {
        let t = types::int_set();
        assert!(
            t.validate(&Value::List(vec![Value::Int(1), Value::Int(2)]))
                .is_ok()
        );
        assert!(
            t.validate(&Value::List(vec![Value::Int(1), Value::Int(1)]))
                .is_err()
        );
    }

    #[test]
    fn normalize_sorts_sets_but_not_lists() {
        let mut set = Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        types::int_set().normalize(&mut set);
        assert_eq!(
            set,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );

        let mut list = Value::List(vec![Value::Int(3), Value::Int(1)]);
        AttributeType::List(Box::new(AttributeType::Int)).normalize(&mut list);
        assert_eq!(list, Value::List(vec![Value::Int(3), Value::Int(1)]));
    }

    #[test]
    fn normalize_widens_integers_in_float_positions() {
        let mut ratio = Value::Int(2);
        AttributeType::Float.normalize(&mut ratio);
        assert_eq!(ratio, Value::Float(2.0));

        let mut count = Value::Int(2);
        AttributeType::Int.normalize(&mut count);
        assert_eq!(count, Value::Int(2));

        let element = AttributeType::Object(vec![AttributeSchema::new("min", AttributeType::Float)]);
        let mut map = HashMap::new();
        map.insert("min".to_string(), Value::Int(10));
        let mut value = Value::Map(map);
        element.normalize(&mut value);
        assert_eq!(value.as_map().unwrap().get("min"), Some(&Value::Float(10.0)));
    }

    #[test]
    fn validate_nested_object() {
        let t = AttributeType::List(Box::new(AttributeType::Object(vec![
            AttributeSchema::new("id", AttributeType::Int).required(),
            AttributeSchema::new("allowed", AttributeType::Bool),
        ])));
        let mut ok = HashMap::new();
        ok.insert("id".to_string(), Value::Int(7));
        ok.insert("allowed".to_string(), Value::Bool(true));
        assert!(t.validate(&Value::List(vec![Value::Map(ok)])).is_ok());

        let mut missing = HashMap::new();
        missing.insert("allowed".to_string(), Value::Bool(true));
        assert!(t.validate(&Value::List(vec![Value::Map(missing)])).is_err());
    }

    #[test]
    fn validate_resource_schema() {
        let schema = ResourceSchema::new("radarr_tag")
            .attribute(AttributeSchema::new("id", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("label", AttributeType::String).required());

        let mut attrs = HashMap::new();
        attrs.insert("label".to_string(), Value::String("hd".to_string()));
        assert!(schema.validate(&attrs).is_ok());

        attrs.insert("id".to_string(), Value::Unknown);
        assert!(schema.validate(&attrs).is_ok());

        attrs.insert("id".to_string(), Value::Int(3));
        assert!(schema.validate(&attrs).is_err());
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("radarr_tag")
            .attribute(AttributeSchema::new("label", AttributeType::String).required());

        let result = schema.validate(&HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn sensitive_attributes_are_listed() {
        let schema = ResourceSchema::new("radarr_indexer_newznab")
            .attribute(AttributeSchema::new("api_key", AttributeType::String).sensitive())
            .attribute(AttributeSchema::new("base_url", AttributeType::String));
        assert_eq!(schema.sensitive_attributes(), vec!["api_key"]);
    }
}
