//! Schema-driven JSON mapping for flat records
//!
//! Attributes carry their service-side key in `provider_name`; values are
//! converted according to the declared attribute type, recursing into nested
//! objects, lists and sets. Values of an unexpected class are dropped.

use std::collections::HashMap;

use radarr_core::resource::{Attributes, Value};
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use crate::utils::wire_name;

/// Attribute whose service key is the lower-camel form of its name
pub fn attr(name: &str, attr_type: AttributeType) -> AttributeSchema {
    AttributeSchema::new(name, attr_type).with_provider_name(wire_name(name))
}

/// Attributes to a JSON object, skipping attributes the user cannot set
/// (except `id`, which addresses the object).
pub fn to_json(schema: &ResourceSchema, attributes: &Attributes) -> serde_json::Value {
    serde_json::Value::Object(object_to_json(
        schema.attributes.values().filter(|a| a.name == "id" || !a.is_read_only()),
        attributes,
    ))
}

/// JSON object to attributes; keys the schema does not declare are ignored
pub fn from_json(schema: &ResourceSchema, body: &serde_json::Value) -> Attributes {
    object_from_json(schema.attributes.values(), body)
}

fn object_to_json<'a>(
    schemas: impl IntoIterator<Item = &'a AttributeSchema>,
    attributes: &HashMap<String, Value>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut object = serde_json::Map::new();
    for schema in schemas {
        if let Some(value) = attributes.get(&schema.name)
            && !value.is_unknown()
            && let Some(json) = value_to_json(&schema.attr_type, value)
        {
            object.insert(schema.wire_name().to_string(), json);
        }
    }
    object
}

fn object_from_json<'a>(
    schemas: impl IntoIterator<Item = &'a AttributeSchema>,
    body: &serde_json::Value,
) -> Attributes {
    let mut attributes = Attributes::new();
    for schema in schemas {
        if let Some(raw) = body.get(schema.wire_name())
            && let Some(value) = json_to_value(&schema.attr_type, raw)
        {
            attributes.insert(schema.name.clone(), value);
        }
    }
    attributes
}

/// Attribute value to JSON by declared type
pub fn value_to_json(attr_type: &AttributeType, value: &Value) -> Option<serde_json::Value> {
    match (attr_type, value) {
        (_, Value::Unknown) => None,
        (AttributeType::Object(schemas), Value::Map(map)) => {
            Some(serde_json::Value::Object(object_to_json(schemas, map)))
        }
        (AttributeType::List(inner) | AttributeType::Set(inner), Value::List(items)) => Some(
            serde_json::Value::Array(
                items
                    .iter()
                    .filter_map(|item| value_to_json(inner, item))
                    .collect(),
            ),
        ),
        (AttributeType::Custom { base, .. }, v) => value_to_json(base, v),
        (AttributeType::Float, Value::Int(i)) => Some(serde_json::Value::from(*i as f64)),
        (_, v) => Some(v.to_json()),
    }
}

/// JSON to attribute value by declared type, `None` on a class mismatch
pub fn json_to_value(attr_type: &AttributeType, raw: &serde_json::Value) -> Option<Value> {
    match attr_type {
        AttributeType::String | AttributeType::Enum(_) => {
            raw.as_str().map(|s| Value::String(s.to_string()))
        }
        AttributeType::Int => raw.as_i64().map(Value::Int),
        AttributeType::Float => raw.as_f64().map(Value::Float),
        AttributeType::Bool => raw.as_bool().map(Value::Bool),
        AttributeType::Custom { base, .. } => json_to_value(base, raw),
        AttributeType::List(inner) | AttributeType::Set(inner) => Some(Value::List(
            raw.as_array()?
                .iter()
                .filter_map(|item| json_to_value(inner, item))
                .collect(),
        )),
        AttributeType::Map(inner) => Some(Value::Map(
            raw.as_object()?
                .iter()
                .filter_map(|(k, v)| json_to_value(inner, v).map(|v| (k.clone(), v)))
                .collect(),
        )),
        AttributeType::Object(schemas) => {
            raw.as_object()?;
            Some(Value::Map(object_from_json(schemas, raw)))
        }
    }
}
