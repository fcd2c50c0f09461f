//! Nested condition sets of custom formats and auto tags
//!
//! Each element names its implementation and is pushed through the envelope
//! kernel with the matching variant row. Elements use one loose shape
//! (`value` as a string, `min` and `max` as floats) so a set can mix
//! implementations; values are coerced to the kind the variant declares.

use std::collections::HashMap;

use radarr_client::ProviderResource;
use radarr_core::provider::{Diagnostics, ProviderError, ProviderResult};
use radarr_core::resource::{Attributes, Value};
use radarr_core::schema::{AttributeSchema, AttributeType};
use serde::Deserialize;
use tracing::warn;

use crate::envelope::Projection;
use crate::fields::FieldKind;
use crate::mapping::attr;
use crate::variants::Family;

const ATTRIBUTE: &str = "specifications";

/// Loose element attributes, in addition to `name` and `implementation`
const LOOSE: [&str; 3] = ["value", "min", "max"];

pub fn attribute() -> AttributeSchema {
    attr(
        ATTRIBUTE,
        AttributeType::Set(Box::new(AttributeType::Object(vec![
            attr("name", AttributeType::String).required(),
            attr("implementation", AttributeType::String).required(),
            attr("negate", AttributeType::Bool).optional_computed(),
            attr("required", AttributeType::Bool).optional_computed(),
            attr("value", AttributeType::String).optional_computed(),
            attr("min", AttributeType::Float).optional_computed(),
            attr("max", AttributeType::Float).optional_computed(),
        ]))),
    )
    .required()
}

/// `specifications` attribute to the wire array, if set
pub fn to_json(
    attributes: &Attributes,
    family: &Family,
    diags: &mut Diagnostics,
) -> ProviderResult<Option<serde_json::Value>> {
    let Some(Value::List(elements)) = attributes.get(ATTRIBUTE) else {
        return Ok(None);
    };
    let mut wire = Vec::with_capacity(elements.len());
    for element in elements {
        let Some(element) = element.as_map() else {
            continue;
        };
        wire.push(element_to_json(element, family, diags)?);
    }
    Ok(Some(serde_json::Value::Array(wire)))
}

/// Wire array to the `specifications` attribute, if present
///
/// Elements of an implementation this provider does not know are skipped
/// with a warning.
pub fn from_json(
    body: &serde_json::Value,
    family: &Family,
    diags: &mut Diagnostics,
) -> ProviderResult<Option<Value>> {
    let Some(items) = body.get(ATTRIBUTE).and_then(serde_json::Value::as_array) else {
        return Ok(None);
    };
    let mut elements = Vec::with_capacity(items.len());
    for item in items {
        if let Some(element) = element_from_json(item, family, diags)? {
            elements.push(element);
        }
    }
    Ok(Some(Value::List(elements)))
}

fn element_to_json(
    element: &HashMap<String, Value>,
    family: &Family,
    diags: &mut Diagnostics,
) -> ProviderResult<serde_json::Value> {
    let implementation = element
        .get("implementation")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let variant = family.by_implementation(implementation).ok_or_else(|| {
        ProviderError::resource(format!(
            "unknown {} implementation '{}'",
            family.category.label, implementation
        ))
    })?;
    let projection = Projection::typed(family.category, variant);

    let mut attrs: Attributes = ["name", "negate", "required"]
        .into_iter()
        .filter_map(|key| Some((key.to_string(), element.get(key)?.clone())))
        .collect();
    for entry in variant.fields.entries() {
        let Some(value) = element.get(&entry.attribute).filter(|v| !v.is_unknown()) else {
            continue;
        };
        let coerced = coerce(value, entry.kind).ok_or_else(|| {
            ProviderError::resource(format!(
                "{} '{}' of {} expects {}",
                family.category.label,
                entry.attribute,
                variant.implementation,
                entry.kind.attribute_type()
            ))
        })?;
        attrs.insert(entry.attribute, coerced);
    }

    let envelope = projection.read(&attrs, diags)?;
    serde_json::to_value(&envelope).map_err(|e| {
        ProviderError::internal(format!("cannot encode {}", family.category.label)).with_cause(e)
    })
}

fn element_from_json(
    item: &serde_json::Value,
    family: &Family,
    diags: &mut Diagnostics,
) -> ProviderResult<Option<Value>> {
    let envelope = ProviderResource::deserialize(item).map_err(|e| {
        ProviderError::internal(format!("malformed {}", family.category.label)).with_cause(e)
    })?;
    let Some(variant) = family.by_implementation(&envelope.implementation) else {
        warn!(implementation = %envelope.implementation, "skipping unknown {}", family.category.label);
        diags.warn(
            format!("Unknown {}", family.category.label),
            format!(
                "'{}' is not supported and was left out of state",
                envelope.implementation
            ),
        );
        return Ok(None);
    };

    let attrs = Projection::typed(family.category, variant).write(&envelope, diags)?;
    let mut element = HashMap::new();
    element.insert(
        "implementation".to_string(),
        Value::String(variant.implementation.to_string()),
    );
    for key in ["name", "negate", "required"] {
        if let Some(value) = attrs.get(key) {
            element.insert(key.to_string(), value.clone());
        }
    }
    for key in LOOSE {
        let target = if key == "value" { FieldKind::String } else { FieldKind::Float };
        if let Some(value) = attrs.get(key).and_then(|v| coerce(v, target)) {
            element.insert(key.to_string(), value);
        }
    }
    Ok(Some(Value::Map(element)))
}

/// Convert between the loose element shape and a variant's declared kind
fn coerce(value: &Value, kind: FieldKind) -> Option<Value> {
    match (value, kind) {
        (Value::String(_), FieldKind::String)
        | (Value::Int(_), FieldKind::Int)
        | (Value::Float(_), FieldKind::Float)
        | (Value::Bool(_), FieldKind::Bool) => Some(value.clone()),
        (Value::String(s), FieldKind::Int) => s.trim().parse().ok().map(Value::Int),
        (Value::String(s), FieldKind::Float) => s.trim().parse().ok().map(Value::Float),
        (Value::Int(i), FieldKind::String) => Some(Value::String(i.to_string())),
        (Value::Int(i), FieldKind::Float) => Some(Value::Float(*i as f64)),
        (Value::Float(f), FieldKind::String) => Some(Value::String(f.to_string())),
        (Value::Float(f), FieldKind::Int) if f.fract() == 0.0 => Some(Value::Int(*f as i64)),
        (Value::Bool(b), FieldKind::String) => Some(Value::String(b.to_string())),
        _ => None,
    }
}
