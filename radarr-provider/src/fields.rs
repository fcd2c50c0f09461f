//! Field codec
//!
//! Moves values between a record's flat attribute bag and the service's
//! untyped `[{name, value}]` field list. A [`FieldDescriptor`] classifies the
//! service-side names a record understands by primitive kind; the codec
//! discriminates on the runtime class of each wire value and silently drops
//! anything that does not match, since the service emits a superset of the
//! fields that apply to a given implementation.

use std::collections::HashMap;

use radarr_client::Field;
use radarr_core::provider::{ProviderError, ProviderResult};
use radarr_core::resource::{Attributes, Value};
use radarr_core::schema::{AttributeSchema, AttributeType, types};

use crate::utils::{attribute_name, same_wire_name};

/// Primitive kind of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    String,
    IntSet,
    StringSet,
}

impl FieldKind {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            FieldKind::Bool => AttributeType::Bool,
            FieldKind::Int => AttributeType::Int,
            FieldKind::Float => AttributeType::Float,
            FieldKind::String => AttributeType::String,
            FieldKind::IntSet => types::int_set(),
            FieldKind::StringSet => types::string_set(),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, FieldKind::IntSet | FieldKind::StringSet)
    }

    /// Wire value to attribute value, `None` if the runtime class differs
    pub fn decode(&self, value: &serde_json::Value) -> Option<Value> {
        match self {
            FieldKind::Bool => value.as_bool().map(Value::Bool),
            FieldKind::Int => value.as_i64().map(Value::Int),
            FieldKind::Float => value.as_f64().map(Value::Float),
            FieldKind::String => value.as_str().map(|s| Value::String(s.to_string())),
            FieldKind::IntSet => value
                .as_array()?
                .iter()
                .map(|v| v.as_i64().map(Value::Int))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            FieldKind::StringSet => value
                .as_array()?
                .iter()
                .map(|v| v.as_str().map(|s| Value::String(s.to_string())))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
        }
    }

    /// Attribute value to wire value, `None` if the attribute holds another class
    pub fn encode(&self, value: &Value) -> Option<serde_json::Value> {
        match (self, value) {
            (FieldKind::Bool, Value::Bool(b)) => Some(serde_json::Value::Bool(*b)),
            (FieldKind::Int, Value::Int(i)) => Some(serde_json::Value::from(*i)),
            (FieldKind::Float, Value::Float(_) | Value::Int(_)) => {
                value.as_float().map(serde_json::Value::from)
            }
            (FieldKind::String, Value::String(s)) => Some(serde_json::Value::String(s.clone())),
            (FieldKind::IntSet, Value::List(items)) => Some(serde_json::Value::Array(
                items
                    .iter()
                    .filter_map(Value::as_int)
                    .map(serde_json::Value::from)
                    .collect(),
            )),
            (FieldKind::StringSet, Value::List(items)) => Some(serde_json::Value::Array(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|s| serde_json::Value::String(s.to_string()))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Zero value written when the service omits a collection
    pub fn empty(&self) -> Option<Value> {
        self.is_collection().then(|| Value::List(Vec::new()))
    }
}

/// Static classification of a record's field-bag names
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub bools: &'static [&'static str],
    pub ints: &'static [&'static str],
    pub floats: &'static [&'static str],
    pub strings: &'static [&'static str],
    pub int_slices: &'static [&'static str],
    pub string_slices: &'static [&'static str],
    /// Service names whose values are secrets
    pub sensitive: &'static [&'static str],
    /// Explicit (service name, attribute name) bindings for names that do not
    /// convert cleanly (e.g., "aPIKey" -> "api_key", "tags" -> "field_tags")
    pub aliases: &'static [(&'static str, &'static str)],
}

/// One classified name of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub wire: &'static str,
    pub attribute: String,
    pub kind: FieldKind,
    pub sensitive: bool,
}

impl FieldDescriptor {
    pub const EMPTY: FieldDescriptor = FieldDescriptor {
        bools: &[],
        ints: &[],
        floats: &[],
        strings: &[],
        int_slices: &[],
        string_slices: &[],
        sensitive: &[],
        aliases: &[],
    };

    /// Every classified name, in declaration order
    pub fn entries(&self) -> Vec<FieldEntry> {
        let classes: [(&[&'static str], FieldKind); 6] = [
            (self.bools, FieldKind::Bool),
            (self.ints, FieldKind::Int),
            (self.floats, FieldKind::Float),
            (self.strings, FieldKind::String),
            (self.int_slices, FieldKind::IntSet),
            (self.string_slices, FieldKind::StringSet),
        ];
        classes
            .iter()
            .flat_map(|(names, kind)| {
                names.iter().map(move |wire| FieldEntry {
                    wire,
                    attribute: self.attribute_for(wire),
                    kind: *kind,
                    sensitive: self.sensitive.contains(wire),
                })
            })
            .collect()
    }

    fn attribute_for(&self, wire: &str) -> String {
        self.aliases
            .iter()
            .find(|(name, _)| *name == wire)
            .map(|(_, attribute)| attribute.to_string())
            .unwrap_or_else(|| attribute_name(wire))
    }

    /// A descriptor must not bind one attribute twice, and its sensitive and
    /// alias lists may only name classified fields.
    pub fn validate(&self) -> ProviderResult<()> {
        let entries = self.entries();
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for entry in &entries {
            if let Some(previous) = seen.insert(&entry.attribute, entry.wire) {
                return Err(ProviderError::internal(format!(
                    "field descriptor binds attribute '{}' twice ('{}' and '{}')",
                    entry.attribute, previous, entry.wire
                )));
            }
        }
        let classified = |name: &str| entries.iter().any(|e| e.wire == name);
        for name in self
            .sensitive
            .iter()
            .chain(self.aliases.iter().map(|(name, _)| name))
        {
            if !classified(name) {
                return Err(ProviderError::internal(format!(
                    "field descriptor references unclassified field '{}'",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Attribute schemas for every classified field
    ///
    /// All fields are optional and computed: the service fills defaults for
    /// anything the user leaves out.
    pub fn attribute_schemas(&self, required: &[&str]) -> Vec<AttributeSchema> {
        self.entries()
            .into_iter()
            .map(|entry| {
                let mut schema = AttributeSchema::new(&entry.attribute, entry.kind.attribute_type())
                    .with_provider_name(entry.wire);
                schema = if required.contains(&entry.wire) {
                    schema.required()
                } else {
                    schema.optional_computed()
                };
                if entry.sensitive {
                    schema = schema.sensitive();
                }
                schema
            })
            .collect()
    }
}

/// Copy field-bag values onto `target` by name and kind
pub fn write_fields(
    target: &mut Attributes,
    fields: &[Field],
    descriptor: &FieldDescriptor,
) -> ProviderResult<()> {
    descriptor.validate()?;
    let entries = descriptor.entries();

    for field in fields {
        if field.value.is_null() {
            continue;
        }
        let Some(entry) = entries.iter().find(|e| same_wire_name(e.wire, &field.name)) else {
            continue;
        };
        if let Some(value) = entry.kind.decode(&field.value) {
            target.insert(entry.attribute.clone(), value);
        }
    }
    Ok(())
}

/// Emit one field-bag entry for every classified attribute that is set
pub fn read_fields(source: &Attributes, descriptor: &FieldDescriptor) -> ProviderResult<Vec<Field>> {
    descriptor.validate()?;

    let mut fields = Vec::new();
    for entry in descriptor.entries() {
        let Some(value) = source.get(&entry.attribute) else {
            continue;
        };
        if value.is_unknown() {
            continue;
        }
        if let Some(json) = entry.kind.encode(value) {
            fields.push(Field::new(entry.wire, json));
        }
    }
    Ok(fields)
}
