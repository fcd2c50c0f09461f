//! Envelope kernel
//!
//! Every polymorphic service object shares one envelope: `id`, `name`,
//! `implementation`, `configContract`, an optional `protocol`, `tags`, a
//! handful of category-level flags and the free-form field bag. A
//! [`Category`] describes that envelope for one family of objects; a
//! [`Variant`] is one concrete implementation inside it. A [`Projection`]
//! binds the two and derives both the attribute schema and the
//! envelope<->attribute translation from them.

use radarr_client::ProviderResource;
use radarr_core::provider::{Diagnostics, ProviderError, ProviderResult};
use radarr_core::resource::{Attributes, Value};
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};
use serde::Deserialize;

use crate::fields::{FieldDescriptor, FieldKind, read_fields, write_fields};
use crate::harness::RecordCodec;
use crate::utils::attribute_name;

/// Category-level scalar marshalled directly on the envelope
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeAttr {
    pub wire: &'static str,
    pub kind: FieldKind,
}

impl EnvelopeAttr {
    pub const fn bool(wire: &'static str) -> Self {
        Self {
            wire,
            kind: FieldKind::Bool,
        }
    }

    pub const fn int(wire: &'static str) -> Self {
        Self {
            wire,
            kind: FieldKind::Int,
        }
    }

    pub const fn string(wire: &'static str) -> Self {
        Self {
            wire,
            kind: FieldKind::String,
        }
    }

    pub fn attribute(&self) -> String {
        attribute_name(self.wire)
    }
}

/// One family of polymorphic objects sharing an envelope
#[derive(Debug)]
pub struct Category {
    /// Human label used in messages (e.g., "indexer")
    pub label: &'static str,
    /// Resource type of the generic resource; variants append `_<suffix>`
    pub resource_prefix: &'static str,
    /// Collection endpoint; empty for categories only embedded in other objects
    pub path: &'static str,
    pub has_tags: bool,
    pub has_config_contract: bool,
    pub has_protocol: bool,
    pub flags: &'static [EnvelopeAttr],
    /// Field descriptor of the generic resource
    pub generic_fields: FieldDescriptor,
}

/// Envelope flags a variant exposes
#[derive(Debug, Clone, Copy)]
pub enum Flags {
    All,
    Only(&'static [&'static str]),
}

/// One concrete implementation of a category
#[derive(Debug)]
pub struct Variant {
    /// Resource type suffix (e.g., "newznab")
    pub suffix: &'static str,
    pub implementation: &'static str,
    pub config_contract: &'static str,
    pub protocol: Option<&'static str>,
    pub flags: Flags,
    pub fields: FieldDescriptor,
    /// Service names of fields the user must supply
    pub required: &'static [&'static str],
}

/// Which shape a projection presents
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Fixed implementation constants, narrow schema
    Typed(&'static Variant),
    /// Implementation and contract supplied by the user
    Generic,
}

/// A category seen through one variant (or generically)
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub category: &'static Category,
    pub shape: Shape,
}

impl Projection {
    pub fn typed(category: &'static Category, variant: &'static Variant) -> Self {
        Self {
            category,
            shape: Shape::Typed(variant),
        }
    }

    pub fn generic(category: &'static Category) -> Self {
        Self {
            category,
            shape: Shape::Generic,
        }
    }

    pub fn resource_type(&self) -> String {
        match self.shape {
            Shape::Typed(variant) => {
                format!("{}_{}", self.category.resource_prefix, variant.suffix)
            }
            Shape::Generic => self.category.resource_prefix.to_string(),
        }
    }

    pub fn variant(&self) -> Option<&'static Variant> {
        match self.shape {
            Shape::Typed(variant) => Some(variant),
            Shape::Generic => None,
        }
    }

    pub fn fields(&self) -> &'static FieldDescriptor {
        match self.shape {
            Shape::Typed(variant) => &variant.fields,
            Shape::Generic => &self.category.generic_fields,
        }
    }

    fn required_fields(&self) -> &'static [&'static str] {
        self.variant().map(|v| v.required).unwrap_or(&[])
    }

    /// Category flags this projection exposes
    pub fn flags(&self) -> Vec<&'static EnvelopeAttr> {
        let only = match self.shape {
            Shape::Typed(Variant {
                flags: Flags::Only(names),
                ..
            }) => Some(*names),
            _ => None,
        };
        self.category
            .flags
            .iter()
            .filter(|flag| only.is_none_or(|names| names.contains(&flag.wire)))
            .collect()
    }

    /// Attribute schemas of the envelope and the field bag
    pub fn attribute_schemas(&self) -> Vec<AttributeSchema> {
        let category = self.category;
        let mut attrs = vec![
            AttributeSchema::new("id", AttributeType::Int)
                .computed()
                .with_provider_name("id")
                .with_description("Service-assigned identifier"),
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_provider_name("name"),
        ];
        if category.has_tags {
            attrs.push(
                AttributeSchema::new("tags", types::int_set())
                    .optional_computed()
                    .with_provider_name("tags"),
            );
        }

        match self.shape {
            Shape::Generic => {
                attrs.push(
                    AttributeSchema::new("implementation", AttributeType::String)
                        .required()
                        .with_provider_name("implementation"),
                );
                if category.has_config_contract {
                    attrs.push(
                        AttributeSchema::new("config_contract", AttributeType::String)
                            .required()
                            .with_provider_name("configContract"),
                    );
                }
                if category.has_protocol {
                    attrs.push(
                        AttributeSchema::new("protocol", types::enumeration(&["usenet", "torrent"]))
                            .required()
                            .with_provider_name("protocol"),
                    );
                }
            }
            Shape::Typed(variant) => {
                if category.has_protocol
                    && let Some(protocol) = variant.protocol
                {
                    attrs.push(
                        AttributeSchema::new("protocol", types::enumeration(&[protocol]))
                            .optional_computed()
                            .with_provider_name("protocol"),
                    );
                }
            }
        }

        for flag in self.flags() {
            attrs.push(
                AttributeSchema::new(flag.attribute(), flag.kind.attribute_type())
                    .optional_computed()
                    .with_provider_name(flag.wire),
            );
        }

        attrs.extend(self.fields().attribute_schemas(self.required_fields()));
        attrs
    }

    pub fn schema(&self) -> ResourceSchema {
        let description = match self.shape {
            Shape::Typed(variant) => format!("{} {}", variant.implementation, self.category.label),
            Shape::Generic => format!("Generic {}", self.category.label),
        };
        ResourceSchema::new(self.resource_type())
            .attributes(self.attribute_schemas())
            .with_description(description)
    }

    /// Envelope to attributes
    ///
    /// Typed projections refuse objects of another implementation. Collection
    /// fields the service left out become empty sets.
    pub fn write(
        &self,
        envelope: &ProviderResource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<Attributes> {
        let category = self.category;
        if let Shape::Typed(variant) = self.shape
            && envelope.implementation != variant.implementation
        {
            return Err(ProviderError::implementation_mismatch(
                variant.implementation,
                &envelope.implementation,
            ));
        }

        let mut attrs = Attributes::new();
        attrs.insert("id".to_string(), Value::Int(envelope.id));
        if let Some(name) = &envelope.name {
            attrs.insert("name".to_string(), Value::String(name.clone()));
        }
        if category.has_tags {
            let tags = envelope.tags.as_deref().unwrap_or_default();
            attrs.insert(
                "tags".to_string(),
                Value::List(tags.iter().copied().map(Value::Int).collect()),
            );
        }

        match self.shape {
            Shape::Generic => {
                attrs.insert(
                    "implementation".to_string(),
                    Value::String(envelope.implementation.clone()),
                );
                if category.has_config_contract {
                    attrs.insert(
                        "config_contract".to_string(),
                        Value::String(envelope.config_contract.clone()),
                    );
                }
                if category.has_protocol
                    && let Some(protocol) = &envelope.protocol
                {
                    attrs.insert("protocol".to_string(), Value::String(protocol.clone()));
                }
            }
            Shape::Typed(variant) => {
                if category.has_protocol
                    && let Some(protocol) = variant.protocol
                {
                    attrs.insert("protocol".to_string(), Value::String(protocol.to_string()));
                }
            }
        }

        for flag in self.flags() {
            let Some(raw) = envelope.extra.get(flag.wire) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }
            match flag.kind.decode(raw) {
                Some(value) => {
                    attrs.insert(flag.attribute(), value);
                }
                None => diags.warn(
                    format!("Invalid {} value", category.label),
                    format!(
                        "'{}' returned {} which is not a {:?}; ignoring it",
                        flag.wire, raw, flag.kind
                    ),
                ),
            }
        }

        let fields = self.fields();
        write_fields(&mut attrs, &envelope.fields, fields)?;
        for entry in fields.entries() {
            if let Some(empty) = entry.kind.empty() {
                attrs.entry(entry.attribute).or_insert(empty);
            }
        }

        Ok(attrs)
    }

    /// Attributes to envelope
    ///
    /// Typed projections always inject their implementation constants.
    pub fn read(
        &self,
        attrs: &Attributes,
        diags: &mut Diagnostics,
    ) -> ProviderResult<ProviderResource> {
        let category = self.category;
        let mut envelope = ProviderResource {
            id: attrs.get("id").and_then(Value::as_int).unwrap_or_default(),
            name: attrs.get("name").and_then(Value::as_str).map(str::to_string),
            ..Default::default()
        };

        if category.has_tags {
            envelope.tags = Some(read_tags(attrs.get("tags"), category.label, diags));
        }

        match self.shape {
            Shape::Typed(variant) => {
                envelope.implementation = variant.implementation.to_string();
                if category.has_config_contract {
                    envelope.config_contract = variant.config_contract.to_string();
                }
                if category.has_protocol {
                    envelope.protocol = variant.protocol.map(str::to_string);
                }
            }
            Shape::Generic => {
                envelope.implementation = required_string(attrs, "implementation")?;
                if category.has_config_contract {
                    envelope.config_contract = required_string(attrs, "config_contract")?;
                }
                if category.has_protocol {
                    envelope.protocol = attrs
                        .get("protocol")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                }
            }
        }

        for flag in self.flags() {
            let Some(value) = attrs.get(&flag.attribute()) else {
                continue;
            };
            if value.is_unknown() {
                continue;
            }
            match flag.kind.encode(value) {
                Some(json) => {
                    envelope.extra.insert(flag.wire.to_string(), json);
                }
                None => diags.warn(
                    format!("Invalid {} value", category.label),
                    format!("'{}' is not a {:?}; it was not sent", flag.attribute(), flag.kind),
                ),
            }
        }

        envelope.fields = read_fields(attrs, self.fields())?;
        Ok(envelope)
    }
}

impl RecordCodec for Projection {
    fn type_name(&self) -> String {
        self.resource_type()
    }

    fn path(&self) -> &'static str {
        self.category.path
    }

    fn schema(&self) -> ResourceSchema {
        Projection::schema(self)
    }

    fn to_request(
        &self,
        attributes: &Attributes,
        diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value> {
        let envelope = self.read(attributes, diags)?;
        serde_json::to_value(&envelope).map_err(|e| {
            ProviderError::internal(format!("cannot encode {}: {}", self.category.label, e))
        })
    }

    fn from_response(
        &self,
        body: &serde_json::Value,
        diags: &mut Diagnostics,
    ) -> ProviderResult<Attributes> {
        let envelope = ProviderResource::deserialize(body).map_err(|e| {
            ProviderError::resource(format!("unexpected {} object: {}", self.category.label, e))
        })?;
        self.write(&envelope, diags)
    }
}

fn read_tags(value: Option<&Value>, label: &str, diags: &mut Diagnostics) -> Vec<i64> {
    let Some(Value::List(items)) = value else {
        return Vec::new();
    };
    let mut tags = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Int(id) if !tags.contains(id) => tags.push(*id),
            Value::Int(_) | Value::Unknown => {}
            other => diags.warn(
                format!("Invalid {} tag", label),
                format!("tag ids must be integers, got {:?}", other),
            ),
        }
    }
    tags
}

fn required_string(attrs: &Attributes, name: &str) -> ProviderResult<String> {
    attrs
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::resource(format!("attribute '{}' is required", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use radarr_client::Field;
    use radarr_core::provider::ErrorKind;
    use serde_json::json;

    static TEST_CATEGORY: Category = Category {
        label: "indexer",
        resource_prefix: "radarr_indexer",
        path: "/api/v3/indexer",
        has_tags: true,
        has_config_contract: true,
        has_protocol: true,
        flags: &[
            EnvelopeAttr::bool("enableRss"),
            EnvelopeAttr::bool("enableAutomaticSearch"),
            EnvelopeAttr::int("priority"),
        ],
        generic_fields: FieldDescriptor {
            strings: &["baseUrl", "apiKey"],
            int_slices: &["categories"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
    };

    static NEWZNAB: Variant = Variant {
        suffix: "newznab",
        implementation: "Newznab",
        config_contract: "NewznabSettings",
        protocol: Some("usenet"),
        flags: Flags::Only(&["enableRss", "priority"]),
        fields: FieldDescriptor {
            strings: &["baseUrl", "apiKey"],
            int_slices: &["categories", "multiLanguages"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl"],
    };

    fn newznab() -> Projection {
        Projection::typed(&TEST_CATEGORY, &NEWZNAB)
    }

    fn envelope() -> ProviderResource {
        serde_json::from_value(json!({
            "id": 7,
            "name": "A",
            "implementation": "Newznab",
            "configContract": "NewznabSettings",
            "protocol": "usenet",
            "enableRss": true,
            "enableAutomaticSearch": false,
            "priority": 25,
            "tags": [3, 1],
            "fields": [
                {"name": "baseUrl", "value": "http://i.example"},
                {"name": "apiKey", "value": "k"},
                {"name": "nonexistent", "value": 42}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn typed_schema_contains_only_exposed_attributes() {
        let schema = newznab().schema();
        assert_eq!(schema.resource_type, "radarr_indexer_newznab");
        assert!(schema.get("enable_rss").is_some());
        assert!(schema.get("enable_automatic_search").is_none());
        assert!(schema.get("implementation").is_none());
        assert!(schema.get("base_url").unwrap().required);
        assert!(schema.get("id").unwrap().is_read_only());
        assert_eq!(schema.sensitive_attributes(), vec!["api_key"]);
    }

    #[test]
    fn generic_schema_requires_implementation() {
        let schema = Projection::generic(&TEST_CATEGORY).schema();
        assert_eq!(schema.resource_type, "radarr_indexer");
        assert!(schema.get("implementation").unwrap().required);
        assert!(schema.get("config_contract").unwrap().required);
        assert!(schema.get("enable_automatic_search").is_some());
    }

    #[test]
    fn write_copies_envelope_flags_and_fields() {
        let mut diags = Diagnostics::new();
        let attrs = newznab().write(&envelope(), &mut diags).unwrap();

        assert_eq!(attrs.get("id"), Some(&Value::Int(7)));
        assert_eq!(attrs.get("name"), Some(&Value::String("A".into())));
        assert_eq!(attrs.get("protocol"), Some(&Value::String("usenet".into())));
        assert_eq!(attrs.get("enable_rss"), Some(&Value::Bool(true)));
        assert_eq!(attrs.get("priority"), Some(&Value::Int(25)));
        assert!(!attrs.contains_key("enable_automatic_search"));
        assert_eq!(attrs.get("api_key"), Some(&Value::String("k".into())));
        assert!(!attrs.contains_key("nonexistent"));
        assert!(diags.is_empty());
    }

    #[test]
    fn write_fills_missing_collections_with_empty_sets() {
        let mut diags = Diagnostics::new();
        let attrs = newznab().write(&envelope(), &mut diags).unwrap();
        assert_eq!(attrs.get("categories"), Some(&Value::List(vec![])));
        assert_eq!(attrs.get("multi_languages"), Some(&Value::List(vec![])));
    }

    #[test]
    fn write_rejects_other_implementation() {
        let mut other = envelope();
        other.implementation = "Torznab".to_string();
        let err = newznab().write(&other, &mut Diagnostics::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ImplementationMismatch);
    }

    #[test]
    fn write_reports_flag_of_wrong_class() {
        let mut bad = envelope();
        bad.extra.insert("priority".into(), json!("high"));
        let mut diags = Diagnostics::new();
        let attrs = newznab().write(&bad, &mut diags).unwrap();
        assert!(!attrs.contains_key("priority"));
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn read_injects_variant_constants() {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), Value::String("A".into()));
        attrs.insert("base_url".into(), Value::String("http://i.example".into()));
        attrs.insert("api_key".into(), Value::String("k".into()));
        attrs.insert("enable_rss".into(), Value::Bool(true));
        attrs.insert("tags".into(), Value::List(vec![Value::Int(2), Value::Int(2)]));

        let envelope = newznab().read(&attrs, &mut Diagnostics::new()).unwrap();
        assert_eq!(envelope.id, 0);
        assert_eq!(envelope.implementation, "Newznab");
        assert_eq!(envelope.config_contract, "NewznabSettings");
        assert_eq!(envelope.protocol.as_deref(), Some("usenet"));
        assert_eq!(envelope.tags, Some(vec![2]));
        assert_eq!(envelope.extra.get("enableRss"), Some(&json!(true)));
        assert_eq!(
            envelope.fields,
            vec![
                Field::new("baseUrl", "http://i.example"),
                Field::new("apiKey", "k"),
            ]
        );
    }

    #[test]
    fn generic_read_requires_implementation() {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), Value::String("A".into()));
        let err = Projection::generic(&TEST_CATEGORY)
            .read(&attrs, &mut Diagnostics::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Resource);
    }

    #[test]
    fn user_attributes_round_trip() {
        let mut plan = Attributes::new();
        plan.insert("name".into(), Value::String("A".into()));
        plan.insert("base_url".into(), Value::String("http://i.example".into()));
        plan.insert("categories".into(), Value::List(vec![Value::Int(2000)]));
        plan.insert("priority".into(), Value::Int(10));
        plan.insert("tags".into(), Value::List(vec![Value::Int(1)]));

        let mut diags = Diagnostics::new();
        let envelope = newznab().read(&plan, &mut diags).unwrap();
        let state = newznab().write(&envelope, &mut diags).unwrap();
        for (name, value) in &plan {
            assert_eq!(state.get(name), Some(value), "attribute {}", name);
        }
    }
}
