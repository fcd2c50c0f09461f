//! Quality profiles
//!
//! The service nests qualities two ways inside `items`: a single quality is
//! `{quality: {...}, items: [], allowed}` and a group is
//! `{id, name, allowed, items: [<single>...]}`. Both flatten into one
//! `qualities` list; only groups carry a nested `qualities` attribute, so a
//! plan of single qualities reads back unchanged.

use std::collections::HashMap;

use radarr_client::paths;
use radarr_core::provider::{Diagnostics, ProviderResult};
use radarr_core::resource::{Attributes, Value};
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde_json::{Map, json};

use crate::harness::RecordCodec;
use crate::mapping::{self, attr};

const TYPE_NAME: &str = "radarr_quality_profile";

#[derive(Debug, Clone, Copy)]
pub struct QualityProfile;

fn quality_type() -> AttributeType {
    AttributeType::Object(vec![
        attr("id", AttributeType::Int).required(),
        attr("name", AttributeType::String).optional_computed(),
        attr("source", AttributeType::String).optional_computed(),
        attr("resolution", AttributeType::Int).optional_computed(),
    ])
}

fn qualities_attribute() -> AttributeSchema {
    AttributeSchema::new(
        "qualities",
        AttributeType::List(Box::new(AttributeType::Object(vec![
            attr("id", AttributeType::Int).required(),
            attr("name", AttributeType::String).optional_computed(),
            attr("allowed", AttributeType::Bool).required(),
            attr("qualities", AttributeType::List(Box::new(quality_type()))).optional_computed(),
        ]))),
    )
    .required()
    .with_provider_name("items")
    .with_description("Ordered qualities; elements with nested qualities are groups")
}

/// Every attribute except `qualities`, mapped generically
fn base_schema() -> ResourceSchema {
    ResourceSchema::new(TYPE_NAME)
        .attribute(attr("id", AttributeType::Int).computed())
        .attribute(attr("name", AttributeType::String).required())
        .attribute(attr("upgrade_allowed", AttributeType::Bool).optional_computed())
        .attribute(attr("cutoff", AttributeType::Int).required())
        .attribute(attr("cutoff_format_score", AttributeType::Int).optional_computed())
        .attribute(attr("min_format_score", AttributeType::Int).optional_computed())
        .attribute(
            attr(
                "language",
                AttributeType::Object(vec![
                    attr("id", AttributeType::Int).required(),
                    attr("name", AttributeType::String).optional_computed(),
                ]),
            )
            .optional_computed(),
        )
        .attribute(
            attr(
                "format_items",
                AttributeType::Set(Box::new(AttributeType::Object(vec![
                    attr("format", AttributeType::Int).required(),
                    attr("name", AttributeType::String).optional_computed(),
                    attr("score", AttributeType::Int).required(),
                ]))),
            )
            .optional_computed(),
        )
}

impl RecordCodec for QualityProfile {
    fn type_name(&self) -> String {
        TYPE_NAME.to_string()
    }

    fn path(&self) -> &'static str {
        paths::QUALITY_PROFILE
    }

    fn schema(&self) -> ResourceSchema {
        base_schema()
            .attribute(qualities_attribute())
            .with_description("Quality profile")
    }

    fn to_request(
        &self,
        attributes: &Attributes,
        _diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value> {
        let mut body = mapping::to_json(&base_schema(), attributes);
        if let Some(Value::List(qualities)) = attributes.get("qualities")
            && let Some(object) = body.as_object_mut()
        {
            let items = qualities.iter().filter_map(item_to_json).collect();
            object.insert("items".to_string(), serde_json::Value::Array(items));
        }
        Ok(body)
    }

    fn from_response(
        &self,
        body: &serde_json::Value,
        _diags: &mut Diagnostics,
    ) -> ProviderResult<Attributes> {
        let mut attributes = mapping::from_json(&base_schema(), body);
        if let Some(items) = body.get("items").and_then(serde_json::Value::as_array) {
            attributes.insert(
                "qualities".to_string(),
                Value::List(items.iter().filter_map(item_from_json).collect()),
            );
        }
        Ok(attributes)
    }
}

fn item_to_json(element: &Value) -> Option<serde_json::Value> {
    let element = element.as_map()?;
    let allowed = element
        .get("allowed")
        .and_then(Value::as_bool)
        .unwrap_or_default();

    match element.get("qualities").and_then(Value::as_list) {
        Some(members) if !members.is_empty() => {
            let mut group = Map::new();
            copy_scalar(element, &mut group, "id");
            copy_scalar(element, &mut group, "name");
            group.insert("allowed".to_string(), json!(allowed));
            group.insert(
                "items".to_string(),
                serde_json::Value::Array(
                    members
                        .iter()
                        .filter_map(Value::as_map)
                        .map(|quality| single(quality, allowed))
                        .collect(),
                ),
            );
            Some(serde_json::Value::Object(group))
        }
        _ => Some(single(element, allowed)),
    }
}

fn single(quality: &HashMap<String, Value>, allowed: bool) -> serde_json::Value {
    let mut object = Map::new();
    for key in ["id", "name", "source", "resolution"] {
        copy_scalar(quality, &mut object, key);
    }
    json!({"quality": object, "items": [], "allowed": allowed})
}

fn copy_scalar(from: &HashMap<String, Value>, to: &mut Map<String, serde_json::Value>, key: &str) {
    if let Some(value) = from.get(key)
        && !value.is_unknown()
    {
        to.insert(key.to_string(), value.to_json());
    }
}

fn item_from_json(item: &serde_json::Value) -> Option<Value> {
    let allowed = item.get("allowed").and_then(serde_json::Value::as_bool);
    let mut element = HashMap::new();

    if let Some(quality) = item.get("quality").filter(|q| q.is_object()) {
        element.insert("id".to_string(), Value::Int(quality.get("id")?.as_i64()?));
        if let Some(name) = quality.get("name").and_then(serde_json::Value::as_str) {
            element.insert("name".to_string(), Value::String(name.to_string()));
        }
    } else {
        element.insert("id".to_string(), Value::Int(item.get("id")?.as_i64()?));
        if let Some(name) = item.get("name").and_then(serde_json::Value::as_str) {
            element.insert("name".to_string(), Value::String(name.to_string()));
        }
        let members = item
            .get("items")
            .and_then(serde_json::Value::as_array)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|member| mapping::json_to_value(&quality_type(), member.get("quality")?))
                    .collect()
            })
            .unwrap_or_default();
        element.insert("qualities".to_string(), Value::List(members));
    }

    element.insert("allowed".to_string(), Value::Bool(allowed.unwrap_or_default()));
    Some(Value::Map(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quality(id: i64, name: &str, allowed: bool) -> Value {
        Value::Map(HashMap::from([
            ("id".to_string(), Value::Int(id)),
            ("name".to_string(), Value::String(name.to_string())),
            ("allowed".to_string(), Value::Bool(allowed)),
        ]))
    }

    fn plan(hd_allowed: bool) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("id".into(), Value::Int(3));
        attrs.insert("name".into(), Value::String("HD".into()));
        attrs.insert("cutoff".into(), Value::Int(7));
        attrs.insert(
            "qualities".into(),
            Value::List(vec![quality(7, "HD", hd_allowed), quality(8, "UHD", false)]),
        );
        attrs
    }

    #[test]
    fn single_qualities_round_trip() {
        let codec = QualityProfile;
        let mut diags = Diagnostics::new();
        let body = codec.to_request(&plan(true), &mut diags).unwrap();
        assert_eq!(
            body["items"],
            json!([
                {"quality": {"id": 7, "name": "HD"}, "items": [], "allowed": true},
                {"quality": {"id": 8, "name": "UHD"}, "items": [], "allowed": false}
            ])
        );

        let back = codec.from_response(&body, &mut diags).unwrap();
        assert_eq!(back.get("qualities"), plan(true).get("qualities"));
        assert_eq!(back.get("cutoff"), Some(&Value::Int(7)));
    }

    #[test]
    fn flipping_allowed_changes_only_that_element() {
        let codec = QualityProfile;
        let mut diags = Diagnostics::new();
        let before = codec.to_request(&plan(true), &mut diags).unwrap();
        let after = codec.to_request(&plan(false), &mut diags).unwrap();

        let before = before["items"].as_array().unwrap();
        let after = after["items"].as_array().unwrap();
        assert_ne!(before[0], after[0]);
        assert_eq!(after[0]["allowed"], json!(false));
        assert_eq!(before[1], after[1]);
    }

    #[test]
    fn groups_carry_nested_qualities() {
        let body = json!({
            "id": 1,
            "name": "Any",
            "cutoff": 1000,
            "items": [{
                "id": 1000,
                "name": "WEB 1080p",
                "allowed": true,
                "items": [
                    {"quality": {"id": 3, "name": "WEBDL-1080p", "source": "webdl", "resolution": 1080}, "items": [], "allowed": true},
                    {"quality": {"id": 15, "name": "WEBRip-1080p", "source": "webrip", "resolution": 1080}, "items": [], "allowed": true}
                ]
            }],
            "formatItems": [{"format": 2, "name": "x265", "score": -10}],
            "language": {"id": 1, "name": "English"}
        });
        let attrs = QualityProfile
            .from_response(&body, &mut Diagnostics::new())
            .unwrap();

        let qualities = attrs.get("qualities").and_then(Value::as_list).unwrap();
        let group = qualities[0].as_map().unwrap();
        assert_eq!(group.get("id"), Some(&Value::Int(1000)));
        let members = group.get("qualities").and_then(Value::as_list).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(
            members[1].as_map().and_then(|m| m.get("source")),
            Some(&Value::String("webrip".into()))
        );
        assert_eq!(
            attrs.get("format_items").and_then(Value::as_list).map(<[Value]>::len),
            Some(1)
        );

        let request = QualityProfile
            .to_request(&attrs, &mut Diagnostics::new())
            .unwrap();
        assert_eq!(request["items"][0]["items"][1]["quality"]["id"], json!(15));
        assert_eq!(request["items"][0]["id"], json!(1000));
    }
}
