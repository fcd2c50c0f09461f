//! Custom formats

use radarr_client::paths;
use radarr_core::provider::{Diagnostics, ProviderResult};
use radarr_core::resource::Attributes;
use radarr_core::schema::{AttributeType, ResourceSchema};

use super::specification;
use crate::harness::RecordCodec;
use crate::mapping::{self, attr};
use crate::variants::CUSTOM_FORMAT_CONDITIONS;

const TYPE_NAME: &str = "radarr_custom_format";

#[derive(Debug, Clone, Copy)]
pub struct CustomFormat;

fn base_schema() -> ResourceSchema {
    ResourceSchema::new(TYPE_NAME)
        .attribute(attr("id", AttributeType::Int).computed())
        .attribute(attr("name", AttributeType::String).required())
        .attribute(attr("include_custom_format_when_renaming", AttributeType::Bool).optional_computed())
}

impl RecordCodec for CustomFormat {
    fn type_name(&self) -> String {
        TYPE_NAME.to_string()
    }

    fn path(&self) -> &'static str {
        paths::CUSTOM_FORMAT
    }

    fn schema(&self) -> ResourceSchema {
        base_schema()
            .attribute(specification::attribute())
            .with_description("Custom format")
    }

    fn to_request(
        &self,
        attributes: &Attributes,
        diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value> {
        let mut body = mapping::to_json(&base_schema(), attributes);
        if let Some(specifications) =
            specification::to_json(attributes, &CUSTOM_FORMAT_CONDITIONS, diags)?
            && let Some(object) = body.as_object_mut()
        {
            object.insert("specifications".to_string(), specifications);
        }
        Ok(body)
    }

    fn from_response(
        &self,
        body: &serde_json::Value,
        diags: &mut Diagnostics,
    ) -> ProviderResult<Attributes> {
        let mut attributes = mapping::from_json(&base_schema(), body);
        if let Some(specifications) = specification::from_json(body, &CUSTOM_FORMAT_CONDITIONS, diags)? {
            attributes.insert("specifications".to_string(), specifications);
        }
        Ok(attributes)
    }
}
