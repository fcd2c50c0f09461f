//! Movies
//!
//! Adding a movie never triggers a search; deleting one keeps its files and
//! does not add an import exclusion.

use radarr_client::paths;
use radarr_core::provider::{Diagnostics, ProviderResult};
use radarr_core::resource::Attributes;
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};
use serde_json::json;

use crate::harness::RecordCodec;
use crate::mapping::{self, attr};

const TYPE_NAME: &str = "radarr_movie";

#[derive(Debug, Clone, Copy)]
pub struct Movie;

fn attributes() -> Vec<AttributeSchema> {
    let mut attributes = vec![
        attr("title", AttributeType::String).required(),
        attr("tmdb_id", AttributeType::Int).required(),
        attr("quality_profile_id", AttributeType::Int).required(),
        attr("monitored", AttributeType::Bool).required(),
        attr("path", AttributeType::String).optional_computed(),
        attr("root_folder_path", AttributeType::String).optional_computed(),
        attr(
            "minimum_availability",
            types::enumeration(&["tba", "announced", "inCinemas", "released", "deleted"]),
        )
        .optional_computed(),
        attr("tags", types::int_set()).optional_computed(),
    ];

    let computed_strings = [
        "original_title",
        "imdb_id",
        "status",
        "overview",
        "studio",
        "website",
        "youtube_trailer_id",
    ];
    attributes.extend(
        computed_strings
            .iter()
            .map(|name| attr(name, AttributeType::String).computed()),
    );
    attributes.extend([
        attr("year", AttributeType::Int).computed(),
        attr("runtime", AttributeType::Int).computed(),
        attr("size_on_disk", AttributeType::Int).computed(),
        attr("has_file", AttributeType::Bool).computed(),
        attr("is_available", AttributeType::Bool).computed(),
        attr("genres", AttributeType::List(Box::new(AttributeType::String))).computed(),
        attr(
            "original_language",
            AttributeType::Object(vec![
                attr("id", AttributeType::Int),
                attr("name", AttributeType::String),
            ]),
        )
        .computed(),
    ]);
    attributes
}

impl RecordCodec for Movie {
    fn type_name(&self) -> String {
        TYPE_NAME.to_string()
    }

    fn path(&self) -> &'static str {
        paths::MOVIE
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .attribute(attr("id", AttributeType::Int).computed())
            .attributes(attributes())
            .with_description("Movie")
    }

    fn to_request(
        &self,
        attributes: &Attributes,
        _diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value> {
        Ok(mapping::to_json(&self.schema(), attributes))
    }

    fn from_response(
        &self,
        body: &serde_json::Value,
        _diags: &mut Diagnostics,
    ) -> ProviderResult<Attributes> {
        Ok(mapping::from_json(&self.schema(), body))
    }

    fn create_request(
        &self,
        attributes: &Attributes,
        diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value> {
        let mut body = self.to_request(attributes, diags)?;
        if let Some(object) = body.as_object_mut() {
            object.insert(
                "addOptions".to_string(),
                json!({"searchForMovie": false, "monitor": "movieOnly"}),
            );
        }
        Ok(body)
    }

    fn delete_query(&self) -> &'static [(&'static str, &'static str)] {
        &[("deleteFiles", "false"), ("addImportExclusion", "false")]
    }
}
