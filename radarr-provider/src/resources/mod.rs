//! Non-polymorphic resources
//!
//! These records have a fixed schema and bypass the field codec. Most are
//! plain [`Flat`] records mapped through `provider_name`; quality profiles,
//! movies, custom formats and auto tags carry their own codecs.

pub mod auto_tag;
pub mod custom_format;
pub mod movie;
pub mod quality_profile;
pub mod specification;

use std::sync::Arc;

use radarr_client::paths;
use radarr_core::provider::{Diagnostics, ProviderResult};
use radarr_core::resource::Attributes;
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::harness::RecordCodec;
use crate::mapping::{self, attr};

/// A record whose attributes map one-to-one onto JSON keys
#[derive(Debug, Clone, Copy)]
pub struct Flat {
    pub type_name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub attributes: fn() -> Vec<AttributeSchema>,
    pub updatable: bool,
}

impl RecordCodec for Flat {
    fn type_name(&self) -> String {
        self.type_name.to_string()
    }

    fn path(&self) -> &'static str {
        self.path
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name)
            .attribute(attr("id", AttributeType::Int).computed())
            .attributes((self.attributes)())
            .with_description(self.description)
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

    fn supports_update(&self) -> bool {
        self.updatable
    }
}

/// Every non-polymorphic resource codec
pub fn codecs() -> Vec<Arc<dyn RecordCodec>> {
    vec![
        Arc::new(TAG),
        Arc::new(ROOT_FOLDER),
        Arc::new(REMOTE_PATH_MAPPING),
        Arc::new(IMPORT_LIST_EXCLUSION),
        Arc::new(DELAY_PROFILE),
        Arc::new(RESTRICTION),
        Arc::new(quality_profile::QualityProfile),
        Arc::new(movie::Movie),
        Arc::new(custom_format::CustomFormat),
        Arc::new(auto_tag::AutoTag),
    ]
}

pub const TAG: Flat = Flat {
    type_name: "radarr_tag",
    path: paths::TAG,
    description: "Tag",
    attributes: || vec![attr("label", AttributeType::String).required()],
    updatable: true,
};

pub const ROOT_FOLDER: Flat = Flat {
    type_name: "radarr_root_folder",
    path: paths::ROOT_FOLDER,
    description: "Root folder",
    attributes: || {
        vec![
            attr("path", AttributeType::String).required(),
            attr("accessible", AttributeType::Bool).computed(),
            attr("free_space", AttributeType::Int).computed(),
            attr(
                "unmapped_folders",
                AttributeType::List(Box::new(AttributeType::Object(vec![
                    attr("name", AttributeType::String),
                    attr("path", AttributeType::String),
                ]))),
            )
            .computed(),
        ]
    },
    updatable: false,
};

pub const REMOTE_PATH_MAPPING: Flat = Flat {
    type_name: "radarr_remote_path_mapping",
    path: paths::REMOTE_PATH_MAPPING,
    description: "Remote path mapping",
    attributes: || {
        vec![
            attr("host", AttributeType::String).required(),
            attr("remote_path", AttributeType::String).required(),
            attr("local_path", AttributeType::String).required(),
        ]
    },
    updatable: true,
};

pub const IMPORT_LIST_EXCLUSION: Flat = Flat {
    type_name: "radarr_import_list_exclusion",
    path: paths::IMPORT_LIST_EXCLUSION,
    description: "Import list exclusion",
    attributes: || {
        vec![
            attr("tmdb_id", AttributeType::Int).required(),
            AttributeSchema::new("title", AttributeType::String)
                .required()
                .with_provider_name("movieTitle"),
            AttributeSchema::new("year", AttributeType::Int)
                .required()
                .with_provider_name("movieYear"),
        ]
    },
    updatable: true,
};

pub const DELAY_PROFILE: Flat = Flat {
    type_name: "radarr_delay_profile",
    path: paths::DELAY_PROFILE,
    description: "Delay profile",
    attributes: || {
        vec![
            attr("enable_usenet", AttributeType::Bool).optional_computed(),
            attr("enable_torrent", AttributeType::Bool).optional_computed(),
            attr(
                "preferred_protocol",
                types::enumeration(&["usenet", "torrent"]),
            )
            .optional_computed(),
            attr("usenet_delay", AttributeType::Int).optional_computed(),
            attr("torrent_delay", AttributeType::Int).optional_computed(),
            attr("bypass_if_highest_quality", AttributeType::Bool).optional_computed(),
            attr("bypass_if_above_custom_format_score", AttributeType::Bool).optional_computed(),
            attr("minimum_custom_format_score", AttributeType::Int).optional_computed(),
            attr("order", AttributeType::Int).optional_computed(),
            attr("tags", types::int_set()).required(),
        ]
    },
    updatable: true,
};

pub const RESTRICTION: Flat = Flat {
    type_name: "radarr_restriction",
    path: paths::RESTRICTION,
    description: "Release restriction",
    attributes: || {
        vec![
            attr("required", AttributeType::String).optional_computed(),
            attr("ignored", AttributeType::String).optional_computed(),
            attr("tags", types::int_set()).optional_computed(),
        ]
    },
    updatable: true,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use radarr_core::resource::Value;
    use serde_json::json;

    #[test]
    fn exclusion_uses_service_keys() {
        let mut attrs = Attributes::new();
        attrs.insert("tmdb_id".into(), Value::Int(603));
        attrs.insert("title".into(), Value::String("The Matrix".into()));
        attrs.insert("year".into(), Value::Int(1999));
        let body = IMPORT_LIST_EXCLUSION
            .to_request(&attrs, &mut Diagnostics::new())
            .unwrap();
        assert_eq!(
            body,
            json!({"tmdbId": 603, "movieTitle": "The Matrix", "movieYear": 1999})
        );
    }

    #[test]
    fn root_folder_reads_nested_unmapped_folders() {
        let attrs = ROOT_FOLDER
            .from_response(
                &json!({
                    "id": 2,
                    "path": "/movies",
                    "accessible": true,
                    "freeSpace": 1024,
                    "unmappedFolders": [{"name": "Alien", "path": "/movies/Alien", "relativePath": "Alien"}]
                }),
                &mut Diagnostics::new(),
            )
            .unwrap();
        assert_eq!(attrs.get("free_space"), Some(&Value::Int(1024)));
        let folders = attrs.get("unmapped_folders").and_then(Value::as_list).unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(
            folders[0].as_map().and_then(|m| m.get("name")),
            Some(&Value::String("Alien".into()))
        );
        assert!(!ROOT_FOLDER.supports_update());
    }

    #[test]
    fn every_codec_has_a_distinct_type() {
        let mut names: Vec<String> = codecs().iter().map(|c| c.type_name()).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
