//! Configuration singletons
//!
//! Each of these exists exactly once per service instance, always as id 1.

use radarr_client::paths;
use radarr_core::provider::{Diagnostics, ProviderResult};
use radarr_core::resource::Attributes;
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::harness::{Addressing, RecordCodec};
use crate::mapping::{self, attr};

/// A singleton configuration record with a flat schema
#[derive(Debug, Clone, Copy)]
pub struct Singleton {
    pub type_name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub attributes: fn() -> Vec<AttributeSchema>,
}

impl RecordCodec for Singleton {
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

    fn addressing(&self) -> Addressing {
        Addressing::Singleton
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
}

pub fn singletons() -> Vec<Singleton> {
    vec![
        NAMING,
        MEDIA_MANAGEMENT,
        INDEXER_CONFIG,
        METADATA_CONFIG,
        IMPORT_LIST_CONFIG,
        HOST,
    ]
}

pub const NAMING: Singleton = Singleton {
    type_name: "radarr_naming_config",
    path: paths::NAMING_CONFIG,
    description: "Movie and folder naming",
    attributes: naming_attributes,
};

fn naming_attributes() -> Vec<AttributeSchema> {
    vec![
        attr("rename_movies", AttributeType::Bool).required(),
        attr("replace_illegal_characters", AttributeType::Bool).required(),
        attr(
            "colon_replacement_format",
            types::enumeration(&["delete", "dash", "spaceDash", "spaceDashSpace", "smart"]),
        )
        .optional_computed(),
        attr("standard_movie_format", AttributeType::String).required(),
        attr("movie_folder_format", AttributeType::String).required(),
    ]
}

pub const MEDIA_MANAGEMENT: Singleton = Singleton {
    type_name: "radarr_media_management",
    path: paths::MEDIA_MANAGEMENT_CONFIG,
    description: "Media management options",
    attributes: media_management_attributes,
};

fn media_management_attributes() -> Vec<AttributeSchema> {
    let bools = [
        "auto_unmonitor_previously_downloaded_movies",
        "create_empty_movie_folders",
        "delete_empty_folders",
        "auto_rename_folders",
        "paths_default_static",
        "set_permissions_linux",
        "skip_free_space_check_when_importing",
        "copy_using_hardlinks",
        "use_script_import",
        "import_extra_files",
        "enable_media_info",
    ];
    let strings = [
        "recycle_bin",
        "chmod_folder",
        "chown_group",
        "script_import_path",
        "extra_file_extensions",
    ];

    let mut attributes: Vec<AttributeSchema> = bools
        .iter()
        .map(|name| attr(name, AttributeType::Bool).optional_computed())
        .chain(
            strings
                .iter()
                .map(|name| attr(name, AttributeType::String).optional_computed()),
        )
        .collect();
    attributes.extend([
        attr("recycle_bin_cleanup_days", AttributeType::Int).optional_computed(),
        attr("minimum_free_space_when_importing", AttributeType::Int).optional_computed(),
        attr(
            "download_propers_and_repacks",
            types::enumeration(&["preferAndUpgrade", "doNotUpgrade", "doNotPrefer"]),
        )
        .optional_computed(),
        attr("file_date", types::enumeration(&["none", "cinemas", "release"])).optional_computed(),
        attr(
            "rescan_after_refresh",
            types::enumeration(&["always", "afterManual", "never"]),
        )
        .optional_computed(),
    ]);
    attributes
}

pub const INDEXER_CONFIG: Singleton = Singleton {
    type_name: "radarr_indexer_config",
    path: paths::INDEXER_CONFIG,
    description: "Indexer-wide options",
    attributes: indexer_config_attributes,
};

fn indexer_config_attributes() -> Vec<AttributeSchema> {
    vec![
        attr("minimum_age", AttributeType::Int).optional_computed(),
        attr("retention", AttributeType::Int).optional_computed(),
        attr("maximum_size", AttributeType::Int).optional_computed(),
        attr("rss_sync_interval", AttributeType::Int).optional_computed(),
        attr("availability_delay", AttributeType::Int).optional_computed(),
        attr("prefer_indexer_flags", AttributeType::Bool).optional_computed(),
        attr("allow_hardcoded_subs", AttributeType::Bool).optional_computed(),
        attr("whitelisted_hardcoded_subs", AttributeType::String).optional_computed(),
    ]
}

pub const METADATA_CONFIG: Singleton = Singleton {
    type_name: "radarr_metadata_config",
    path: paths::METADATA_CONFIG,
    description: "Metadata options",
    attributes: metadata_config_attributes,
};

fn metadata_config_attributes() -> Vec<AttributeSchema> {
    vec![attr("certification_country", AttributeType::String).required()]
}

pub const IMPORT_LIST_CONFIG: Singleton = Singleton {
    type_name: "radarr_import_list_config",
    path: paths::IMPORT_LIST_CONFIG,
    description: "Import list synchronisation options",
    attributes: import_list_config_attributes,
};

fn import_list_config_attributes() -> Vec<AttributeSchema> {
    vec![
        attr(
            "list_sync_level",
            types::enumeration(&["disabled", "logOnly", "keepAndUnmonitor", "keepAndTag"]),
        )
        .required(),
        attr("list_sync_tag", AttributeType::Int).optional_computed(),
    ]
}

pub const HOST: Singleton = Singleton {
    type_name: "radarr_host",
    path: paths::HOST_CONFIG,
    description: "Host, security, proxy, update and backup settings",
    attributes: host_attributes,
};

fn host_attributes() -> Vec<AttributeSchema> {
    let strings = [
        "bind_address",
        "url_base",
        "instance_name",
        "application_url",
        "username",
        "log_level",
        "console_log_level",
        "branch",
        "update_mechanism",
        "update_script_path",
        "proxy_type",
        "proxy_hostname",
        "proxy_username",
        "proxy_bypass_filter",
        "certificate_validation",
        "backup_folder",
        "ssl_cert_path",
    ];
    let bools = [
        "enable_ssl",
        "launch_browser",
        "analytics_enabled",
        "update_automatically",
        "proxy_enabled",
        "proxy_bypass_local_addresses",
    ];

    let mut attributes: Vec<AttributeSchema> = strings
        .iter()
        .map(|name| attr(name, AttributeType::String).optional_computed())
        .chain(
            bools
                .iter()
                .map(|name| attr(name, AttributeType::Bool).optional_computed()),
        )
        .collect();
    attributes.extend([
        attr("port", types::port()).optional_computed(),
        attr("ssl_port", types::port()).optional_computed(),
        attr("proxy_port", AttributeType::Int).optional_computed(),
        attr("backup_interval", AttributeType::Int).optional_computed(),
        attr("backup_retention", AttributeType::Int).optional_computed(),
        attr(
            "authentication_method",
            types::enumeration(&["none", "basic", "forms", "external"]),
        )
        .required(),
        attr(
            "authentication_required",
            types::enumeration(&["enabled", "disabledForLocalAddresses"]),
        )
        .optional_computed(),
        attr("password", AttributeType::String)
            .optional_computed()
            .sensitive(),
        attr("proxy_password", AttributeType::String)
            .optional_computed()
            .sensitive(),
        attr("ssl_cert_password", AttributeType::String)
            .optional_computed()
            .sensitive(),
        attr("api_key", AttributeType::String).computed().sensitive(),
    ]);
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use radarr_core::resource::Value;
    use serde_json::json;

    #[test]
    fn singleton_type_names_are_unique() {
        let mut names: Vec<&str> = singletons().iter().map(|s| s.type_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), singletons().len());
    }

    #[test]
    fn naming_maps_camel_case_keys() {
        let attrs = NAMING
            .from_response(
                &json!({
                    "id": 1,
                    "renameMovies": true,
                    "replaceIllegalCharacters": true,
                    "colonReplacementFormat": "dash",
                    "standardMovieFormat": "{Movie Title} ({Release Year})",
                    "movieFolderFormat": "{Movie Title}",
                    "includeQuality": false
                }),
                &mut Diagnostics::new(),
            )
            .unwrap();
        assert_eq!(attrs.get("id"), Some(&Value::Int(1)));
        assert_eq!(attrs.get("rename_movies"), Some(&Value::Bool(true)));
        assert_eq!(
            attrs.get("colon_replacement_format"),
            Some(&Value::String("dash".into()))
        );
        assert!(!attrs.contains_key("include_quality"));
    }

    #[test]
    fn host_secrets_are_sensitive() {
        assert_eq!(
            HOST.schema().sensitive_attributes(),
            vec!["api_key", "password", "proxy_password", "ssl_cert_password"]
        );
    }

    #[test]
    fn host_api_key_is_never_sent() {
        let mut attrs = Attributes::new();
        attrs.insert("api_key".into(), Value::String("k".into()));
        attrs.insert("port".into(), Value::Int(7878));
        let body = HOST.to_request(&attrs, &mut Diagnostics::new()).unwrap();
        assert_eq!(body, json!({"port": 7878}));
    }
}
