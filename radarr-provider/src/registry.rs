//! Type name to implementation lookup

use std::collections::BTreeMap;
use std::sync::Arc;

use radarr_client::RadarrClient;

use crate::data_sources::{self, DataSource};
use crate::harness::{Harness, RecordCodec};
use crate::resources;
use crate::singletons;
use crate::variants;

/// Every resource and data source, keyed by type name
pub struct Registry {
    resources: BTreeMap<String, Harness>,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl Registry {
    pub fn new(client: RadarrClient) -> Self {
        let mut codecs: Vec<Arc<dyn RecordCodec>> = Vec::new();
        for family in variants::managed() {
            codecs.extend(
                family
                    .projections()
                    .into_iter()
                    .map(|projection| Arc::new(projection) as Arc<dyn RecordCodec>),
            );
        }
        codecs.extend(resources::codecs());
        codecs.extend(
            singletons::singletons()
                .into_iter()
                .map(|singleton| Arc::new(singleton) as Arc<dyn RecordCodec>),
        );

        let resources = codecs
            .into_iter()
            .map(|codec| (codec.type_name(), Harness::new(codec, client.clone())))
            .collect();
        let data_sources = data_sources::data_sources()
            .into_iter()
            .map(|source| (source.type_name(), source))
            .collect();

        Self {
            resources,
            data_sources,
        }
    }

    pub fn resource(&self, type_name: &str) -> Option<&Harness> {
        self.resources.get(type_name)
    }

    pub fn data_source(&self, type_name: &str) -> Option<&dyn DataSource> {
        self.data_sources.get(type_name).map(|source| &**source)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Harness> {
        self.resources.values()
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &dyn DataSource> {
        self.data_sources.values().map(|source| &**source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radarr_client::AuthContext;

    fn registry() -> Registry {
        let client = RadarrClient::new(AuthContext::new("http://localhost:7878", "key")).unwrap();
        Registry::new(client)
    }

    #[test]
    fn every_category_has_typed_and_generic_resources() {
        let registry = registry();
        for name in [
            "radarr_indexer",
            "radarr_indexer_newznab",
            "radarr_download_client_transmission",
            "radarr_notification_discord",
            "radarr_import_list_tmdb_popular",
            "radarr_metadata_kodi",
            "radarr_naming_config",
            "radarr_movie",
            "radarr_quality_profile",
        ] {
            assert!(registry.resource(name).is_some(), "missing resource {}", name);
        }
    }

    #[test]
    fn conditions_are_data_sources_only() {
        let registry = registry();
        assert!(registry.resource("radarr_custom_format_condition_size").is_none());
        assert!(registry.data_source("radarr_custom_format_condition_size").is_some());
    }

    #[test]
    fn type_names_are_not_registered_twice() {
        let codecs: usize = variants::managed()
            .iter()
            .map(|family| family.variants.len() + 1)
            .sum::<usize>()
            + resources::codecs().len()
            + singletons::singletons().len();
        assert_eq!(registry().resources().count(), codecs);
    }
}
