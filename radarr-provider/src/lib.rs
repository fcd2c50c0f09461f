//! Radarr Provider
//!
//! Manages a Radarr instance's configuration through its v3 HTTP API.
//!
//! ## Module Structure
//!
//! - `fields` - Field codec between attributes and the `[{name, value}]` bag
//! - `envelope` - Envelope kernel shared by every polymorphic object
//! - `variants` - One table row per concrete implementation
//! - `harness` - Create/read/update/delete/import lifecycle
//! - `mapping` - Schema-driven JSON mapping for flat records
//! - `singletons` - Configuration objects addressed as id 1
//! - `resources` - Non-polymorphic resources (tags, movies, profiles, ...)
//! - `data_sources` - Lookups, lists and condition pseudo data sources
//! - `registry` - Type name to implementation lookup
//! - `config` - Provider block and environment fallback
//! - `provider` - RadarrProvider implementation
//! - `utils` - Name conversion, hashing and secret helpers

pub mod config;
pub mod data_sources;
pub mod envelope;
pub mod fields;
pub mod harness;
pub mod mapping;
pub mod provider;
pub mod registry;
pub mod resources;
pub mod singletons;
pub mod utils;
pub mod variants;

// Re-export main types
pub use config::ProviderConfig;
pub use provider::{RadarrProvider, RegisteredType};

use async_trait::async_trait;
use radarr_core::provider::{Context, Diagnostics, Provider, ResourceType};
use radarr_core::resource::{Resource, ResourceId, State};

// =============================================================================
// Provider Trait Implementation
// =============================================================================

#[async_trait]
impl Provider for RadarrProvider {
    fn name(&self) -> &'static str {
        "radarr"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        self.registry()
            .resources()
            .map(|harness| {
                Box::new(RegisteredType::new(harness.type_name(), harness.schema()))
                    as Box<dyn ResourceType>
            })
            .collect()
    }

    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
        self.registry()
            .data_sources()
            .map(|source| {
                Box::new(RegisteredType::new(source.type_name(), source.schema()))
                    as Box<dyn ResourceType>
            })
            .collect()
    }

    async fn create(
        &self,
        ctx: &Context,
        resource: &Resource,
        diags: &mut Diagnostics,
    ) -> Option<State> {
        let result = self
            .create_resource(ctx, resource, diags)
            .await
            .map_err(|e| e.for_resource(resource.id.clone()));
        diags.capture(result)
    }

    async fn read(&self, ctx: &Context, prior: &State, diags: &mut Diagnostics) -> Option<State> {
        let result = self
            .read_resource(ctx, prior, diags)
            .await
            .map_err(|e| e.for_resource(prior.id.clone()));
        diags.capture(result)
    }

    async fn update(
        &self,
        ctx: &Context,
        prior: &State,
        to: &Resource,
        diags: &mut Diagnostics,
    ) -> Option<State> {
        let result = self
            .update_resource(ctx, prior, to, diags)
            .await
            .map_err(|e| e.for_resource(to.id.clone()));
        diags.capture(result)
    }

    async fn delete(&self, ctx: &Context, prior: &State, diags: &mut Diagnostics) -> Option<()> {
        let result = self
            .delete_resource(ctx, prior)
            .await
            .map_err(|e| e.for_resource(prior.id.clone()));
        diags.capture(result)
    }

    fn import(&self, id: &ResourceId, key: &str, diags: &mut Diagnostics) -> Option<State> {
        let result = self
            .import_resource(id, key)
            .map_err(|e| e.for_resource(id.clone()));
        diags.capture(result)
    }

    async fn read_data_source(
        &self,
        ctx: &Context,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> Option<State> {
        let result = self
            .read_data_source_config(ctx, config, diags)
            .await
            .map_err(|e| e.for_resource(config.id.clone()));
        diags.capture(result)
    }
}
