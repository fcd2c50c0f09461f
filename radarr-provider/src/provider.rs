//! Radarr provider implementation
//!
//! Resolves a resource type to its lifecycle harness or data source and runs
//! the operation against the configured client.

use radarr_client::RadarrClient;
use radarr_core::provider::{
    Context, Diagnostics, ProviderError, ProviderResult, ResourceType,
};
use radarr_core::resource::{Attributes, Resource, ResourceId, State};
use radarr_core::schema::ResourceSchema;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::data_sources::DataSource;
use crate::harness::Harness;
use crate::registry::Registry;

/// Radarr Provider
pub struct RadarrProvider {
    client: RadarrClient,
    registry: Registry,
}

impl RadarrProvider {
    /// Create a provider around an already configured client
    pub fn new(client: RadarrClient) -> Self {
        let registry = Registry::new(client.clone());
        Self { client, registry }
    }

    /// Resolve the provider block and check that the service accepts the key
    pub async fn configure(
        attributes: &Attributes,
        ctx: &Context,
        diags: &mut Diagnostics,
    ) -> Option<Self> {
        diags.capture(Self::try_configure(attributes, ctx).await)
    }

    async fn try_configure(attributes: &Attributes, ctx: &Context) -> ProviderResult<Self> {
        let config = ProviderConfig::from_attributes(attributes)?;
        let client = RadarrClient::new(config.auth()).map_err(|e| {
            ProviderError::configuration("Unable to create Radarr client").with_cause(e)
        })?;
        let status = client
            .system_status(ctx)
            .await
            .map_err(|e| ProviderError::client("read", "radarr_system_status", e))?;
        info!(
            url = %config.url,
            version = %status.version,
            instance = %status.instance_name,
            "configured Radarr provider"
        );
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &RadarrClient {
        &self.client
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn harness(&self, resource_type: &str) -> ProviderResult<&Harness> {
        self.registry.resource(resource_type).ok_or_else(|| {
            ProviderError::internal(format!("unknown resource type: {}", resource_type))
        })
    }

    fn source(&self, data_source_type: &str) -> ProviderResult<&dyn DataSource> {
        self.registry.data_source(data_source_type).ok_or_else(|| {
            ProviderError::internal(format!("unknown data source: {}", data_source_type))
        })
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    pub async fn create_resource(
        &self,
        ctx: &Context,
        resource: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        debug!(resource = %resource.id, "create");
        self.harness(&resource.id.resource_type)?
            .create(ctx, resource, diags)
            .await
    }

    pub async fn read_resource(
        &self,
        ctx: &Context,
        prior: &State,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        debug!(resource = %prior.id, "read");
        self.harness(&prior.id.resource_type)?
            .read(ctx, prior, diags)
            .await
    }

    pub async fn update_resource(
        &self,
        ctx: &Context,
        prior: &State,
        to: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        debug!(resource = %to.id, "update");
        self.harness(&to.id.resource_type)?
            .update(ctx, prior, to, diags)
            .await
    }

    pub async fn delete_resource(&self, ctx: &Context, prior: &State) -> ProviderResult<()> {
        debug!(resource = %prior.id, "delete");
        self.harness(&prior.id.resource_type)?.delete(ctx, prior).await
    }

    pub fn import_resource(&self, id: &ResourceId, key: &str) -> ProviderResult<State> {
        self.harness(&id.resource_type)?.import(id, key)
    }

    pub async fn read_data_source_config(
        &self,
        ctx: &Context,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        debug!(data_source = %config.id, "read");
        self.source(&config.id.resource_type)?
            .read(ctx, &self.client, config, diags)
            .await
    }
}

/// A registered type name with its schema
pub struct RegisteredType {
    name: String,
    schema: ResourceSchema,
}

impl RegisteredType {
    pub fn new(name: String, schema: ResourceSchema) -> Self {
        Self { name, schema }
    }
}

impl ResourceType for RegisteredType {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }
}
