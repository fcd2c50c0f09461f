//! Data sources
//!
//! - [`Finder`] lists a collection and selects the first record whose natural
//!   key equals the configured value
//! - [`Lister`] returns a whole collection
//! - [`SingletonSource`] and [`SystemStatusSource`] read a single object
//! - [`ConditionSource`] performs no I/O: it projects its input through the
//!   envelope kernel so custom formats and auto tags can reference the result

use std::sync::Arc;

use async_trait::async_trait;
use radarr_client::{RadarrClient, paths};
use radarr_core::provider::{Context, Diagnostics, ProviderError, ProviderResult};
use radarr_core::resource::{Attributes, Resource, State, Value};
use radarr_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use tracing::warn;

use crate::envelope::{Projection, Shape};
use crate::harness::{RecordCodec, SINGLETON_ID, validated_plan};
use crate::mapping::{self, attr};
use crate::resources;
use crate::singletons::{self, Singleton};
use crate::utils::{hash_json, structural_hash};
use crate::variants;

#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> String;

    fn schema(&self) -> ResourceSchema;

    async fn read(
        &self,
        ctx: &Context,
        client: &RadarrClient,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State>;
}

/// Copy of a resource schema where only `key` is user-supplied
fn lookup_schema(schema: ResourceSchema, key: Option<&str>) -> ResourceSchema {
    let attributes = schema.attributes.into_values().map(|mut attribute| {
        let is_key = key == Some(attribute.name.as_str());
        attribute.required = is_key;
        attribute.optional = false;
        attribute.computed = !is_key;
        attribute.default = None;
        attribute
    });
    let mut lookup = ResourceSchema::new(schema.resource_type).attributes(attributes);
    lookup.description = schema.description;
    lookup
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

/// Select one record of a collection by natural key
pub struct Finder {
    codec: Arc<dyn RecordCodec>,
    key: &'static str,
    /// Key as shown in messages (e.g., "TMDB ID")
    label: &'static str,
}

impl Finder {
    pub fn new(codec: Arc<dyn RecordCodec>, key: &'static str, label: &'static str) -> Self {
        Self { codec, key, label }
    }
}

#[async_trait]
impl DataSource for Finder {
    fn type_name(&self) -> String {
        self.codec.type_name()
    }

    fn schema(&self) -> ResourceSchema {
        lookup_schema(self.codec.schema(), Some(self.key))
    }

    async fn read(
        &self,
        ctx: &Context,
        client: &RadarrClient,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let type_name = self.type_name();
        let config_attrs = validated_plan(&self.schema(), &config.attributes)?;
        let wanted = config_attrs
            .get(self.key)
            .filter(|v| !v.is_unknown())
            .ok_or_else(|| {
                ProviderError::data_source(format!("{} lookup requires '{}'", type_name, self.key))
            })?;

        let records: Vec<serde_json::Value> = client
            .list(ctx, self.codec.path())
            .await
            .map_err(|e| ProviderError::client("list", &type_name, e))?;

        for record in &records {
            let attributes = match self.codec.from_response(record, diags) {
                Ok(attributes) => attributes,
                Err(err) => {
                    warn!(data_source = %type_name, "skipping malformed record: {}", err.message);
                    diags.warn(format!("Malformed {}", type_name), err.message);
                    continue;
                }
            };
            if attributes.get(self.key) != Some(wanted) {
                continue;
            }

            let mut attributes = attributes;
            self.codec.schema().normalize(&mut attributes);
            let identifier = attributes.get("id").and_then(Value::as_int);
            let state = State::existing(config.id.clone(), attributes);
            return Ok(match identifier {
                Some(id) => state.with_identifier(id.to_string()),
                None => state,
            });
        }

        Err(ProviderError::data_source(format!(
            "Unable to find {}, got error: data source not found: no {} with {} '{}'",
            type_name,
            type_name,
            self.label,
            display(wanted)
        )))
    }
}

/// Every record of a collection
pub struct Lister {
    codec: Arc<dyn RecordCodec>,
    type_name: &'static str,
    attribute: &'static str,
}

impl Lister {
    pub fn new(
        codec: Arc<dyn RecordCodec>,
        type_name: &'static str,
        attribute: &'static str,
    ) -> Self {
        Self {
            codec,
            type_name,
            attribute,
        }
    }
}

#[async_trait]
impl DataSource for Lister {
    fn type_name(&self) -> String {
        self.type_name.to_string()
    }

    fn schema(&self) -> ResourceSchema {
        let element = lookup_schema(self.codec.schema(), None);
        ResourceSchema::new(self.type_name)
            .attribute(attr("id", AttributeType::Int).computed())
            .attribute(
                AttributeSchema::new(
                    self.attribute,
                    AttributeType::List(Box::new(AttributeType::Object(
                        element.attributes.into_values().collect(),
                    ))),
                )
                .computed(),
            )
            .with_description(format!("Every {}", self.codec.type_name()))
    }

    async fn read(
        &self,
        ctx: &Context,
        client: &RadarrClient,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let records: Vec<serde_json::Value> = client
            .list(ctx, self.codec.path())
            .await
            .map_err(|e| ProviderError::client("list", self.type_name, e))?;

        let element_schema = self.codec.schema();
        let mut items = Vec::with_capacity(records.len());
        for record in &records {
            match self.codec.from_response(record, diags) {
                Ok(mut attributes) => {
                    element_schema.normalize(&mut attributes);
                    items.push(Value::Map(attributes));
                }
                Err(err) => {
                    warn!(data_source = self.type_name, "skipping malformed record: {}", err.message);
                    diags.warn(format!("Malformed {}", self.codec.type_name()), err.message);
                }
            }
        }

        let id = hash_json(&serde_json::Value::Array(records));
        let mut attributes = Attributes::new();
        attributes.insert("id".to_string(), Value::Int(id));
        attributes.insert(self.attribute.to_string(), Value::List(items));
        Ok(State::existing(config.id.clone(), attributes).with_identifier(id.to_string()))
    }
}

/// Current value of a configuration singleton
pub struct SingletonSource {
    singleton: Singleton,
}

#[async_trait]
impl DataSource for SingletonSource {
    fn type_name(&self) -> String {
        self.singleton.type_name.to_string()
    }

    fn schema(&self) -> ResourceSchema {
        lookup_schema(self.singleton.schema(), None)
    }

    async fn read(
        &self,
        ctx: &Context,
        client: &RadarrClient,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let body: serde_json::Value = client
            .get_object(ctx, self.singleton.path)
            .await
            .map_err(|e| ProviderError::client("read", self.singleton.type_name, e))?;
        let mut attributes = self.singleton.from_response(&body, diags)?;
        attributes.insert("id".to_string(), Value::Int(SINGLETON_ID));
        self.singleton.schema().normalize(&mut attributes);
        Ok(State::existing(config.id.clone(), attributes).with_identifier(SINGLETON_ID.to_string()))
    }
}

/// `radarr_system_status`
pub struct SystemStatusSource;

const SYSTEM_STATUS: &str = "radarr_system_status";

#[async_trait]
impl DataSource for SystemStatusSource {
    fn type_name(&self) -> String {
        SYSTEM_STATUS.to_string()
    }

    fn schema(&self) -> ResourceSchema {
        let strings = [
            "app_name",
            "instance_name",
            "version",
            "build_time",
            "start_time",
            "os_name",
            "os_version",
            "branch",
            "authentication",
            "url_base",
            "runtime_name",
            "runtime_version",
            "database_type",
            "database_version",
            "package_version",
            "mode",
        ];
        let bools = [
            "is_debug",
            "is_production",
            "is_admin",
            "is_user_interactive",
            "is_net_core",
            "is_linux",
            "is_osx",
            "is_windows",
            "is_docker",
        ];
        ResourceSchema::new(SYSTEM_STATUS)
            .attribute(attr("id", AttributeType::Int).computed())
            .attributes(
                strings
                    .iter()
                    .map(|name| attr(name, AttributeType::String).computed()),
            )
            .attributes(bools.iter().map(|name| attr(name, AttributeType::Bool).computed()))
            .attribute(attr("migration_version", AttributeType::Int).computed())
            .with_description("Service version and runtime information")
    }

    async fn read(
        &self,
        ctx: &Context,
        client: &RadarrClient,
        config: &Resource,
        _diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let body: serde_json::Value = client
            .get_object(ctx, paths::SYSTEM_STATUS)
            .await
            .map_err(|e| ProviderError::client("read", SYSTEM_STATUS, e))?;
        let mut attributes = mapping::from_json(&self.schema(), &body);
        attributes.insert("id".to_string(), Value::Int(SINGLETON_ID));
        Ok(State::existing(config.id.clone(), attributes).with_identifier(SINGLETON_ID.to_string()))
    }
}

/// Condition pseudo data source; `id` is a structural hash of the input
pub struct ConditionSource {
    projection: Projection,
}

impl ConditionSource {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    /// Project the input without touching the service
    pub fn evaluate(&self, config: &Resource, diags: &mut Diagnostics) -> ProviderResult<State> {
        let input = validated_plan(&self.schema(), &config.attributes)?;
        let envelope = self.projection.read(&input, diags)?;
        let mut attributes = self.projection.write(&envelope, diags)?;

        let id = structural_hash(&config.attributes);
        attributes.insert("id".to_string(), Value::Int(id));
        attributes.insert(
            "implementation".to_string(),
            Value::String(envelope.implementation),
        );
        self.schema().normalize(&mut attributes);
        Ok(State::existing(config.id.clone(), attributes).with_identifier(id.to_string()))
    }
}

#[async_trait]
impl DataSource for ConditionSource {
    fn type_name(&self) -> String {
        self.projection.resource_type()
    }

    fn schema(&self) -> ResourceSchema {
        let schema = self.projection.schema();
        match self.projection.shape {
            Shape::Typed(_) => schema.attribute(
                AttributeSchema::new("implementation", AttributeType::String)
                    .computed()
                    .with_provider_name("implementation"),
            ),
            Shape::Generic => schema,
        }
    }

    async fn read(
        &self,
        _ctx: &Context,
        _client: &RadarrClient,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        self.evaluate(config, diags)
    }
}

fn shared(codec: impl RecordCodec + 'static) -> Arc<dyn RecordCodec> {
    Arc::new(codec)
}

/// Every data source this provider offers
pub fn data_sources() -> Vec<Box<dyn DataSource>> {
    let mut sources: Vec<Box<dyn DataSource>> = Vec::new();

    let plural = [
        ("radarr_indexers", "indexers"),
        ("radarr_download_clients", "download_clients"),
        ("radarr_notifications", "notifications"),
        ("radarr_import_lists", "import_lists"),
        ("radarr_metadata_consumers", "metadata_consumers"),
    ];
    for (family, (list_type, list_attribute)) in variants::managed().iter().zip(plural) {
        let codec: Arc<dyn RecordCodec> = Arc::new(Projection::generic(family.category));
        sources.push(Box::new(Finder::new(codec.clone(), "name", "name")));
        sources.push(Box::new(Lister::new(codec, list_type, list_attribute)));
    }

    let flat = [
        (shared(resources::TAG), "label", "label", "radarr_tags", "tags"),
        (shared(resources::ROOT_FOLDER), "path", "path", "radarr_root_folders", "root_folders"),
        (
            shared(resources::REMOTE_PATH_MAPPING),
            "id",
            "ID",
            "radarr_remote_path_mappings",
            "remote_path_mappings",
        ),
        (
            shared(resources::IMPORT_LIST_EXCLUSION),
            "tmdb_id",
            "TMDB ID",
            "radarr_import_list_exclusions",
            "import_list_exclusions",
        ),
        (shared(resources::DELAY_PROFILE), "id", "ID", "radarr_delay_profiles", "delay_profiles"),
        (shared(resources::RESTRICTION), "id", "ID", "radarr_restrictions", "restrictions"),
        (
            shared(resources::quality_profile::QualityProfile),
            "name",
            "name",
            "radarr_quality_profiles",
            "quality_profiles",
        ),
        (shared(resources::movie::Movie), "tmdb_id", "TMDB ID", "radarr_movies", "movies"),
        (
            shared(resources::custom_format::CustomFormat),
            "name",
            "name",
            "radarr_custom_formats",
            "custom_formats",
        ),
        (shared(resources::auto_tag::AutoTag), "name", "name", "radarr_auto_tags", "auto_tags"),
    ];
    for (codec, key, label, list_type, list_attribute) in flat {
        sources.push(Box::new(Finder::new(codec.clone(), key, label)));
        sources.push(Box::new(Lister::new(codec, list_type, list_attribute)));
    }

    for singleton in singletons::singletons() {
        sources.push(Box::new(SingletonSource { singleton }));
    }
    sources.push(Box::new(SystemStatusSource));

    for family in variants::embedded() {
        for projection in family.projections() {
            sources.push(Box::new(ConditionSource::new(projection)));
        }
    }
    sources
}
