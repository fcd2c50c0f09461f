//! Resource lifecycle harness
//!
//! Binds a [`RecordCodec`] (how one record type maps to the service's JSON)
//! to the engine's create/read/update/delete/import contract:
//!
//! - the numeric id is assigned on create and copied from prior state into
//!   every update request
//! - sensitive attributes the service masks are carried over from the plan or
//!   the prior state
//! - singletons are always addressed as id 1 and delete only detaches them
//!   from state

use std::sync::Arc;

use radarr_client::RadarrClient;
use radarr_core::provider::{
    Context, Diagnostic, Diagnostics, ErrorKind, ProviderError, ProviderResult, Severity,
};
use radarr_core::resource::{Attributes, Resource, ResourceId, State, Value};
use radarr_core::schema::ResourceSchema;
use tracing::{trace, warn};

use crate::utils::is_secret_placeholder;

/// Id every singleton is addressed by
pub const SINGLETON_ID: i64 = 1;

/// How records of a type are addressed on the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `POST <path>`, `GET/PUT/DELETE <path>/<id>`
    Collection,
    /// `GET <path>`, `PUT <path>/1`
    Singleton,
}

/// Translation between one record type's attributes and its wire object
pub trait RecordCodec: Send + Sync {
    fn type_name(&self) -> String;

    /// Collection (or singleton) endpoint
    fn path(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    fn addressing(&self) -> Addressing {
        Addressing::Collection
    }

    /// Attributes to request body
    fn to_request(
        &self,
        attributes: &Attributes,
        diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value>;

    /// Response body to attributes
    fn from_response(
        &self,
        body: &serde_json::Value,
        diags: &mut Diagnostics,
    ) -> ProviderResult<Attributes>;

    /// Body of the initial POST; defaults to [`RecordCodec::to_request`]
    fn create_request(
        &self,
        attributes: &Attributes,
        diags: &mut Diagnostics,
    ) -> ProviderResult<serde_json::Value> {
        self.to_request(attributes, diags)
    }

    fn supports_update(&self) -> bool {
        true
    }

    /// Query parameters sent with DELETE
    fn delete_query(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Lifecycle operations for one resource type
#[derive(Clone)]
pub struct Harness {
    codec: Arc<dyn RecordCodec>,
    client: RadarrClient,
}

impl Harness {
    pub fn new(codec: Arc<dyn RecordCodec>, client: RadarrClient) -> Self {
        Self { codec, client }
    }

    pub fn codec(&self) -> &Arc<dyn RecordCodec> {
        &self.codec
    }

    pub fn type_name(&self) -> String {
        self.codec.type_name()
    }

    pub fn schema(&self) -> ResourceSchema {
        self.codec.schema()
    }

    fn is_singleton(&self) -> bool {
        self.codec.addressing() == Addressing::Singleton
    }

    pub async fn create(
        &self,
        ctx: &Context,
        resource: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let type_name = self.type_name();
        let schema = self.schema();
        let plan = validated_plan(&schema, &resource.attributes)?;

        let response: serde_json::Value = if self.is_singleton() {
            let body = with_id(self.codec.to_request(&plan, diags)?, SINGLETON_ID);
            self.client
                .update(ctx, self.codec.path(), SINGLETON_ID, &body)
                .await
        } else {
            let body = self.codec.create_request(&plan, diags)?;
            self.client.create(ctx, self.codec.path(), &body).await
        }
        .map_err(|e| ProviderError::client("create", &type_name, e))?;

        let mut attributes = self.codec.from_response(&response, diags)?;
        if self.is_singleton() {
            attributes.insert("id".to_string(), Value::Int(SINGLETON_ID));
        }
        let id = match attributes.get("id").and_then(Value::as_int) {
            Some(id) if id > 0 => id,
            _ => {
                return Err(ProviderError::internal(format!(
                    "service did not assign an id to the new {}",
                    type_name
                )));
            }
        };

        write_sensitive(&schema, &mut attributes, &plan);
        schema.normalize(&mut attributes);
        Ok(State::existing(resource.id.clone(), attributes).with_identifier(id.to_string()))
    }

    /// Refresh from the service; a vanished object yields `State::not_found`
    pub async fn read(
        &self,
        ctx: &Context,
        prior: &State,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let type_name = self.type_name();
        let response: serde_json::Value = if self.is_singleton() {
            self.client.get_object(ctx, self.codec.path()).await
        } else {
            let Some(id) = state_id(prior) else {
                return Ok(State::not_found(prior.id.clone()));
            };
            self.client.get(ctx, self.codec.path(), id).await
        }
        .or_else(|e| if e.is_not_found() { Ok(serde_json::Value::Null) } else { Err(e) })
        .map_err(|e| ProviderError::client("read", &type_name, e))?;

        if response.is_null() {
            trace!(resource = %type_name, name = %prior.id.name, "object is gone, removing from state");
            return Ok(State::not_found(prior.id.clone()));
        }

        let mut attributes = match self.codec.from_response(&response, diags) {
            Ok(attributes) => attributes,
            Err(err) if err.kind == ErrorKind::ImplementationMismatch => {
                warn!(resource = %type_name, name = %prior.id.name, "{}", err.message);
                diags.push(Diagnostic {
                    severity: Severity::Warning,
                    ..Diagnostic::from(err)
                });
                return Ok(State::not_found(prior.id.clone()));
            }
            Err(err) => return Err(err),
        };
        if self.is_singleton() {
            attributes.insert("id".to_string(), Value::Int(SINGLETON_ID));
        }

        let schema = self.schema();
        write_sensitive(&schema, &mut attributes, &prior.attributes);
        schema.normalize(&mut attributes);
        let identifier = attributes
            .get("id")
            .and_then(Value::as_int)
            .map(|id| id.to_string());
        let mut state = State::existing(prior.id.clone(), attributes);
        state.identifier = identifier.or_else(|| prior.identifier.clone());
        Ok(state)
    }

    /// Update in place, keeping the prior id
    pub async fn update(
        &self,
        ctx: &Context,
        prior: &State,
        to: &Resource,
        diags: &mut Diagnostics,
    ) -> ProviderResult<State> {
        let type_name = self.type_name();
        if !self.codec.supports_update() {
            return Err(ProviderError::resource(format!(
                "{} cannot be updated in place; it must be replaced",
                type_name
            )));
        }

        let id = if self.is_singleton() {
            SINGLETON_ID
        } else {
            state_id(prior).ok_or_else(|| {
                ProviderError::internal(format!("prior {} state has no id", type_name))
            })?
        };

        let schema = self.schema();
        let mut plan = to.attributes.clone();
        plan.retain(|name, _| schema.get(name).is_none_or(|attr| !attr.is_read_only()));
        let plan = validated_plan(&schema, &plan)?;

        let body = with_id(self.codec.to_request(&plan, diags)?, id);
        let response: serde_json::Value = self
            .client
            .update(ctx, self.codec.path(), id, &body)
            .await
            .map_err(|e| ProviderError::client("update", &type_name, e))?;

        let mut attributes = self.codec.from_response(&response, diags)?;
        attributes.insert("id".to_string(), Value::Int(id));
        let mut known = prior.attributes.clone();
        known.extend(plan);
        write_sensitive(&schema, &mut attributes, &known);
        schema.normalize(&mut attributes);
        Ok(State::existing(to.id.clone(), attributes).with_identifier(id.to_string()))
    }

    /// Delete on the service; singletons are only detached from state
    pub async fn delete(&self, ctx: &Context, prior: &State) -> ProviderResult<()> {
        let type_name = self.type_name();
        if self.is_singleton() {
            trace!(resource = %type_name, name = %prior.id.name, "singleton delete only removes it from state");
            return Ok(());
        }
        let Some(id) = state_id(prior) else {
            return Ok(());
        };

        self.client
            .delete(ctx, self.codec.path(), id, self.codec.delete_query())
            .await
            .map_err(|e| ProviderError::client("delete", &type_name, e))
    }

    /// Partial state from an import key; the next read fills the rest
    pub fn import(&self, id: &ResourceId, key: &str) -> ProviderResult<State> {
        let numeric = if self.is_singleton() {
            SINGLETON_ID
        } else {
            key.trim()
                .parse::<i64>()
                .map_err(|_| ProviderError::import_identifier(key))?
        };
        let mut attributes = Attributes::new();
        attributes.insert("id".to_string(), Value::Int(numeric));
        Ok(State::existing(id.clone(), attributes).with_identifier(numeric.to_string()))
    }
}

/// Numeric id of a prior state, from its attributes or its identifier
fn state_id(state: &State) -> Option<i64> {
    state
        .numeric_id()
        .or_else(|| state.identifier.as_deref()?.parse().ok())
}

/// Set `id` on an outgoing JSON object
fn with_id(mut body: serde_json::Value, id: i64) -> serde_json::Value {
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_string(), serde_json::Value::from(id));
    }
    body
}

/// Type-check a plan against the schema and bring it into canonical form
pub(crate) fn validated_plan(schema: &ResourceSchema, attributes: &Attributes) -> ProviderResult<Attributes> {
    if let Err(errors) = schema.validate(attributes) {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(ProviderError::resource(format!(
            "invalid {} configuration: {}",
            schema.resource_type,
            details.join("; ")
        )));
    }
    let mut plan = attributes.clone();
    schema.normalize(&mut plan);
    Ok(plan)
}

/// Copy sensitive attributes from `prior` where the service returned nothing
/// usable (absent, unknown or a masked placeholder).
pub fn write_sensitive(schema: &ResourceSchema, target: &mut Attributes, prior: &Attributes) {
    for name in schema.sensitive_attributes() {
        let masked = match target.get(name) {
            None | Some(Value::Unknown) => true,
            Some(Value::String(s)) => is_secret_placeholder(s),
            Some(_) => false,
        };
        if !masked {
            continue;
        }
        match prior.get(name) {
            Some(value) if !value.is_unknown() => {
                trace!(attribute = name, "carrying sensitive value over from prior state");
                target.insert(name.to_string(), value.clone());
            }
            _ => {
                target.remove(name);
            }
        }
    }
}
