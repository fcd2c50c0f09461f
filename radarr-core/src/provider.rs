//! Provider - Trait abstracting resource operations
//!
//! A Provider translates the engine's desired-state model into calls against a
//! remote service. Every operation appends to a [`Diagnostics`] accumulator and
//! returns `None` when it appended an error.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::resource::{Resource, ResourceId, State};
use crate::schema::ResourceSchema;

/// Classification of provider failures, surfaced as diagnostic summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP/network failure or non-2xx response
    Client,
    /// Logical failure while looking up a data source (not found, ambiguous)
    DataSource,
    /// Logical failure on a managed resource
    Resource,
    /// Import key could not be parsed
    UnexpectedImportIdentifier,
    /// Service returned an object of a different implementation than expected
    ImplementationMismatch,
    /// Provider configuration is missing or invalid
    Configuration,
    /// Programming error (bad descriptor, unknown resource type, ...)
    InternalInvariant,
}

impl ErrorKind {
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorKind::Client => "Client Error",
            ErrorKind::DataSource => "Data Source Error",
            ErrorKind::Resource => "Resource Error",
            ErrorKind::UnexpectedImportIdentifier => "Unexpected Import Identifier",
            ErrorKind::ImplementationMismatch => "Implementation Mismatch",
            ErrorKind::Configuration => "Configuration Error",
            ErrorKind::InternalInvariant => "Internal Invariant Violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}.{}] {}", id.resource_type, id.name, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            resource_id: None,
            cause: None,
        }
    }

    /// Failure talking to the service: `Unable to <verb> <kind>, got error: <cause>`
    pub fn client(
        verb: &str,
        resource_type: &str,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ErrorKind::Client,
            format!("Unable to {} {}, got error: {}", verb, resource_type, cause),
        )
        .with_cause(cause)
    }

    pub fn data_source(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataSource, message)
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resource, message)
    }

    pub fn import_identifier(key: &str) -> Self {
        Self::new(
            ErrorKind::UnexpectedImportIdentifier,
            format!("Expected import identifier with format: ID. Got: {:?}", key),
        )
    }

    pub fn implementation_mismatch(expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::ImplementationMismatch,
            format!(
                "expected implementation {:?} but the service returned {:?}; \
                 the object was probably imported with the wrong resource type",
                expected, got
            ),
        )
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalInvariant, message)
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single message reported back to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub kind: Option<ErrorKind>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            kind: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            kind: None,
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        Self {
            severity: Severity::Error,
            summary: err.kind.summary().to_string(),
            detail: err.to_string(),
            kind: Some(err.kind),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}: {}", level, self.summary, self.detail)
    }
}

/// Accumulator of diagnostics for one engine call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.items.push(diagnostic.into());
    }

    pub fn warn(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.items.push(Diagnostic::warning(summary, detail));
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unwrap a result, recording the error as a diagnostic
    pub fn capture<T>(&mut self, result: ProviderResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }
}

/// Per-call context threaded from the engine
///
/// Carries the cancellation signal every blocking operation must honor.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancellation: CancellationToken,
}

/// Returned by [`Context::run`] when the context was cancelled first
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

impl Context {
    /// A context that is never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drive `fut` to completion unless the context is cancelled first
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(Cancelled),
            output = fut => Ok(output),
        }
    }
}

/// Definition of resource types that a Provider can handle
pub trait ResourceType: Send + Sync {
    /// Resource type name (e.g., "radarr_tag")
    fn name(&self) -> &str;

    /// Attribute schema for this resource type
    fn schema(&self) -> ResourceSchema;
}

/// Main Provider trait
///
/// All operations are async and may perform I/O. None of them panic or
/// return errors directly: failures are appended to `diags`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "radarr")
    fn name(&self) -> &'static str;

    /// Resource types this Provider can manage
    fn resource_types(&self) -> Vec<Box<dyn ResourceType>>;

    /// Data sources this Provider can read
    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>>;

    /// Create a resource from the plan; returns the new state
    async fn create(
        &self,
        ctx: &Context,
        resource: &Resource,
        diags: &mut Diagnostics,
    ) -> Option<State>;

    /// Refresh a resource; returns `State::not_found()` if it is gone
    async fn read(&self, ctx: &Context, prior: &State, diags: &mut Diagnostics) -> Option<State>;

    /// Update a resource in place; the identifier is taken from `prior`
    async fn update(
        &self,
        ctx: &Context,
        prior: &State,
        to: &Resource,
        diags: &mut Diagnostics,
    ) -> Option<State>;

    /// Delete a resource; `Some(())` means the engine may drop it from state
    async fn delete(&self, ctx: &Context, prior: &State, diags: &mut Diagnostics) -> Option<()>;

    /// Turn an import key into a partial state; the next read fills the rest
    fn import(&self, id: &ResourceId, key: &str, diags: &mut Diagnostics) -> Option<State>;

    /// Read a data source from its configuration
    async fn read_data_source(
        &self,
        ctx: &Context,
        config: &Resource,
        diags: &mut Diagnostics,
    ) -> Option<State>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::resource::Value;

    // Mock Provider for testing
    struct MockProvider;

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
            vec![]
        }

        fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
            vec![]
        }

        async fn create(
            &self,
            _ctx: &Context,
            resource: &Resource,
            _diags: &mut Diagnostics,
        ) -> Option<State> {
            let mut attrs = resource.attributes.clone();
            attrs.insert("id".to_string(), Value::Int(1));
            Some(State::existing(resource.id.clone(), attrs).with_identifier("1"))
        }

        async fn read(
            &self,
            _ctx: &Context,
            prior: &State,
            _diags: &mut Diagnostics,
        ) -> Option<State> {
            Some(State::not_found(prior.id.clone()))
        }

        async fn update(
            &self,
            _ctx: &Context,
            prior: &State,
            to: &Resource,
            _diags: &mut Diagnostics,
        ) -> Option<State> {
            Some(State::existing(prior.id.clone(), to.attributes.clone()))
        }

        async fn delete(
            &self,
            _ctx: &Context,
            _prior: &State,
            _diags: &mut Diagnostics,
        ) -> Option<()> {
            Some(())
        }

        fn import(&self, id: &ResourceId, key: &str, diags: &mut Diagnostics) -> Option<State> {
            let parsed = key
                .parse::<i64>()
                .map_err(|_| ProviderError::import_identifier(key));
            let n = diags.capture(parsed)?;
            let mut attrs = HashMap::new();
            attrs.insert("id".to_string(), Value::Int(n));
            Some(State::existing(id.clone(), attrs))
        }

        async fn read_data_source(
            &self,
            _ctx: &Context,
            config: &Resource,
            diags: &mut Diagnostics,
        ) -> Option<State> {
            diags.push(ProviderError::data_source(format!(
                "no {} found",
                config.id.resource_type
            )));
            None
        }
    }

    #[tokio::test]
    async fn mock_provider_read_returns_not_found() {
        let provider = MockProvider;
        let mut diags = Diagnostics::new();
        let prior = State::not_found(ResourceId::new("test", "example"));
        let state = provider
            .read(&Context::background(), &prior, &mut diags)
            .await
            .unwrap();
        assert!(!state.exists);
        assert!(diags.is_empty());
    }

    #[tokio::test]
    async fn mock_provider_create_returns_existing() {
        let provider = MockProvider;
        let mut diags = Diagnostics::new();
        let resource = Resource::new("test", "example");
        let state = provider
            .create(&Context::background(), &resource, &mut diags)
            .await
            .unwrap();
        assert!(state.exists);
        assert_eq!(state.identifier, Some("1".to_string()));
    }

    #[test]
    fn import_error_becomes_diagnostic() {
        let provider = MockProvider;
        let mut diags = Diagnostics::new();
        let state = provider.import(&ResourceId::new("test", "x"), "abc", &mut diags);
        assert!(state.is_none());
        let err = diags.errors().next().unwrap();
        assert_eq!(err.kind, Some(ErrorKind::UnexpectedImportIdentifier));
        assert_eq!(err.summary, "Unexpected Import Identifier");
    }

    #[test]
    fn provider_error_display_includes_resource() {
        let err = ProviderError::resource("boom").for_resource(ResourceId::new("radarr_tag", "a"));
        assert_eq!(err.to_string(), "[radarr_tag.a] boom");
    }

    #[test]
    fn client_error_message_names_verb_and_type() {
        let err = ProviderError::client("create", "radarr_tag", Cancelled);
        assert_eq!(
            err.message,
            "Unable to create radarr_tag, got error: operation cancelled"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn context_run_completes_when_not_cancelled() {
        let ctx = Context::background();
        assert_eq!(ctx.run(async { 5 }).await, Ok(5));
    }

    #[tokio::test]
    async fn context_run_aborts_when_cancelled() {
        let token = CancellationToken::new();
        let ctx = Context::with_cancellation(token.clone());
        token.cancel();
        let result = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(Cancelled));
    }
}
