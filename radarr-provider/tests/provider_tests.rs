use std::collections::HashMap;

use pretty_assertions::assert_eq;
use radarr_client::{AuthContext, RadarrClient};
use radarr_core::provider::{Context, Diagnostics, ErrorKind, Provider, Severity};
use radarr_core::resource::{Attributes, Resource, ResourceId, State, Value};
use radarr_provider::RadarrProvider;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> RadarrProvider {
    let client = RadarrClient::new(AuthContext::new(server.uri(), "test-key")).unwrap();
    RadarrProvider::new(client)
}

fn offline_provider() -> RadarrProvider {
    let client = RadarrClient::new(AuthContext::new("http://127.0.0.1:9", "test-key")).unwrap();
    RadarrProvider::new(client)
}

fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

fn state(resource_type: &str, pairs: &[(&str, Value)]) -> State {
    let attributes: Attributes = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    State::existing(ResourceId::new(resource_type, "test"), attributes)
}

async fn last_body(server: &MockServer) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests.last().unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

// ── Configure ───────────────────────────────────────────────────

#[tokio::test]
async fn configure_checks_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appName": "Radarr",
            "instanceName": "Radarr",
            "version": "5.3.6.8612"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let attributes = Attributes::from([
        ("url".to_string(), string(&server.uri())),
        ("api_key".to_string(), string("test-key")),
    ]);
    let mut diags = Diagnostics::new();
    let provider = RadarrProvider::configure(&attributes, &Context::background(), &mut diags).await;
    assert!(provider.is_some());
    assert!(diags.is_empty());
}

#[tokio::test]
async fn configure_reports_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/system/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let attributes = Attributes::from([
        ("url".to_string(), string(&server.uri())),
        ("api_key".to_string(), string("wrong")),
    ]);
    let mut diags = Diagnostics::new();
    let provider = RadarrProvider::configure(&attributes, &Context::background(), &mut diags).await;
    assert!(provider.is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.kind, Some(ErrorKind::Client));
}

// ── Typed variants ──────────────────────────────────────────────

#[tokio::test]
async fn create_newznab_keeps_masked_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/indexer"))
        .and(body_partial_json(json!({
            "name": "A",
            "implementation": "Newznab",
            "configContract": "NewznabSettings",
            "protocol": "usenet"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "A",
            "implementation": "Newznab",
            "configContract": "NewznabSettings",
            "protocol": "usenet",
            "enableRss": true,
            "priority": 25,
            "tags": [],
            "fields": [
                {"name": "baseUrl", "value": "http://i.example"},
                {"name": "apiKey", "value": "********"},
                {"name": "categories", "value": [2000, 2010]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let plan = Resource::new("radarr_indexer_newznab", "a")
        .with_attribute("name", string("A"))
        .with_attribute("base_url", string("http://i.example"))
        .with_attribute("api_key", string("k"))
        .with_attribute("protocol", string("usenet"));

    let mut diags = Diagnostics::new();
    let state = provider_for(&server)
        .create(&Context::background(), &plan, &mut diags)
        .await
        .unwrap();

    assert_eq!(state.attributes.get("id"), Some(&Value::Int(7)));
    assert_eq!(state.attributes.get("api_key"), Some(&string("k")));
    assert_eq!(state.attributes.get("priority"), Some(&Value::Int(25)));
    assert_eq!(
        state.attributes.get("categories"),
        Some(&Value::List(vec![Value::Int(2000), Value::Int(2010)]))
    );
    assert_eq!(state.identifier.as_deref(), Some("7"));

    let body = last_body(&server).await;
    let fields = body["fields"].as_array().unwrap();
    assert!(fields.contains(&json!({"name": "apiKey", "value": "k"})));
    assert!(fields.contains(&json!({"name": "baseUrl", "value": "http://i.example"})));
}

#[tokio::test]
async fn unknown_fields_are_ignored_on_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/indexer/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "A",
            "implementation": "Newznab",
            "configContract": "NewznabSettings",
            "protocol": "usenet",
            "tags": [1],
            "fields": [
                {"name": "baseUrl", "value": "http://i.example"},
                {"name": "nonexistent", "value": 42}
            ]
        })))
        .mount(&server)
        .await;

    let prior = state(
        "radarr_indexer_newznab",
        &[("id", Value::Int(7)), ("api_key", string("k"))],
    );
    let mut diags = Diagnostics::new();
    let refreshed = provider_for(&server)
        .read(&Context::background(), &prior, &mut diags)
        .await
        .unwrap();

    assert!(diags.is_empty());
    assert!(refreshed.exists);
    assert!(!refreshed.attributes.contains_key("nonexistent"));
    assert_eq!(refreshed.attributes.get("api_key"), Some(&string("k")));
    assert_eq!(refreshed.attributes.get("base_url"), Some(&string("http://i.example")));
}

#[tokio::test]
async fn read_of_another_implementation_drops_state_with_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/indexer/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "A",
            "implementation": "Torznab",
            "configContract": "TorznabSettings",
            "fields": []
        })))
        .mount(&server)
        .await;

    let prior = state("radarr_indexer_newznab", &[("id", Value::Int(7))]);
    let mut diags = Diagnostics::new();
    let refreshed = provider_for(&server)
        .read(&Context::background(), &prior, &mut diags)
        .await
        .unwrap();

    assert!(!refreshed.exists);
    assert!(!diags.has_errors());
    assert_eq!(diags.warnings().count(), 1);
}

#[tokio::test]
async fn vanished_object_is_removed_from_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/downloadclient/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let prior = state("radarr_download_client_transmission", &[("id", Value::Int(3))]);
    let mut diags = Diagnostics::new();
    let refreshed = provider_for(&server)
        .read(&Context::background(), &prior, &mut diags)
        .await
        .unwrap();
    assert!(!refreshed.exists);
    assert!(diags.is_empty());
}

#[tokio::test]
async fn update_keeps_prior_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/notification/12"))
        .and(body_partial_json(json!({"id": 12, "implementation": "Discord"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": 12,
            "name": "discord",
            "implementation": "Discord",
            "configContract": "DiscordSettings",
            "onGrab": true,
            "tags": [],
            "fields": [{"name": "webHookUrl", "value": "http://hook.example"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = state(
        "radarr_notification_discord",
        &[("id", Value::Int(12)), ("name", string("discord"))],
    );
    let plan = Resource::new("radarr_notification_discord", "test")
        .with_attribute("name", string("discord"))
        .with_attribute("on_grab", Value::Bool(true))
        .with_attribute("web_hook_url", string("http://hook.example"))
        .with_attribute("id", Value::Unknown);

    let mut diags = Diagnostics::new();
    let updated = provider_for(&server)
        .update(&Context::background(), &prior, &plan, &mut diags)
        .await
        .unwrap();
    assert_eq!(updated.attributes.get("id"), Some(&Value::Int(12)));
    assert_eq!(updated.attributes.get("on_grab"), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn delete_of_missing_object_is_a_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/importlist/4"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let prior = state("radarr_import_list_tmdb_popular", &[("id", Value::Int(4))]);
    let mut diags = Diagnostics::new();
    let result = provider_for(&server)
        .delete(&Context::background(), &prior, &mut diags)
        .await;
    assert!(result.is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.kind, Some(ErrorKind::Client));
    assert!(error.detail.contains("Unable to delete"));
}

#[tokio::test]
async fn delete_failure_is_a_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/importlist/4"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let prior = state("radarr_import_list_tmdb_popular", &[("id", Value::Int(4))]);
    let mut diags = Diagnostics::new();
    let result = provider_for(&server)
        .delete(&Context::background(), &prior, &mut diags)
        .await;
    assert!(result.is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.kind, Some(ErrorKind::Client));
    assert!(error.detail.contains("Unable to delete radarr_import_list_tmdb_popular"));
}

// ── Import ──────────────────────────────────────────────────────

#[test]
fn import_parses_numeric_keys() {
    let provider = offline_provider();
    let mut diags = Diagnostics::new();

    let imported = provider
        .import(&ResourceId::new("radarr_tag", "t"), "42", &mut diags)
        .unwrap();
    assert_eq!(imported.attributes.get("id"), Some(&Value::Int(42)));

    assert!(provider
        .import(&ResourceId::new("radarr_tag", "t"), "abc", &mut diags)
        .is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.kind, Some(ErrorKind::UnexpectedImportIdentifier));
}

#[test]
fn singleton_import_ignores_key() {
    let provider = offline_provider();
    let mut diags = Diagnostics::new();
    let imported = provider
        .import(&ResourceId::new("radarr_host", "h"), "whatever", &mut diags)
        .unwrap();
    assert_eq!(imported.attributes.get("id"), Some(&Value::Int(1)));
}

#[test]
fn unknown_type_is_an_internal_error() {
    let provider = offline_provider();
    let mut diags = Diagnostics::new();
    assert!(provider
        .import(&ResourceId::new("radarr_nope", "n"), "1", &mut diags)
        .is_none());
    assert_eq!(
        diags.errors().next().unwrap().kind,
        Some(ErrorKind::InternalInvariant)
    );
}

// ── Singletons ──────────────────────────────────────────────────

#[tokio::test]
async fn singleton_update_always_uses_id_one() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/config/naming/1"))
        .and(body_partial_json(json!({"id": 1, "renameMovies": true})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": 5,
            "renameMovies": true,
            "replaceIllegalCharacters": true,
            "colonReplacementFormat": "delete",
            "standardMovieFormat": "{Movie Title} ({Release Year})",
            "movieFolderFormat": "{Movie Title} ({Release Year})"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = state("radarr_naming_config", &[("id", Value::Int(1))]);
    let plan = Resource::new("radarr_naming_config", "test")
        .with_attribute("rename_movies", Value::Bool(true))
        .with_attribute("replace_illegal_characters", Value::Bool(true))
        .with_attribute("standard_movie_format", string("{Movie Title} ({Release Year})"))
        .with_attribute("movie_folder_format", string("{Movie Title} ({Release Year})"));

    let mut diags = Diagnostics::new();
    let updated = provider_for(&server)
        .update(&Context::background(), &prior, &plan, &mut diags)
        .await
        .unwrap();
    assert_eq!(updated.attributes.get("id"), Some(&Value::Int(1)));
    assert_eq!(updated.identifier.as_deref(), Some("1"));
}

#[tokio::test]
async fn singleton_delete_does_not_call_the_service() {
    let server = MockServer::start().await;
    let prior = state("radarr_media_management", &[("id", Value::Int(1))]);
    let mut diags = Diagnostics::new();
    let result = provider_for(&server)
        .delete(&Context::background(), &prior, &mut diags)
        .await;
    assert_eq!(result, Some(()));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Non-polymorphic resources ───────────────────────────────────

#[tokio::test]
async fn quality_profile_update_sends_nested_items() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/qualityprofile/3"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": 3,
            "name": "HD",
            "upgradeAllowed": false,
            "cutoff": 7,
            "items": [
                {"quality": {"id": 7, "name": "HD", "source": "bluray", "resolution": 1080}, "items": [], "allowed": false},
                {"quality": {"id": 8, "name": "UHD", "source": "bluray", "resolution": 2160}, "items": [], "allowed": false}
            ],
            "formatItems": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quality = |id: i64, name: &str, allowed: bool| {
        Value::Map(HashMap::from([
            ("id".to_string(), Value::Int(id)),
            ("name".to_string(), string(name)),
            ("allowed".to_string(), Value::Bool(allowed)),
        ]))
    };
    let prior = state("radarr_quality_profile", &[("id", Value::Int(3))]);
    let plan = Resource::new("radarr_quality_profile", "test")
        .with_attribute("name", string("HD"))
        .with_attribute("cutoff", Value::Int(7))
        .with_attribute(
            "qualities",
            Value::List(vec![quality(7, "HD", false), quality(8, "UHD", false)]),
        );

    let mut diags = Diagnostics::new();
    let updated = provider_for(&server)
        .update(&Context::background(), &prior, &plan, &mut diags)
        .await
        .unwrap();

    let body = last_body(&server).await;
    assert_eq!(
        body["items"],
        json!([
            {"quality": {"id": 7, "name": "HD"}, "items": [], "allowed": false},
            {"quality": {"id": 8, "name": "UHD"}, "items": [], "allowed": false}
        ])
    );
    assert_eq!(updated.attributes.get("qualities"), plan.attributes.get("qualities"));
}

#[tokio::test]
async fn custom_format_size_bounds_survive_read_then_update() {
    let server = MockServer::start().await;
    let stored = json!({
        "id": 3,
        "name": "Small",
        "includeCustomFormatWhenRenaming": false,
        "specifications": [{
            "name": "Size",
            "implementation": "SizeSpecification",
            "negate": false,
            "required": true,
            "fields": [{"name": "min", "value": 1.5}, {"name": "max", "value": 60.0}]
        }]
    });
    Mock::given(method("GET"))
        .and(path("/api/v3/customformat/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored.clone()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/customformat/3"))
        .respond_with(ResponseTemplate::new(202).set_body_json(stored))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let prior = state("radarr_custom_format", &[("id", Value::Int(3))]);
    let mut diags = Diagnostics::new();
    let current = provider
        .read(&Context::background(), &prior, &mut diags)
        .await
        .unwrap();

    let mut attributes = current.attributes.clone();
    attributes.remove("id");
    let plan = Resource::new("radarr_custom_format", "test").with_attributes(attributes);
    let updated = provider
        .update(&Context::background(), &current, &plan, &mut diags)
        .await
        .unwrap();

    let body = last_body(&server).await;
    let fields = body["specifications"][0]["fields"].as_array().unwrap().clone();
    assert!(fields.contains(&json!({"name": "min", "value": 1.5})));
    assert!(fields.contains(&json!({"name": "max", "value": 60.0})));
    assert_eq!(
        updated.attributes.get("specifications"),
        current.attributes.get("specifications")
    );
    assert!(diags.is_empty());
}

#[tokio::test]
async fn movie_delete_keeps_files() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/movie/9"))
        .and(query_param("deleteFiles", "false"))
        .and(query_param("addImportExclusion", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let prior = state("radarr_movie", &[("id", Value::Int(9))]);
    let mut diags = Diagnostics::new();
    let result = provider_for(&server)
        .delete(&Context::background(), &prior, &mut diags)
        .await;
    assert_eq!(result, Some(()));
}

#[tokio::test]
async fn root_folder_cannot_be_updated() {
    let server = MockServer::start().await;
    let prior = state("radarr_root_folder", &[("id", Value::Int(1))]);
    let plan = Resource::new("radarr_root_folder", "test").with_attribute("path", string("/data"));
    let mut diags = Diagnostics::new();
    let result = provider_for(&server)
        .update(&Context::background(), &prior, &plan, &mut diags)
        .await;
    assert!(result.is_none());
    assert_eq!(diags.errors().next().unwrap().kind, Some(ErrorKind::Resource));
}

// ── Data sources ────────────────────────────────────────────────

async fn mount_tags(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "label": "x"},
            {"id": 2, "label": "y"},
            {"id": 3, "label": "z"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn lookup_selects_by_natural_key() {
    let server = MockServer::start().await;
    mount_tags(&server).await;

    let config = Resource::new("radarr_tag", "y")
        .with_attribute("label", string("y"))
        .with_read_only(true);
    let mut diags = Diagnostics::new();
    let found = provider_for(&server)
        .read_data_source(&Context::background(), &config, &mut diags)
        .await
        .unwrap();
    assert_eq!(found.attributes.get("id"), Some(&Value::Int(2)));
}

#[tokio::test]
async fn lookup_returns_first_match_in_service_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "label": "dup"},
            {"id": 2, "label": "dup"}
        ])))
        .mount(&server)
        .await;

    let config = Resource::new("radarr_tag", "dup")
        .with_attribute("label", string("dup"))
        .with_read_only(true);
    let mut diags = Diagnostics::new();
    let found = provider_for(&server)
        .read_data_source(&Context::background(), &config, &mut diags)
        .await
        .unwrap();
    assert_eq!(found.attributes.get("id"), Some(&Value::Int(5)));
    assert_eq!(found.identifier.as_deref(), Some("5"));
}

#[tokio::test]
async fn lookup_miss_echoes_the_key() {
    let server = MockServer::start().await;
    mount_tags(&server).await;

    let config = Resource::new("radarr_tag", "q")
        .with_attribute("label", string("q"))
        .with_read_only(true);
    let mut diags = Diagnostics::new();
    let found = provider_for(&server)
        .read_data_source(&Context::background(), &config, &mut diags)
        .await;
    assert!(found.is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.kind, Some(ErrorKind::DataSource));
    assert!(error.detail.contains("'q'"));
}

#[tokio::test]
async fn movie_lookup_reports_tmdb_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let config = Resource::new("radarr_movie", "m")
        .with_attribute("tmdb_id", Value::Int(999999))
        .with_read_only(true);
    let mut diags = Diagnostics::new();
    let found = provider_for(&server)
        .read_data_source(&Context::background(), &config, &mut diags)
        .await;
    assert!(found.is_none());
    let error = diags.errors().next().unwrap();
    assert_eq!(error.severity, Severity::Error);
    assert_eq!(error.kind, Some(ErrorKind::DataSource));
    assert!(error.detail.contains("TMDB ID '999999'"));
}

#[tokio::test]
async fn list_skips_malformed_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/indexer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "a", "implementation": "Newznab", "configContract": "NewznabSettings", "fields": []},
            {"id": "two", "name": "b"}
        ])))
        .mount(&server)
        .await;

    let config = Resource::new("radarr_indexers", "all").with_read_only(true);
    let mut diags = Diagnostics::new();
    let listed = provider_for(&server)
        .read_data_source(&Context::background(), &config, &mut diags)
        .await
        .unwrap();
    let indexers = listed.attributes.get("indexers").and_then(Value::as_list).unwrap();
    assert_eq!(indexers.len(), 1);
    assert_eq!(diags.warnings().count(), 1);
}

#[tokio::test]
async fn auto_tag_condition_needs_no_service() {
    let provider = offline_provider();
    let config = Resource::new("radarr_auto_tag_condition_year", "nineties")
        .with_attribute("name", string("Y"))
        .with_attribute("min", Value::Int(1990))
        .with_attribute("max", Value::Int(2020))
        .with_attribute("negate", Value::Bool(false))
        .with_attribute("required", Value::Bool(true))
        .with_read_only(true);

    let mut diags = Diagnostics::new();
    let first = provider
        .read_data_source(&Context::background(), &config, &mut diags)
        .await
        .unwrap();
    let second = provider
        .read_data_source(&Context::background(), &config, &mut diags)
        .await
        .unwrap();

    assert_eq!(
        first.attributes.get("implementation"),
        Some(&string("YearSpecification"))
    );
    assert!(first.attributes.get("id").and_then(Value::as_int).is_some());
    assert_eq!(first.attributes.get("id"), second.attributes.get("id"));
}

// ── Cancellation ────────────────────────────────────────────────

#[tokio::test]
async fn cancelled_context_surfaces_as_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/tag/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "label": "x"}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let ctx = Context::background();
    ctx.cancellation().cancel();
    let prior = state("radarr_tag", &[("id", Value::Int(1))]);
    let mut diags = Diagnostics::new();
    let result = provider_for(&server).read(&ctx, &prior, &mut diags).await;
    assert!(result.is_none());
    assert_eq!(diags.errors().next().unwrap().kind, Some(ErrorKind::Client));
}
