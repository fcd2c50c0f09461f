use pretty_assertions::assert_eq;
use radarr_client::{AuthContext, ClientError, ProviderResource, RadarrClient, paths};
use radarr_core::provider::Context;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RadarrClient {
    RadarrClient::new(AuthContext::new(server.uri(), "test-key")).unwrap()
}

// ── Authentication ──────────────────────────────────────────────

#[tokio::test]
async fn sends_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/system/status"))
        .and(header("X-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appName": "Radarr",
            "instanceName": "Radarr",
            "version": "5.3.6.8612"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server)
        .system_status(&Context::background())
        .await
        .unwrap();
    assert_eq!(status.app_name, "Radarr");
    assert_eq!(status.version, "5.3.6.8612");
}

#[tokio::test]
async fn unauthorized_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/system/status"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .system_status(&Context::background())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 401, .. }));
    assert!(err.to_string().contains("401"));
}

// ── CRUD ────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_all_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "label": "hd"},
            {"id": 2, "label": "uhd"}
        ])))
        .mount(&server)
        .await;

    let tags: Vec<serde_json::Value> = client_for(&server)
        .list(&Context::background(), paths::TAG)
        .await
        .unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1]["label"], "uhd");
}

#[tokio::test]
async fn create_posts_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/indexer"))
        .and(body_json(json!({
            "name": "A",
            "implementation": "Newznab",
            "configContract": "NewznabSettings",
            "protocol": "usenet",
            "tags": [],
            "fields": [{"name": "baseUrl", "value": "http://i.example"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "A",
            "implementation": "Newznab",
            "configContract": "NewznabSettings",
            "protocol": "usenet",
            "tags": [],
            "fields": [{"name": "baseUrl", "value": "http://i.example"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = ProviderResource {
        name: Some("A".to_string()),
        implementation: "Newznab".to_string(),
        config_contract: "NewznabSettings".to_string(),
        protocol: Some("usenet".to_string()),
        tags: Some(vec![]),
        fields: vec![radarr_client::Field::new("baseUrl", "http://i.example")],
        ..Default::default()
    };
    let created: ProviderResource = client_for(&server)
        .create(&Context::background(), paths::INDEXER, &envelope)
        .await
        .unwrap();
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn update_puts_to_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/config/naming/1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": 1, "renameMovies": true})))
        .expect(1)
        .mount(&server)
        .await;

    let updated: serde_json::Value = client_for(&server)
        .update(
            &Context::background(),
            paths::NAMING_CONFIG,
            1,
            &json!({"id": 1, "renameMovies": true}),
        )
        .await
        .unwrap();
    assert_eq!(updated["renameMovies"], true);
}

#[tokio::test]
async fn get_missing_object_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/tag/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "NotFound"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get::<serde_json::Value>(&Context::background(), paths::TAG, 9)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_passes_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/movie/5"))
        .and(query_param("deleteFiles", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete(
            &Context::background(),
            paths::MOVIE,
            5,
            &[("deleteFiles", "false")],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn server_error_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(400).set_body_string("label is required"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create::<_, serde_json::Value>(&Context::background(), paths::TAG, &json!({}))
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status, 400);
            assert_eq!(body, "label is required");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

// ── Cancellation ────────────────────────────────────────────────

#[tokio::test]
async fn cancelled_context_aborts_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let ctx = Context::with_cancellation(token.clone());
    token.cancel();

    let err = client_for(&server)
        .list::<serde_json::Value>(&ctx, paths::TAG)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
}
