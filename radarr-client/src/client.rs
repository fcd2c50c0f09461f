//! Radarr HTTP client
//!
//! Every call takes the engine's [`Context`] and aborts with
//! [`ClientError::Cancelled`] when it is cancelled.

use std::sync::Arc;

use radarr_core::provider::Context;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AuthContext;
use crate::error::{ClientError, ClientResult};
use crate::models::SystemStatus;
use crate::paths;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Shared, cheaply cloneable client handle.
#[derive(Debug, Clone)]
pub struct RadarrClient {
    http: reqwest::Client,
    auth: Arc<AuthContext>,
}

impl RadarrClient {
    /// Creates a client that authenticates every request with `auth`.
    pub fn new(auth: AuthContext) -> ClientResult<Self> {
        let mut key = HeaderValue::from_str(&auth.api_key)
            .map_err(|_| ClientError::Config("api_key contains invalid characters".into()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("radarr-provider/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            auth: Arc::new(auth),
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// `GET <path>` returning every object of a collection
    pub async fn list<T: DeserializeOwned>(&self, ctx: &Context, path: &str) -> ClientResult<Vec<T>> {
        let response = self.send(ctx, Method::GET, path, None::<&()>, &[]).await?;
        self.json(ctx, response).await
    }

    /// `GET <path>/<id>`
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        id: i64,
    ) -> ClientResult<T> {
        let path = item_path(path, id)?;
        let response = self.send(ctx, Method::GET, &path, None::<&()>, &[]).await?;
        self.json(ctx, response).await
    }

    /// `GET <path>` for endpoints that return a single object
    pub async fn get_object<T: DeserializeOwned>(&self, ctx: &Context, path: &str) -> ClientResult<T> {
        let response = self.send(ctx, Method::GET, path, None::<&()>, &[]).await?;
        self.json(ctx, response).await
    }

    /// `POST <path>`
    pub async fn create<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.send(ctx, Method::POST, path, Some(body), &[]).await?;
        self.json(ctx, response).await
    }

    /// `PUT <path>/<id>`
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        id: i64,
        body: &B,
    ) -> ClientResult<T> {
        let path = item_path(path, id)?;
        let response = self.send(ctx, Method::PUT, &path, Some(body), &[]).await?;
        self.json(ctx, response).await
    }

    /// `DELETE <path>/<id>`
    pub async fn delete(
        &self,
        ctx: &Context,
        path: &str,
        id: i64,
        query: &[(&str, &str)],
    ) -> ClientResult<()> {
        let path = item_path(path, id)?;
        self.send(ctx, Method::DELETE, &path, None::<&()>, query)
            .await?;
        Ok(())
    }

    /// `GET /api/v3/system/status`, used to verify credentials
    pub async fn system_status(&self, ctx: &Context) -> ClientResult<SystemStatus> {
        self.get_object(ctx, paths::SYSTEM_STATUS).await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    async fn send<B: Serialize + ?Sized>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
    ) -> ClientResult<Response> {
        debug!(%method, path, "radarr request");

        let mut request: RequestBuilder = self
            .http
            .request(method.clone(), format!("{}{}", self.auth.base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = ctx
            .run(request.send())
            .await
            .map_err(|_| ClientError::Cancelled)??;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(path.to_string()));
        }

        let body = ctx
            .run(response.text())
            .await
            .map_err(|_| ClientError::Cancelled)?
            .unwrap_or_default();
        Err(ClientError::Status {
            method: method.to_string(),
            path: path.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn json<T: DeserializeOwned>(&self, ctx: &Context, response: Response) -> ClientResult<T> {
        let bytes = ctx
            .run(response.bytes())
            .await
            .map_err(|_| ClientError::Cancelled)??;
        // DELETE-like answers may be empty; treat them as JSON null
        if bytes.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Narrow an id to the service's 32-bit width and build `<path>/<id>`
fn item_path(path: &str, id: i64) -> ClientResult<String> {
    let id = i32::try_from(id).map_err(|_| ClientError::IdOutOfRange(id))?;
    Ok(format!("{}/{}", path, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_appends_id() {
        assert_eq!(item_path("/api/v3/tag", 3).unwrap(), "/api/v3/tag/3");
    }

    #[test]
    fn item_path_rejects_ids_wider_than_32_bits() {
        let err = item_path("/api/v3/tag", i64::from(i32::MAX) + 1).unwrap_err();
        assert!(matches!(err, ClientError::IdOutOfRange(_)));
    }

    #[test]
    fn invalid_api_key_is_a_config_error() {
        let err = RadarrClient::new(AuthContext::new("http://localhost", "bad\nkey")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
