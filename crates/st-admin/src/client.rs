//! Authenticated HTTP client for one identity-service tenant.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ApiError, ApiResult};

/// Header carrying the tenant's API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Body `status` value of a successful call.
pub const STATUS_OK: &str = "OK";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint paths of the core administration API.
pub mod paths {
    /// `GET`, requires `userId`.
    pub const USER_BY_ID: &str = "/user/id";
    /// `GET` (requires `userId`) and `PUT`.
    pub const USER_METADATA: &str = "/recipe/user/metadata";
    /// `GET`, requires `userId`.
    pub const USER_ROLES: &str = "/recipe/user/roles";
    /// `GET`, requires `role`.
    pub const ROLE_USERS: &str = "/recipe/role/users";
    /// `PUT`.
    pub const USER_ROLE: &str = "/recipe/user/role";
    /// `POST`.
    pub const SIGN_IN_UP: &str = "/recipe/signinup";
    /// `POST`.
    pub const USER_ID_MAP: &str = "/recipe/userid/map";
}

/// Connection URI and API key of one tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Base URI, e.g. `https://st-dev-....aws.supertokens.io`.
    pub connection_uri: String,
    /// Static API key sent with every request.
    pub api_key: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(connection_uri: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            connection_uri: connection_uri.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("connection_uri", &self.connection_uri)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// API client bound to a single tenant.
#[derive(Clone)]
pub struct AdminClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Creates a client with the [`DEFAULT_TIMEOUT`].
    pub fn new(credentials: &Credentials) -> ApiResult<Self> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(credentials: &Credentials, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: credentials.connection_uri.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
        })
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a GET request and requires an `"OK"` body status.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.get_raw(path).await?;
        ensure_ok(path, body)
    }

    /// Makes a GET request without interpreting the body status.
    pub(crate) async fn get_raw(&self, path: &str) -> ApiResult<serde_json::Value> {
        let request = self.client.get(self.url(path));
        self.execute(path, request).await
    }

    /// Makes a POST request and requires an `"OK"` body status.
    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = self.post_raw(path, body).await?;
        ensure_ok(path, body)
    }

    /// Makes a POST request without interpreting the body status.
    pub(crate) async fn post_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<serde_json::Value> {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(path, request).await
    }

    /// Makes a PUT request and requires an `"OK"` body status.
    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.client.put(self.url(path)).json(body);
        let body = self.execute(path, request).await?;
        ensure_ok(path, body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request with the API key and decodes a 2xx JSON body.
    async fn execute(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<serde_json::Value> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let status = response.status();
        tracing::debug!(base_url = %self.base_url, path, status = status.as_u16(), "api response");

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(path, status = status.as_u16(), %body, "request not OK");
            Err(ApiError::Transport {
                path: strip_query(path).to_string(),
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Builds `path?key=value` with the value URL-encoded.
pub(crate) fn with_query(path: &str, key: &str, value: &str) -> String {
    format!("{}?{}={}", path, key, urlencoding::encode(value))
}

/// Returns the body's `status` field, if it is a string.
pub(crate) fn body_status(body: &serde_json::Value) -> Option<&str> {
    body.get("status").and_then(|s| s.as_str())
}

/// Decodes `body` as `T` when its status is `"OK"`, otherwise fails with the raw body.
pub(crate) fn ensure_ok<T: DeserializeOwned>(path: &str, body: serde_json::Value) -> ApiResult<T> {
    if body_status(&body) == Some(STATUS_OK) {
        Ok(serde_json::from_value(body)?)
    } else {
        Err(status_error(path, &body))
    }
}

/// Builds the error for a body whose status is not `"OK"`.
pub(crate) fn status_error(path: &str, body: &serde_json::Value) -> ApiError {
    let status = body_status(body).unwrap_or("<missing>").to_string();
    let raw = body.to_string();
    tracing::error!(path, %status, body = %raw, "service status not OK");
    ApiError::Status {
        path: strip_query(path).to_string(),
        status,
        body: raw,
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}
