//! Authorized request gateway: the single code path for backend HTTP calls.
//!
//! ARCHITECTURE
//! ============
//! Callers describe a call with [`ApiRequest`] and hand it to
//! [`Gateway::send`]. Immediately before dispatch the gateway reads the
//! credential store and, for requests in bearer mode, injects
//! `Authorization: Bearer <token>`. Nothing is cached at construction time,
//! so a token persisted by a login is attached to the very next request.
//!
//! ERROR HANDLING
//! ==============
//! Method, path, query, body and extra headers pass through untouched, and so
//! do failures: any non-2xx answer becomes [`ApiError::Status`] carrying the
//! status code and body. Every request is bounded by a timeout and may carry
//! a cancellation token; neither is retried.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::credential::CredentialStore;
use crate::error::ApiError;

// =============================================================================
// REQUEST
// =============================================================================

/// Whether the gateway attaches the persisted credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach `Authorization: Bearer <token>` when a credential is stored.
    Bearer,
    /// Never attach a credential (login, register, public portal).
    Anonymous,
}

/// Description of one backend call, relative to the `/api` base.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
    auth: AuthMode,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            auth: AuthMode::Bearer,
            timeout: None,
            cancel: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?);
        Ok(self)
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Dispatch without the persisted credential, even if one exists.
    #[must_use]
    pub fn unauthenticated(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    /// Override the gateway's default request timeout for this call.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abandon the call with [`ApiError::Cancelled`] once `token` fires.
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn auth(&self) -> AuthMode {
        self.auth
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// A successful (2xx) backend answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// HTTP client bound to the backend's `/api` base and the credential store.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    api_base: String,
    credentials: Arc<dyn CredentialStore>,
    request_timeout: Duration,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Build a gateway for `config`, reading credentials from `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, api_base: config.api_base(), credentials, request_timeout: config.timeouts.request() })
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL for an `/api`-relative path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Dispatch `request`, returning the raw body of a 2xx answer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx answers, [`ApiError::Timeout`]
    /// or [`ApiError::Cancelled`] when the call is abandoned, and
    /// [`ApiError::Transport`] when no answer was received.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let timeout = request.timeout.unwrap_or(self.request_timeout);
        let cancel = request.cancel.clone();

        let bounded = async {
            match tokio::time::timeout(timeout, self.dispatch(&request)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(method = %request.method, path = %request.path, ?timeout, "backend request timed out");
                    Err(ApiError::Timeout(timeout))
                }
            }
        };

        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::debug!(method = %request.method, path = %request.path, "backend request cancelled");
                        Err(ApiError::Cancelled)
                    }
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }

    /// Dispatch `request` and decode the 2xx body as `T`.
    ///
    /// # Errors
    ///
    /// Everything [`Gateway::send`] returns, plus [`ApiError::Decode`].
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self.http.request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Read per request: a login since the last call must be visible here.
        let mut authenticated = false;
        if request.auth == AuthMode::Bearer {
            if let Some(credential) = self.credentials.load()? {
                builder = builder.bearer_auth(credential.expose());
                authenticated = true;
            }
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, path = %request.path, authenticated, "dispatching backend request");

        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            tracing::debug!(method = %request.method, path = %request.path, status, "backend returned error status");
            return Err(ApiError::Status { status, detail: extract_detail(&body), body });
        }
        Ok(ApiResponse { status, body })
    }
}

/// Pull the backend's human-readable `detail` out of an error body.
///
/// Plain errors carry `{"detail": "..."}`; request validation failures carry
/// a list of `{"msg": "..."}` objects, which are joined.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}
