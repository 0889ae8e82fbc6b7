//! Auth endpoints the session store depends on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::state::UserProfile;
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Body returned by login and register.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Backend operations the session store needs.
///
/// `login` and `register` must never attach a credential; `current_user`
/// must attach whatever credential is persisted at call time.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError>;

    /// # Errors
    ///
    /// Returns an error for any answer other than a well-formed profile.
    async fn current_user(&self) -> Result<UserProfile, ApiError>;
}

#[async_trait]
impl AuthBackend for Gateway {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.send_json(ApiRequest::post("/auth/login").json(request)?.unauthenticated()).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        self.send_json(ApiRequest::post("/auth/register").json(request)?.unauthenticated()).await
    }

    /// Only a 200 carries a profile; any other success status is refused so
    /// the session fails closed.
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let response = self.send(ApiRequest::get("/auth/me")).await?;
        if response.status != 200 {
            tracing::warn!(status = response.status, "unexpected /auth/me status");
            return Err(ApiError::Status { status: response.status, detail: None, body: response.body });
        }
        response.json()
    }
}
