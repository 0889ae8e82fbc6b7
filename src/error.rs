//! Error types shared across the gateway, session store and configuration.
//!
//! ERROR HANDLING
//! ==============
//! The gateway never reinterprets backend failures: a non-2xx response is
//! carried as [`ApiError::Status`] with the status code, the backend's
//! `detail` message when one was sent, and the raw body. Deciding that a 401
//! means "log out" is left to the caller.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

// =============================================================================
// API
// =============================================================================

/// Errors produced by requests issued through the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (DNS, connect, TLS, reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The request did not complete within its deadline.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(std::time::Duration),

    /// The caller's cancellation token fired before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The backend answered with a non-success status.
    #[error("{}", status_message(.status, .detail.as_deref()))]
    Status {
        status: u16,
        /// The backend's `{"detail": "..."}` message, if it sent one.
        detail: Option<String>,
        body: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The persisted credential could not be read.
    #[error("credential store unavailable: {0}")]
    Credential(#[from] StorageError),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn status_message(status: &u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => detail.to_owned(),
        None => format!("HTTP {status}"),
    }
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `detail` message, when present.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether the backend rejected the bearer credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::Cancelled => "E_CANCELLED",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::Encode(_) => "E_ENCODE",
            Self::ClientBuild(_) => "E_CLIENT_BUILD",
            Self::Credential(_) => "E_CREDENTIAL",
        }
    }

    /// Whether repeating the same request could plausibly succeed.
    /// Nothing in this crate retries automatically.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout(_) | Self::Status { status: 429 | 500..=599, .. }
        )
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// Errors produced by credential storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("credential file {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// SESSION
// =============================================================================

/// Errors surfaced by `login` and `register`. Verification failures are never
/// surfaced; they produce an unauthenticated session instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not persist credential: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// The backend's `detail` message, for display next to a login form.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.detail(),
            Self::Storage(_) => None,
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Errors produced while building client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("config parse failed: {0}")]
    ConfigParse(String),
}
