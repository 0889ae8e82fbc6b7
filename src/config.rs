//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";
pub const API_PREFIX: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CREDENTIAL_DIR_NAME: &str = ".iptv-admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl ClientTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without the `/api` prefix and without a trailing `/`.
    pub backend_url: String,
    pub timeouts: ClientTimeouts,
    /// Directory holding the persisted bearer token.
    pub credential_dir: PathBuf,
}

impl ClientConfig {
    /// Config for an explicit backend URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackendUrl`] if `backend_url` is not an
    /// absolute http(s) URL.
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: normalize_backend_url(backend_url)?,
            timeouts: ClientTimeouts::default(),
            credential_dir: default_credential_dir(),
        })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `IPTV_BACKEND_URL`: default `http://127.0.0.1:8001`
    /// - `IPTV_REQUEST_TIMEOUT_SECS`: default 30
    /// - `IPTV_CONNECT_TIMEOUT_SECS`: default 10
    /// - `IPTV_CREDENTIAL_DIR`: default `$HOME/.iptv-admin`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unparseable URL or a zero/non-numeric
    /// timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("IPTV_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let backend_url = normalize_backend_url(&raw_url)?;
        let timeouts = ClientTimeouts {
            request_secs: env_parse_secs("IPTV_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_secs("IPTV_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let credential_dir = std::env::var("IPTV_CREDENTIAL_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(default_credential_dir, PathBuf::from);

        Ok(Self { backend_url, timeouts, credential_dir })
    }

    /// Replace the backend URL, keeping timeouts and credential directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackendUrl`] as [`ClientConfig::new`].
    pub fn with_backend_url(mut self, backend_url: &str) -> Result<Self, ConfigError> {
        self.backend_url = normalize_backend_url(backend_url)?;
        Ok(self)
    }

    /// Base URL every gateway path is appended to.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}{API_PREFIX}", self.backend_url)
    }
}

fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBackendUrl { url: raw.to_string(), reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBackendUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn env_parse_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::ConfigParse(format!("{key} must be greater than zero"))),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ConfigError::ConfigParse(format!("{key} is not a number: '{raw}'"))),
    }
}

fn default_credential_dir() -> PathBuf {
    std::env::var("HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(DEFAULT_CREDENTIAL_DIR_NAME)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
