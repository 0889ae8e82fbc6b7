//! One-stop construction of the gateway, credential store and session.
//!
//! Front ends (the CLI, a TUI, tests) build an [`AdminClient`] once and share
//! it; the session store and the gateway read the same credential store, so
//! a login through one is visible to the other on the next request.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use crate::api::{
    CustomersApi, DnsApi, NotificationsApi, PaymentsApi, PortalApi, SettingsApi, StatsApi, TemplatesApi,
};
use crate::config::ClientConfig;
use crate::credential::{CredentialStore, FileCredentialStore};
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::session::SessionStore;

#[derive(Debug, Clone)]
pub struct AdminClient {
    gateway: Gateway,
    session: Arc<SessionStore>,
}

impl AdminClient {
    /// Client persisting its credential under `config.credential_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(&config.credential_dir));
        Self::with_credentials(config, credentials)
    }

    /// Client over an injected credential store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_credentials(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let gateway = Gateway::new(config, Arc::clone(&credentials))?;
        let session = Arc::new(SessionStore::new(Arc::new(gateway.clone()), credentials));
        Ok(Self { gateway, session })
    }

    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn customers(&self) -> CustomersApi<'_> {
        self.gateway.customers()
    }

    #[must_use]
    pub fn dns(&self) -> DnsApi<'_> {
        self.gateway.dns()
    }

    #[must_use]
    pub fn payments(&self) -> PaymentsApi<'_> {
        self.gateway.payments()
    }

    #[must_use]
    pub fn settings(&self) -> SettingsApi<'_> {
        self.gateway.settings()
    }

    #[must_use]
    pub fn templates(&self) -> TemplatesApi<'_> {
        self.gateway.templates()
    }

    #[must_use]
    pub fn notifications(&self) -> NotificationsApi<'_> {
        self.gateway.notifications()
    }

    #[must_use]
    pub fn stats(&self) -> StatsApi<'_> {
        self.gateway.stats()
    }

    #[must_use]
    pub fn portal(&self) -> PortalApi<'_> {
        self.gateway.portal()
    }
}
