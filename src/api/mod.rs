//! Typed resource calls for the admin dashboard.
//!
//! ARCHITECTURE
//! ============
//! Each resource gets a small borrowed view over the [`Gateway`]
//! (`CustomersApi`, `DnsApi`, ...). The views only shape requests and decode
//! responses; all credential handling stays in the gateway. Mutations return
//! the backend's record and callers re-query lists afterwards, so there is no
//! client-side cache to keep coherent.
//!
//! The few computations the dashboard pages did locally (search filtering,
//! revenue totals, days remaining, WhatsApp links) live next to the resource
//! they belong to as plain functions.

pub mod customers;
pub mod dns;
pub mod notifications;
pub mod payments;
pub mod portal;
pub mod settings;
pub mod stats;
pub mod templates;
pub mod types;

pub use customers::{CustomersApi, filter_customers};
pub use dns::DnsApi;
pub use notifications::NotificationsApi;
pub use payments::{PaymentsApi, completed_revenue};
pub use portal::{PortalApi, whatsapp_link};
pub use settings::SettingsApi;
pub use stats::StatsApi;
pub use templates::TemplatesApi;
pub use types::*;

use crate::gateway::Gateway;

impl Gateway {
    #[must_use]
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi::new(self)
    }

    #[must_use]
    pub fn dns(&self) -> DnsApi<'_> {
        DnsApi::new(self)
    }

    #[must_use]
    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(self)
    }

    #[must_use]
    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi::new(self)
    }

    #[must_use]
    pub fn templates(&self) -> TemplatesApi<'_> {
        TemplatesApi::new(self)
    }

    #[must_use]
    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    #[must_use]
    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }

    #[must_use]
    pub fn portal(&self) -> PortalApi<'_> {
        PortalApi::new(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::ClientConfig;
    use crate::credential::MemoryCredentialStore;
    use crate::gateway::Gateway;

    /// Gateway against `url` holding bearer token `T`.
    pub(crate) fn authed_gateway(url: &str) -> Gateway {
        let config = ClientConfig::new(url).unwrap();
        Gateway::new(&config, Arc::new(MemoryCredentialStore::with_token("T"))).unwrap()
    }

    pub(crate) fn customer_json(id: &str, username: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "username": username,
            "password": "pw",
            "dns_id": "d1",
            "expires_at": "2025-06-01T00:00:00+00:00",
            "active": true,
            "pin": "0000"
        })
    }
}
