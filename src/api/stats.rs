//! Dashboard counters (`/stats`).

use crate::api::types::Stats;
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct StatsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn get(&self) -> Result<Stats, ApiError> {
        self.gateway.send_json(ApiRequest::get("/stats")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::authed_gateway;

    #[tokio::test]
    async fn decodes_dashboard_counters() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/stats")
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_body(
                r#"{"total_users":12,"active_users":10,"expired_users":3,"total_dns":2,"total_revenue":420.5,
                "recent_payments":[{"id":"p1","user_id":"u1","amount":35.0,"status":"completed","method":"pix"}]}"#,
            )
            .create_async()
            .await;

        let gateway = authed_gateway(&server.url());
        let stats = gateway.stats().get().await.unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.expired_users, 3);
        assert_eq!(stats.recent_payments.len(), 1);
    }
}
