//! Playlist DNS servers (`/dns`).

#[cfg(test)]
#[path = "dns_test.rs"]
mod dns_test;

use crate::api::types::{DnsServer, DnsServerUpdate, MessageResponse, NewDnsServer};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct DnsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> DnsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn list(&self) -> Result<Vec<DnsServer>, ApiError> {
        self.gateway.send_json(ApiRequest::get("/dns")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn create(&self, new: &NewDnsServer) -> Result<DnsServer, ApiError> {
        self.gateway.send_json(ApiRequest::post("/dns").json(new)?).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn update(&self, id: &str, update: &DnsServerUpdate) -> Result<DnsServer, ApiError> {
        self.gateway.send_json(ApiRequest::put(format!("/dns/{id}")).json(update)?).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.gateway.send_json(ApiRequest::delete(format!("/dns/{id}"))).await
    }
}
