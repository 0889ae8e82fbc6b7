//! Customer accounts (`/users`).

#[cfg(test)]
#[path = "customers_test.rs"]
mod customers_test;

use crate::api::types::{Customer, CustomerUpdate, M3uValidation, MessageResponse, NewCustomer};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct CustomersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> CustomersApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        self.gateway.send_json(ApiRequest::get("/users")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway; a 404 when `new.dns_id` is unknown.
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer, ApiError> {
        self.gateway.send_json(ApiRequest::post("/users").json(new)?).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn update(&self, id: &str, update: &CustomerUpdate) -> Result<Customer, ApiError> {
        self.gateway.send_json(ApiRequest::put(format!("/users/{id}")).json(update)?).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.gateway.send_json(ApiRequest::delete(format!("/users/{id}"))).await
    }

    /// Ask the backend to fetch the customer's playlist. Reachability is the
    /// payload, so an unreachable playlist is `Ok` with `valid == false`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway; a 400 when no playlist is configured.
    pub async fn validate_m3u(&self, id: &str) -> Result<M3uValidation, ApiError> {
        self.gateway.send_json(ApiRequest::post(format!("/users/{id}/validate"))).await
    }
}

/// Customers whose username or MAC address contains `term`, ignoring case.
/// The term is matched as typed, surrounding whitespace included; an empty
/// term keeps everything.
#[must_use]
pub fn filter_customers<'c>(customers: &'c [Customer], term: &str) -> Vec<&'c Customer> {
    let needle = term.to_lowercase();
    customers
        .iter()
        .filter(|c| {
            c.username.to_lowercase().contains(&needle)
                || c.mac_address.as_deref().is_some_and(|mac| mac.to_lowercase().contains(&needle))
        })
        .collect()
}
