//! Payment records (`/payments`).

#[cfg(test)]
#[path = "payments_test.rs"]
mod payments_test;

use crate::api::types::{MessageResponse, NewPayment, Payment, PaymentStatus};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct PaymentsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn list(&self) -> Result<Vec<Payment>, ApiError> {
        self.gateway.send_json(ApiRequest::get("/payments")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway; a 404 when the customer is unknown.
    pub async fn create(&self, new: &NewPayment) -> Result<Payment, ApiError> {
        self.gateway.send_json(ApiRequest::post("/payments").json(new)?).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.gateway.send_json(ApiRequest::delete(format!("/payments/{id}"))).await
    }
}

/// Revenue over `payments`: only completed payments count.
#[must_use]
pub fn completed_revenue(payments: &[Payment]) -> f64 {
    payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Completed)
        .map(|p| p.amount)
        .sum()
}
