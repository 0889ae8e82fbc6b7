//! WhatsApp delivery through the backend's gateway integration.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use serde_json::Value;

use crate::api::types::{WhatsAppDelivery, WhatsAppMessage};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct NotificationsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Send a WhatsApp message about a customer.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway; a 400 with detail
    /// `"WhatsApp not configured"` when the integration is disabled.
    pub async fn send_whatsapp(&self, message: &WhatsAppMessage) -> Result<WhatsAppDelivery, ApiError> {
        self.gateway
            .send_json(ApiRequest::post("/notifications/send-whatsapp").json(message)?)
            .await
    }

    /// Pairing QR code from the WhatsApp gateway, passed through untouched.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn qrcode(&self) -> Result<Value, ApiError> {
        self.gateway.send_json(ApiRequest::get("/whatsapp/qrcode")).await
    }
}
