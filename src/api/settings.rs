//! System settings (`/settings`): support contact, welcome text and the
//! WhatsApp gateway credentials.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use crate::api::types::{Settings, SettingsUpdate};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct SettingsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> SettingsApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// The backend creates default settings on first read.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn get(&self) -> Result<Settings, ApiError> {
        self.gateway.send_json(ApiRequest::get("/settings")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn update(&self, update: &SettingsUpdate) -> Result<Settings, ApiError> {
        self.gateway.send_json(ApiRequest::put("/settings").json(update)?).await
    }
}
