//! Reusable message templates (`/templates`).

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use crate::api::types::{MessageResponse, MessageTemplate};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

#[derive(Debug, Clone, Copy)]
pub struct TemplatesApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> TemplatesApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn list(&self) -> Result<Vec<MessageTemplate>, ApiError> {
        self.gateway.send_json(ApiRequest::get("/templates")).await
    }

    /// The backend takes `name` and `message` as query parameters, not a body.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn create(&self, name: &str, message: &str) -> Result<MessageTemplate, ApiError> {
        let request = ApiRequest::post("/templates").query("name", name).query("message", message);
        self.gateway.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.gateway.send_json(ApiRequest::delete(format!("/templates/{id}"))).await
    }
}
