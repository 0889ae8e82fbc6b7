//! Public customer portal (`/portal/{username}`).
//!
//! The portal is what a subscriber sees without logging in, so requests go
//! out anonymously even when an operator credential is stored.

#[cfg(test)]
#[path = "portal_test.rs"]
mod portal_test;

use time::OffsetDateTime;

use crate::api::types::PortalView;
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};
use crate::time_util::{parse_timestamp, whole_days_between};

#[derive(Debug, Clone, Copy)]
pub struct PortalApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> PortalApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the gateway; a 404 for unknown usernames.
    pub async fn view(&self, username: &str) -> Result<PortalView, ApiError> {
        self.gateway
            .send_json(ApiRequest::get(format!("/portal/{username}")).unauthenticated())
            .await
    }
}

impl PortalView {
    /// Whole days from `now` until the account expires; negative once past.
    /// `None` when the backend's expiry cannot be parsed.
    #[must_use]
    pub fn days_remaining(&self, now: OffsetDateTime) -> Option<i64> {
        parse_timestamp(&self.user.expires_at).map(|expires| whole_days_between(now, expires))
    }

    /// Expired only once a full day has passed since `expires_at`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.days_remaining(now).is_some_and(|days| days < 0)
    }

    #[must_use]
    pub fn support_link(&self) -> Option<String> {
        whatsapp_link(&self.whatsapp_support)
    }
}

/// `https://wa.me/<digits>` for a support phone, `None` if it has no digits.
#[must_use]
pub fn whatsapp_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() { None } else { Some(format!("https://wa.me/{digits}")) }
}
