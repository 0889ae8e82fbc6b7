//! Wire DTOs for the backend's resource endpoints.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON exactly. Timestamps stay as strings
//! on the wire and are parsed on demand with [`crate::time_util`], because
//! older records carry naive datetimes. Update types skip absent fields so
//! a partial update never blanks a value.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_pin() -> String {
    "0000".to_owned()
}

// =============================================================================
// CUSTOMERS (/users)
// =============================================================================

/// An IPTV subscriber account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub username: String,
    pub password: String,
    pub dns_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    /// Playlist URL generated by the backend from the DNS server.
    #[serde(default)]
    pub lista_m3u: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub expires_at: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_pin")]
    pub pin: String,
    #[serde(default)]
    pub plan_price: Option<f64>,
    #[serde(default)]
    pub pay_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewCustomer {
    pub username: String,
    pub password: String,
    pub dns_id: String,
    /// Expiry as `YYYY-MM-DD` or a full ISO 8601 timestamp.
    pub expires_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_url: Option<String>,
}

/// Result of asking the backend to fetch a customer's M3U playlist.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct M3uValidation {
    pub valid: bool,
    pub message: String,
}

// =============================================================================
// DNS (/dns)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsServer {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewDnsServer {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DnsServerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

// =============================================================================
// PAYMENTS (/payments)
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Pix,
    Card,
    Cash,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPayment {
    pub user_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// SETTINGS (/settings)
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub whatsapp_support: String,
    pub welcome_message: String,
    pub whatsapp_enabled: bool,
    pub whatsapp_url: String,
    pub whatsapp_instance: String,
    pub whatsapp_token: String,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_support: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_token: Option<String>,
}

// =============================================================================
// TEMPLATES / NOTIFICATIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: String,
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request to message a customer over WhatsApp. Without `phone` the backend
/// falls back to the support number; without `message` it renders its
/// expiry reminder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WhatsAppMessage {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WhatsAppDelivery {
    pub success: bool,
}

// =============================================================================
// DASHBOARD / PORTAL
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_users: u64,
    pub active_users: u64,
    pub expired_users: u64,
    pub total_dns: u64,
    pub total_revenue: f64,
    #[serde(default)]
    pub recent_payments: Vec<Payment>,
}

/// Public account-status page for one customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalView {
    pub user: Customer,
    #[serde(default)]
    pub dns: Option<DnsServer>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub whatsapp_support: String,
}

/// `{"message": "..."}` acknowledgement returned by deletes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
