//! Client library for the IPTV administration backend.
//!
//! ARCHITECTURE
//! ============
//! Every backend call goes through the [`gateway::Gateway`], which attaches
//! the persisted bearer credential per request. The [`session::SessionStore`]
//! is the only writer of that credential and the single source of truth for
//! whether the operator is authenticated. Resource wrappers in [`api`] are
//! thin typed views over the gateway; they hold no state of their own.

pub mod api;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod session;
pub mod time_util;

pub use client::AdminClient;
pub use config::ClientConfig;
pub use credential::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ApiError, ConfigError, SessionError, StorageError};
pub use gateway::{ApiRequest, ApiResponse, Gateway};
pub use session::{AuthBackend, SessionPhase, SessionState, SessionStore, UserProfile};
