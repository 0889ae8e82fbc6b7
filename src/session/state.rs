//! Session snapshot types published by the store.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};

use crate::credential::Credential;

/// Authenticated operator identity as returned by `GET /auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend identifier. Older backends omit it from `/auth/me`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub name: String,
}

/// Coarse session status derived from [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Verifying,
    Authenticated,
}

/// Snapshot of the client's belief about who is logged in.
///
/// `user` is only ever set together with `credential`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub credential: Option<Credential>,
    pub loading: bool,
}

impl SessionState {
    pub(crate) fn seeded(credential: Option<Credential>) -> Self {
        let loading = credential.is_some();
        Self { user: None, credential, loading }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Verifying
        } else if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }
}
