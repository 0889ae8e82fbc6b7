//! The session store: sole writer of the persisted credential.
//!
//! TRADE-OFFS
//! ==========
//! Verification failures are absorbed and logged rather than returned: a
//! rejected or unreachable `/auth/me` means "not logged in", not a fault.
//! Login and register failures are returned verbatim for display.
//!
//! In-flight requests are never cancelled by logout. Instead a verification
//! result is only applied if the persisted credential is still the one that
//! was verified, so the last write to storage wins and `user` is never left
//! paired with a missing credential.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use super::backend::{AuthBackend, LoginRequest, RegisterRequest, TokenResponse};
use super::state::{SessionPhase, SessionState, UserProfile};
use crate::credential::{Credential, CredentialStore};
use crate::error::{ApiError, SessionError};

pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    /// Verifications and login/register calls still awaiting the backend.
    in_flight: AtomicUsize,
}

/// Holds one slot of the store's in-flight count until dropped, so a
/// cancelled future still releases it.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SessionStore {
    /// Seed session state from the persisted credential.
    ///
    /// The store starts in [`SessionPhase::Verifying`] when a credential is
    /// stored, otherwise [`SessionPhase::Unauthenticated`]. Call
    /// [`SessionStore::initialize`] to resolve it.
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, credentials: Arc<dyn CredentialStore>) -> Self {
        let stored = credentials.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read persisted credential");
            None
        });
        let (state, _) = watch::channel(SessionState::seeded(stored));
        Self { backend, credentials, state, in_flight: AtomicUsize::new(0) }
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receive every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until no verification is in progress and return that state.
    pub async fn loaded(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|s| !s.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Resolve the startup state: verify a stored credential, or settle as
    /// unauthenticated without any network call.
    pub async fn initialize(&self) {
        match self.credentials.load() {
            Ok(Some(_)) => self.verify().await,
            Ok(None) => {
                tracing::debug!("no stored credential; session unauthenticated");
                self.state.send_replace(SessionState::default());
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted credential; clearing session");
                self.clear_session();
            }
        }
    }

    /// Confirm the stored credential with `GET /auth/me`.
    ///
    /// Any failure clears the credential and the session. Always finishes
    /// with `loading == false`.
    pub async fn verify(&self) {
        let credential = match self.credentials.load() {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                self.state.send_replace(SessionState::default());
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted credential; clearing session");
                self.clear_session();
                return;
            }
        };

        self.state.send_modify(|s| {
            s.credential = Some(credential.clone());
            s.loading = true;
        });

        let pending = InFlight::enter(&self.in_flight);
        let outcome = self.backend.current_user().await;
        drop(pending);
        match outcome {
            Ok(user) => self.apply_verified(&credential, user),
            Err(e) => self.reject_verified(&credential, &e),
        }
    }

    /// Log in with email and password, then verify the returned token.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged when login is refused, or a
    /// storage error when the token cannot be persisted. Persisted state is
    /// untouched on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, SessionError> {
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let attempt = self.begin_attempt();
        let result = self.backend.login(&request).await;
        self.establish(attempt, result, "login").await
    }

    /// Create an operator account; success also establishes a session.
    ///
    /// # Errors
    ///
    /// Same contract as [`SessionStore::login`].
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<TokenResponse, SessionError> {
        let request = RegisterRequest { email: email.to_owned(), name: name.to_owned(), password: password.to_owned() };
        let attempt = self.begin_attempt();
        let result = self.backend.register(&request).await;
        self.establish(attempt, result, "register").await
    }

    /// Forget the credential and identity. Idempotent; never fails.
    pub fn logout(&self) {
        if self.state.borrow().credential.is_some() {
            tracing::info!("logging out");
        }
        self.clear_session();
    }

    /// Log out when `error` says the credential was rejected (HTTP 401).
    /// Returns whether the session was invalidated.
    pub fn invalidate_on(&self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        tracing::info!("backend rejected credential; invalidating session");
        self.clear_session();
        true
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn begin_attempt(&self) -> InFlight<'_> {
        let attempt = InFlight::enter(&self.in_flight);
        self.state.send_modify(|s| s.loading = true);
        attempt
    }

    /// A failed attempt ends loading only when nothing else is still waiting
    /// on the backend; a pending verification settles the state itself.
    fn end_failed_attempt(&self, attempt: InFlight<'_>) {
        drop(attempt);
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            self.state.send_modify(|s| s.loading = false);
        }
    }

    async fn establish(
        &self,
        attempt: InFlight<'_>,
        result: Result<TokenResponse, ApiError>,
        action: &'static str,
    ) -> Result<TokenResponse, SessionError> {
        let token = match result {
            Ok(token) => token,
            Err(e) => {
                tracing::info!(action, error = %e, status = e.status(), "authentication refused");
                self.end_failed_attempt(attempt);
                return Err(e.into());
            }
        };

        // Persist strictly before verifying so the gateway attaches the new token.
        let credential = Credential::new(token.access_token.clone());
        if let Err(e) = self.credentials.store(&credential) {
            tracing::warn!(action, error = %e, "could not persist credential");
            self.end_failed_attempt(attempt);
            return Err(e.into());
        }
        drop(attempt);

        self.verify().await;
        Ok(token)
    }

    fn apply_verified(&self, verified: &Credential, user: UserProfile) {
        match self.credentials.load() {
            Ok(Some(current)) if current == *verified => {
                tracing::info!(email = %user.email, "session verified");
                self.state.send_replace(SessionState {
                    user: Some(user),
                    credential: Some(current),
                    loading: false,
                });
            }
            Ok(Some(_)) => {
                tracing::debug!("credential replaced during verification; discarding result");
                self.settle_stale(verified);
            }
            Ok(None) => {
                tracing::debug!("credential cleared during verification; discarding result");
                self.state.send_replace(SessionState::default());
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not re-read credential after verification; clearing session");
                self.clear_session();
            }
        }
    }

    fn reject_verified(&self, verified: &Credential, error: &ApiError) {
        if let Ok(Some(current)) = self.credentials.load() {
            if current != *verified {
                tracing::debug!("credential replaced during verification; ignoring stale failure");
                self.settle_stale(verified);
                return;
            }
        }
        tracing::warn!(error = %error, code = error.error_code(), "session verification failed; clearing credential");
        self.clear_session();
    }

    /// End loading for a superseded verification unless a newer one has
    /// already taken over the in-memory state.
    fn settle_stale(&self, verified: &Credential) {
        self.state.send_if_modified(|s| {
            if s.credential.as_ref() == Some(verified) && s.loading {
                s.loading = false;
                true
            } else {
                false
            }
        });
    }

    fn clear_session(&self) {
        if let Err(e) = self.credentials.clear() {
            tracing::warn!(error = %e, "could not clear persisted credential");
        }
        self.state.send_replace(SessionState::default());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("state", &*self.state.borrow()).finish_non_exhaustive()
    }
}
