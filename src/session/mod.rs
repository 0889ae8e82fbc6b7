//! Operator session: credential lifecycle and authenticated identity.
//!
//! ARCHITECTURE
//! ============
//! [`SessionStore`] owns the persisted credential and the confirmed
//! [`UserProfile`]. It talks to the backend only through [`AuthBackend`],
//! which the gateway implements, so front ends and tests inject whichever
//! backend they need instead of reaching for a global.
//!
//! STATE MACHINE
//! =============
//! `Unauthenticated -> Verifying` on login/register, `Verifying ->
//! Authenticated | Unauthenticated` when verification resolves, and
//! `Authenticated -> Unauthenticated` on logout or a reported 401. There is
//! no terminal state.

pub mod backend;
pub mod state;
pub mod store;

pub use backend::{AuthBackend, LoginRequest, RegisterRequest, TokenResponse};
pub use state::{SessionPhase, SessionState, UserProfile};
pub use store::SessionStore;
