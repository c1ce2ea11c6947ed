//! Session gate: the authentication state machine in front of the dashboard.
//!
//! `Anonymous -> Authenticated` on accepted credentials, back to `Anonymous` on logout.
//! There is no expiry transition; a persisted token is trusted for as long as it exists.

pub mod allowlist;
pub mod gate;
pub mod remote;
pub mod token_store;

pub use allowlist::Allowlist;
pub use gate::SessionGate;
pub use remote::RemoteAuthenticator;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

use crate::domain::error::DashboardError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Label shown after a session is restored from a persisted token alone.
pub const RESTORED_LABEL: &str = "教师用户";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { display_label: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn display_label(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated { display_label } => Some(display_label),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// What a successful login hands back: the opaque token to persist and the label to display.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub display_label: String,
}

impl std::fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGrant")
            .field("token", &"<redacted>")
            .field("display_label", &self.display_label)
            .finish()
    }
}

/// Credential check behind the gate: a local allowlist or a delegated remote call.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, DashboardError>;

    /// Revokes `token` where the backend keeps server-side state. Callers treat failures as
    /// non-fatal.
    async fn logout(&self, token: &str) -> Result<(), DashboardError>;
}
