use super::{Authenticator, Credentials, SessionState, TokenStore, RESTORED_LABEL};
use crate::domain::error::DashboardError;

/// Owns the session state, the credential check and the persisted token.
///
/// Methods take `&mut self`, so one gate never has two logins in flight.
pub struct SessionGate<A, S> {
    authenticator: A,
    tokens: S,
    state: SessionState,
}

impl<A: Authenticator, S: TokenStore> SessionGate<A, S> {
    /// A gate starts `Anonymous`; call [`SessionGate::restore`] to pick up a persisted token.
    pub fn new(authenticator: A, tokens: S) -> Self {
        Self {
            authenticator,
            tokens,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    pub fn token_store(&self) -> &S {
        &self.tokens
    }

    /// Startup check. Presence of a token is enough; its value is not verified.
    pub fn restore(&mut self) -> &SessionState {
        self.state = match self.tokens.load() {
            Some(_) => SessionState::Authenticated {
                display_label: RESTORED_LABEL.to_string(),
            },
            None => SessionState::Anonymous,
        };
        &self.state
    }

    /// On rejection or failure the state is left exactly as it was.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&SessionState, DashboardError> {
        let credentials = Credentials::new(username, password);
        let grant = match self.authenticator.login(&credentials).await {
            Ok(g) => g,
            Err(e) => {
                tracing::info!("> SessionGate: login for '{}' refused: {}", username, e);
                return Err(e);
            }
        };

        if let Err(e) = self.tokens.save(&grant.token) {
            tracing::warn!("> SessionGate: could not persist session token: {}", e);
        }
        tracing::info!("> SessionGate: '{}' signed in as {}", username, grant.display_label);
        self.state = SessionState::Authenticated {
            display_label: grant.display_label,
        };
        Ok(&self.state)
    }

    /// Always ends `Anonymous` with the token cleared, whatever the backend answers.
    pub async fn logout(&mut self) -> &SessionState {
        if let Some(token) = self.tokens.load() {
            if let Err(e) = self.authenticator.logout(&token).await {
                tracing::warn!("> SessionGate: remote logout failed (ignored): {}", e);
            }
        }
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("> SessionGate: could not clear session token: {}", e);
        }
        self.state = SessionState::Anonymous;
        &self.state
    }
}
