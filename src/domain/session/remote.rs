//! Delegated authentication against a dashboard server's `/api/login` and `/api/logout`.

use super::{AuthGrant, Authenticator, Credentials, RESTORED_LABEL};
use crate::domain::error::DashboardError;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LoginReply {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    display_label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RemoteAuthenticator {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteAuthenticator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    /// Any reply body carrying a `token` is a success, whatever the status code; a body without
    /// one is a rejection.
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, DashboardError> {
        let resp = self
            .client
            .post(self.url("/api/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        let reply: LoginReply = resp
            .json()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        match reply.token {
            Some(token) if !token.is_empty() => Ok(AuthGrant {
                token,
                display_label: reply
                    .display_label
                    .unwrap_or_else(|| RESTORED_LABEL.to_string()),
            }),
            _ => Err(DashboardError::AuthRejected),
        }
    }

    async fn logout(&self, token: &str) -> Result<(), DashboardError> {
        self.client
            .post(self.url("/api/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;
        Ok(())
    }
}
