use super::{AuthGrant, Authenticator, Credentials};
use crate::crypto::hashing::{hash_password, issue_token, verify_password};
use crate::domain::error::DashboardError;
use async_trait::async_trait;

#[derive(Debug, Clone)]
struct Account {
    username: String,
    /// Argon2 PHC string.
    password_hash: String,
    display_label: String,
}

/// Closed set of accepted accounts. Passwords are kept only as salted Argon2 hashes.
#[derive(Debug, Clone)]
pub struct Allowlist {
    accounts: Vec<Account>,
}

impl Allowlist {
    pub fn empty() -> Self {
        Self { accounts: Vec::new() }
    }

    /// The two built-in dashboard accounts.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::empty()
            .with_account("teacher", "teacher123", "教师用户")?
            .with_account("admin", "admin123", "管理员")
    }

    pub fn with_account(
        self,
        username: &str,
        password: &str,
        display_label: &str,
    ) -> anyhow::Result<Self> {
        let password_hash = hash_password(password)?;
        Ok(self.with_password_hash(username, password_hash, display_label))
    }

    /// Adds an account from an already-computed PHC hash string.
    pub fn with_password_hash(
        mut self,
        username: &str,
        password_hash: impl Into<String>,
        display_label: &str,
    ) -> Self {
        self.accounts.push(Account {
            username: username.to_string(),
            password_hash: password_hash.into(),
            display_label: display_label.to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Returns the display label for accepted credentials.
    ///
    /// Argon2 verification is CPU-bound; the HTTP server runs it on a blocking thread.
    pub fn verify(&self, credentials: &Credentials) -> Result<&str, DashboardError> {
        self.accounts
            .iter()
            .find(|a| a.username == credentials.username)
            .filter(|a| verify_password(&credentials.password, &a.password_hash))
            .map(|a| a.display_label.as_str())
            .ok_or(DashboardError::AuthRejected)
    }
}

#[async_trait]
impl Authenticator for Allowlist {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, DashboardError> {
        let label = self.verify(credentials)?;
        Ok(AuthGrant {
            token: issue_token(),
            display_label: label.to_string(),
        })
    }

    async fn logout(&self, _token: &str) -> Result<(), DashboardError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hashing::hash_password;

    #[test]
    fn builtin_accounts() {
        let list = Allowlist::builtin().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.verify(&Credentials::new("teacher", "teacher123")), Ok("教师用户"));
        assert_eq!(list.verify(&Credentials::new("admin", "admin123")), Ok("管理员"));
    }

    #[test]
    fn anything_else_is_rejected() {
        let list = Allowlist::builtin().unwrap();
        for (u, p) in [
            ("teacher", "admin123"),
            ("Teacher", "teacher123"),
            ("teacher", ""),
            ("", ""),
            ("guest", "guest"),
        ] {
            assert_eq!(
                list.verify(&Credentials::new(u, p)),
                Err(DashboardError::AuthRejected),
                "{u}/{p}"
            );
        }
    }

    #[test]
    fn precomputed_hashes_are_accepted() {
        let hash = hash_password("s3cret").unwrap();
        let list = Allowlist::empty().with_password_hash("head", hash, "教务主任");
        assert_eq!(list.verify(&Credentials::new("head", "s3cret")), Ok("教务主任"));
        assert!(list.verify(&Credentials::new("head", "secret")).is_err());

        let broken = Allowlist::empty().with_password_hash("head", "plain-text", "教务主任");
        assert_eq!(
            broken.verify(&Credentials::new("head", "plain-text")),
            Err(DashboardError::AuthRejected)
        );
    }

    #[tokio::test]
    async fn login_issues_fresh_tokens() {
        let list = Allowlist::builtin().unwrap();
        let creds = Credentials::new("teacher", "teacher123");
        let a = list.login(&creds).await.unwrap();
        let b = list.login(&creds).await.unwrap();
        assert_eq!(a.display_label, "教师用户");
        assert_ne!(a.token, b.token);
    }
}
