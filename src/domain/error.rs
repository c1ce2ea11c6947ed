//! Error taxonomy for dashboard operations.
//!
//! Every variant is recoverable: the triggering action is rejected, a message is shown to the
//! user and the dashboard state stays exactly as it was.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A mutation targeted a record id that is not in the store.
    #[error("成绩记录不存在 (id={id})")]
    NotFound { id: u64 },

    /// A required form field is missing or outside its declared range.
    #[error("{0}")]
    Validation(String),

    /// The credential check refused the username/password pair.
    #[error("用户名或密码错误！")]
    AuthRejected,

    /// The delegated login/logout call could not be completed.
    #[error("网络错误，请稍后重试 ({0})")]
    Network(String),

    /// The action needs an authenticated session.
    #[error("请先登录")]
    SessionRequired,
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }

    /// Stable machine-readable code, used in API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::NotFound { .. } => "NOT_FOUND",
            DashboardError::Validation(_) => "VALIDATION_FAILED",
            DashboardError::AuthRejected => "AUTH_REJECTED",
            DashboardError::Network(_) => "NETWORK_FAILURE",
            DashboardError::SessionRequired => "SESSION_REQUIRED",
        }
    }
}
