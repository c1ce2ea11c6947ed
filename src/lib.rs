pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::dashboard_service::DashboardService;
pub use crypto::hashing::{hash_password, issue_token};
pub use domain::dashboard::DashboardState;
pub use domain::error::DashboardError;
pub use domain::grades::{GradeFields, GradeInput, GradeRecord, GradeStore};
pub use domain::query::{FilterCriteria, PaginationState, PAGE_SIZE};
pub use domain::session::{SessionGate, SessionState};
