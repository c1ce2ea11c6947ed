pub mod analytics;
pub mod dashboard;
pub mod error;
pub mod exchange;
pub mod grades;
pub mod query;
pub mod session;

pub use error::DashboardError;
