pub mod router;
pub mod static_files;
pub mod types;
pub mod handlers {
    pub mod analytics;
    pub mod common;
    pub mod exchange;
    pub mod grades;
    pub mod health;
    pub mod reports;
    pub mod session;
}

pub use router::{build_app, create_router, ApiDoc};
pub use types::AppState;
