//! The front-end bundle, served for every path the API router does not claim.
//!
//! `/` maps to `index.html`; `/dist/<p>` and any other `/<p>` map to `<static_dir>/<p>`.

use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}

/// `/dist` plus the router-wide fallback, both backed by `static_dir`.
pub fn static_routes<S>(static_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let bundle = || ServeDir::new(static_dir).not_found_service(not_found.into_service());
    Router::new()
        .nest_service("/dist", bundle())
        .fallback_service(bundle())
}
