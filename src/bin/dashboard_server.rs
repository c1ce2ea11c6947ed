// src/bin/dashboard_server.rs

use grade_dashboard::infra::{config, logging};
use grade_dashboard::transport;
use grade_dashboard::DashboardService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    // --- Service Initialization ---
    tracing::info!("> Initializing DashboardService...");
    let service = DashboardService::from_config()?;

    let static_dir = config::static_dir();
    if !static_dir.join("index.html").exists() {
        tracing::warn!(
            "> No index.html under {:?}; only the JSON API will be useful.",
            static_dir
        );
    }
    let app_state = transport::http::AppState::new(service, static_dir);
    tracing::info!("> DashboardService initialized successfully.");

    // --- API Server Initialization ---
    let addr = config::socket_addr()?;
    let app = transport::http::build_app(app_state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("> Dashboard server listening on http://{}", addr);
    tracing::info!(
        "> Open http://localhost:{} in your browser to view the application",
        addr.port()
    );
    tracing::info!("> Swagger UI available at http://localhost:{}/swagger-ui", addr.port());

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("> Shutdown signal received (Ctrl+C). Grade records are in-memory only and are discarded.");
        }
    }

    Ok(())
}
