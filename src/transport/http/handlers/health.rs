use crate::transport::http::handlers::common::data_response;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; reports the number of grade records held", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let records = state.service.read().await.store().len();
    data_response(
        StatusCode::OK,
        &serde_json::json!({ "status": "ok", "records": records }),
    )
}
