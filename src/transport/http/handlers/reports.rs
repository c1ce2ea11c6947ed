use crate::domain::analytics::{class_report, student_report};
use crate::transport::http::handlers::common::{data_response, not_found, require_session};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/reports/student/{studentId}",
    params(
        ("studentId" = String, Path, description = "Student number")
    ),
    responses(
        (status = 200, description = "Latest score, ranks and evaluation per subject", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "Unknown student", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn student_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    match student_report(service.records(), &student_id) {
        Some(r) => data_response(StatusCode::OK, &r),
        None => not_found(format!("学生 {} 没有成绩数据", student_id)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/reports/class/{className}",
    params(
        ("className" = String, Path, description = "Class name")
    ),
    responses(
        (status = 200, description = "Class average, subject table and score distribution", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "The class has no records", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn class_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_name): Path<String>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    match class_report(service.records(), &class_name) {
        Some(r) => data_response(StatusCode::OK, &r),
        None => not_found(format!("班级 {} 没有成绩数据", class_name)).into_response(),
    }
}
