use crate::domain::analytics::{
    class_comparison, score_distribution, student_trend, subject_correlation, subject_summary,
};
use crate::transport::http::handlers::common::{data_response, not_found, require_session};
use crate::transport::http::types::{AnalysisQuery, ApiResponse, AppState, CorrelationQuery};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/analysis",
    params(AnalysisQuery),
    responses(
        (status = 200, description = "Chart datasets: subject averages, class comparison, distribution, monthly trend", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn overview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AnalysisQuery>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    data_response(StatusCode::OK, &service.analytics(query.class_name.as_deref()))
}

#[utoipa::path(
    get,
    path = "/api/analysis/class/{className}",
    params(
        ("className" = String, Path, description = "Class name, e.g. 三年级一班")
    ),
    responses(
        (status = 200, description = "Per-subject summary and score distribution of the class", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "The class has no records", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn class_analysis_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_name): Path<String>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    let rows: Vec<_> = service
        .records()
        .iter()
        .filter(|r| r.class_name == class_name)
        .collect();
    if rows.is_empty() {
        return not_found(format!("班级 {} 没有成绩数据", class_name)).into_response();
    }
    data_response(
        StatusCode::OK,
        &serde_json::json!({
            "className": class_name,
            "recordCount": rows.len(),
            "subjects": subject_summary(rows.iter().copied()),
            "distribution": score_distribution(rows.iter().copied()),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/analysis/correlation/{className}",
    params(
        ("className" = String, Path, description = "Class name"),
        CorrelationQuery
    ),
    responses(
        (status = 200, description = "Pearson correlation of the two subjects", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "No student of the class has both subjects", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn correlation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_name): Path<String>,
    Query(query): Query<CorrelationQuery>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    let rows = service.records().iter().filter(|r| r.class_name == class_name);
    match subject_correlation(rows, &query.subject1, &query.subject2) {
        Some(c) => data_response(StatusCode::OK, &c),
        None => not_found(format!(
            "班级 {} 没有同时拥有 {} 和 {} 成绩的学生",
            class_name, query.subject1, query.subject2
        ))
        .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/analysis/comparison/{className}",
    params(
        ("className" = String, Path, description = "Class name")
    ),
    responses(
        (status = 200, description = "Each student's average against the class average", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "The class has no records", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn comparison_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(class_name): Path<String>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    match class_comparison(service.records(), &class_name) {
        Some(c) => data_response(StatusCode::OK, &c),
        None => not_found(format!("班级 {} 没有成绩数据", class_name)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/analysis/student/{studentId}/trend",
    params(
        ("studentId" = String, Path, description = "Student number, e.g. 2023001")
    ),
    responses(
        (status = 200, description = "Chronological scores per subject with improvement", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "Unknown student", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn student_trend_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let service = state.service.read().await;
    match student_trend(service.records(), &student_id) {
        Some(t) => data_response(StatusCode::OK, &t),
        None => not_found(format!("学生 {} 没有成绩数据", student_id)).into_response(),
    }
}
