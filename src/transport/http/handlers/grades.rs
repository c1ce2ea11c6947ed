use crate::domain::grades::GradeInput;
use crate::domain::query::FilterCriteria;
use crate::transport::http::handlers::common::{data_response, error_response, require_session};
use crate::transport::http::types::{json_422, ApiResponse, AppState, GradeQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

const GRADE_BODY: &str = r#"{"studentName", "studentId", "className", "subject", "score", "examDate": "YYYY-MM-DD"}"#;

#[utoipa::path(
    get,
    path = "/api/grades",
    params(GradeQuery),
    responses(
        (status = 200, description = "One page of the filtered grade table", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_grades_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GradeQuery>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let criteria = FilterCriteria::new(
        query.name.unwrap_or_default(),
        query.subject.unwrap_or_default(),
        query.class_name.unwrap_or_default(),
    );
    let page = query.page.unwrap_or(1);

    let service = state.service.read().await;
    data_response(StatusCode::OK, &service.grade_table(&criteria, page))
}

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = GradeInput,
    responses(
        (status = 201, description = "Record created", body = ApiResponse),
        (status = 400, description = "Form validation failed", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_grade_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<GradeInput>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, GRADE_BODY).into_response(),
    };

    let mut service = state.service.write().await;
    match service.create_grade(input) {
        Ok(record) => {
            tracing::info!("> API: created grade record {}", record.id);
            data_response(StatusCode::CREATED, &record)
        }
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(
        ("id" = u64, Path, description = "Record id")
    ),
    request_body = GradeInput,
    responses(
        (status = 200, description = "Record replaced", body = ApiResponse),
        (status = 400, description = "Form validation failed", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "No record with this id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_grade_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    request: Result<Json<GradeInput>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, GRADE_BODY).into_response(),
    };

    let mut service = state.service.write().await;
    match service.update_grade(id, input) {
        Ok(record) => data_response(StatusCode::OK, &record),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(
        ("id" = u64, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record removed; returns it", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse),
        (status = 404, description = "No record with this id", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_grade_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }

    let mut service = state.service.write().await;
    match service.delete_grade(id) {
        Ok(record) => {
            tracing::info!("> API: deleted grade record {}", record.id);
            data_response(StatusCode::OK, &record)
        }
        Err(e) => error_response(e).into_response(),
    }
}
