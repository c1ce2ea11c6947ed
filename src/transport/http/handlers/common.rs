use crate::domain::error::DashboardError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type ApiError = (StatusCode, Json<ApiResponse>);

pub fn status_for(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
        DashboardError::AuthRejected | DashboardError::SessionRequired => StatusCode::UNAUTHORIZED,
        DashboardError::Network(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn error_response(err: DashboardError) -> ApiError {
    (
        status_for(&err),
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
        }),
    )
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some("NOT_FOUND".to_string()),
        }),
    )
}

/// Wraps `data` in a successful envelope.
pub fn data_response<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
                code: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(format!("Failed to serialize response: {}", e)),
                code: None,
            }),
        )
            .into_response(),
    }
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the caller's display label, or the 401 to send back.
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| error_response(DashboardError::SessionRequired))?;
    let service = state.service.read().await;
    service
        .session_label(token)
        .map(str::to_string)
        .map_err(error_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn error_status_mapping() {
        assert_eq!(status_for(&DashboardError::NotFound { id: 1 }), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&DashboardError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&DashboardError::AuthRejected), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&DashboardError::SessionRequired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&DashboardError::Network("x".into())), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn bearer_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer  xyz "));
        assert_eq!(bearer_token(&headers), Some("xyz"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
