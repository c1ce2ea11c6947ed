use crate::domain::session::Credentials;
use crate::transport::http::handlers::common::{bearer_token, data_response, require_session};
use crate::transport::http::types::{json_422, ApiResponse, AppState, LoginError, LoginResponse, SessionInfo};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials accepted; carries the bearer token", body = LoginResponse),
        (status = 401, description = "Credentials refused (no token in the body)", body = LoginError),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<Credentials>, JsonRejection>,
) -> impl IntoResponse {
    let Json(credentials) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, r#"{"username": "...", "password": "..."}"#).into_response();
        }
    };

    let allowlist = state.service.read().await.allowlist().clone();
    let username = credentials.username.clone();
    let verified =
        tokio::task::spawn_blocking(move || allowlist.verify(&credentials).map(str::to_string)).await;
    let verified = match verified {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("> API: password verification task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse {
                    success: false,
                    data: None,
                    error: Some("Password verification failed".to_string()),
                    code: None,
                }),
            )
                .into_response();
        }
    };

    match verified {
        Ok(display_label) => {
            let grant = state.service.write().await.open_session(display_label);
            tracing::info!("> API: '{}' signed in", username);
            (
                StatusCode::OK,
                Json(LoginResponse {
                    token: grant.token,
                    display_label: grant.display_label,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::info!("> API: login refused for '{}'", username);
            (
                StatusCode::UNAUTHORIZED,
                Json(LoginError {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Always succeeds; revokes the bearer token when it is known", body = ApiResponse)
    )
)]
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let revoked = match bearer_token(&headers) {
        Some(token) => state.service.write().await.logout(token),
        None => false,
    };
    data_response(StatusCode::OK, &serde_json::json!({ "revoked": revoked }))
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Display label of the bearer token's session", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse)
    )
)]
pub async fn session_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    match require_session(&state, &headers).await {
        Ok(display_label) => data_response(StatusCode::OK, &SessionInfo { display_label }),
        Err(resp) => resp.into_response(),
    }
}

