use crate::domain::error::DashboardError;
use crate::domain::exchange::{accept_import, template_csv, TEMPLATE_FILENAME};
use crate::transport::http::handlers::common::{data_response, error_response, require_session};
use crate::transport::http::types::{ApiResponse, AppState, ImportUpload};
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

/// ASCII fallback plus the RFC 5987 form of the template filename.
fn content_disposition() -> String {
    format!(
        "attachment; filename=\"grade-template.csv\"; filename*=UTF-8''{}",
        urlencoding::encode(TEMPLATE_FILENAME)
    )
}

/// Filename of the `file` part; the content itself is drained unread.
async fn uploaded_filename(mut multipart: Multipart) -> Result<Option<String>, DashboardError> {
    let mut filename = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DashboardError::validation(format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().map(str::to_string);
        let content = field
            .bytes()
            .await
            .map_err(|e| DashboardError::validation(format!("Invalid multipart body: {}", e.body_text())))?;
        tracing::debug!("> API: import upload {:?} ({} bytes)", name, content.len());
        filename = name;
    }
    Ok(filename)
}

#[utoipa::path(
    get,
    path = "/api/template/grades.csv",
    responses(
        (status = 200, description = "CSV import template (UTF-8 with BOM)", body = String, content_type = "text/csv"),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn template_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, content_disposition()),
        ],
        template_csv(),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/import/grades",
    request_body(content = ImportUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload acknowledged (no records are parsed)", body = ApiResponse),
        (status = 400, description = "Malformed form, missing file or unsupported extension", body = ApiResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn import_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    upload: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let multipart = match upload {
        Ok(m) => m,
        Err(e) => {
            return error_response(DashboardError::validation(format!(
                "Expected a multipart/form-data upload: {}",
                e.body_text()
            )))
            .into_response();
        }
    };

    let filename = match uploaded_filename(multipart).await {
        Ok(name) => name.unwrap_or_default(),
        Err(e) => return error_response(e).into_response(),
    };
    match accept_import(&filename) {
        Ok(receipt) => data_response(StatusCode::OK, &receipt),
        Err(e) => error_response(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_encodes_filename() {
        let value = content_disposition();
        assert!(value.starts_with("attachment;"));
        assert!(value.contains("filename*=UTF-8''%E6%88%90"));
        assert!(value.ends_with(".csv"));
    }
}
