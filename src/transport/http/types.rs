use crate::app::dashboard_service::DashboardService;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RwLock<DashboardService>>,
    /// Root of the front-end bundle served for non-API paths.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(service: DashboardService, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
            static_dir: static_dir.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code (`NOT_FOUND`, `VALIDATION_FAILED`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Successful `/api/login` reply. The bare `token` field is what clients key success on.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub display_label: String,
}

/// Refused `/api/login` reply: no `token` field.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LoginError {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub display_label: String,
}

/// Query of `GET /api/grades`. Missing filters place no constraint.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GradeQuery {
    /// Case-insensitive substring of the student name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    /// 1-based page; out-of-range values are re-clamped.
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalysisQuery {
    /// Restrict to one class; empty or missing means all classes.
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CorrelationQuery {
    #[serde(default = "default_subject1")]
    pub subject1: String,
    #[serde(default = "default_subject2")]
    pub subject2: String,
}

fn default_subject1() -> String {
    "数学".to_string()
}

fn default_subject2() -> String {
    "语文".to_string()
}

/// `multipart/form-data` body of `/api/import/grades`.
#[derive(ToSchema)]
pub struct ImportUpload {
    /// The spreadsheet; only its filename is checked.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
            code: None,
        }),
    )
}
