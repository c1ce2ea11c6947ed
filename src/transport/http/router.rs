use crate::domain::analytics::{
    ClassComparison, ClassReport, MonthlyTrend, ScoreDistribution, ScoreSummary, StudentReport,
    StudentStanding, StudentTrend, SubjectCorrelation, SubjectResult, SubjectTrend, TrendPoint,
};
use crate::domain::dashboard::{AnalyticsView, ChartData, Dataset, GradeTableView, PaginationView};
use crate::domain::exchange::{ImportFormat, ImportReceipt};
use crate::domain::grades::{GradeFields, GradeInput, GradeRecord};
use crate::domain::query::FilterCriteria;
use crate::domain::session::Credentials;
use crate::transport::http::handlers::{analytics, exchange, grades, health, reports, session};
use crate::transport::http::static_files;
use crate::transport::http::types::{
    ApiResponse, AppState, ImportUpload, LoginError, LoginResponse, SessionInfo,
};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        session::login_handler,
        session::logout_handler,
        session::session_handler,
        grades::list_grades_handler,
        grades::create_grade_handler,
        grades::update_grade_handler,
        grades::delete_grade_handler,
        analytics::overview_handler,
        analytics::class_analysis_handler,
        analytics::correlation_handler,
        analytics::comparison_handler,
        analytics::student_trend_handler,
        reports::student_report_handler,
        reports::class_report_handler,
        exchange::template_handler,
        exchange::import_handler
    ),
    components(schemas(
        ApiResponse,
        Credentials,
        LoginResponse,
        LoginError,
        SessionInfo,
        ImportUpload,
        GradeRecord,
        GradeFields,
        GradeInput,
        FilterCriteria,
        GradeTableView,
        PaginationView,
        AnalyticsView,
        ChartData,
        Dataset,
        MonthlyTrend,
        ScoreSummary,
        ScoreDistribution,
        SubjectCorrelation,
        TrendPoint,
        SubjectTrend,
        StudentTrend,
        StudentStanding,
        ClassComparison,
        SubjectResult,
        StudentReport,
        ClassReport,
        ImportFormat,
        ImportReceipt
    )),
    modifiers(&BearerSecurity)
)]
pub struct ApiDoc;

/// API routes plus the front-end bundle under `/dist` and as the fallback.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/login", post(session::login_handler))
        .route("/api/logout", post(session::logout_handler))
        .route("/api/session", get(session::session_handler))
        .route(
            "/api/grades",
            get(grades::list_grades_handler).post(grades::create_grade_handler),
        )
        .route(
            "/api/grades/:id",
            put(grades::update_grade_handler).delete(grades::delete_grade_handler),
        )
        .route("/api/analysis", get(analytics::overview_handler))
        .route("/api/analysis/class/:class_name", get(analytics::class_analysis_handler))
        .route(
            "/api/analysis/correlation/:class_name",
            get(analytics::correlation_handler),
        )
        .route(
            "/api/analysis/comparison/:class_name",
            get(analytics::comparison_handler),
        )
        .route(
            "/api/analysis/student/:student_id/trend",
            get(analytics::student_trend_handler),
        )
        .route("/api/reports/student/:student_id", get(reports::student_report_handler))
        .route("/api/reports/class/:class_name", get(reports::class_report_handler))
        .route("/api/template/grades.csv", get(exchange::template_handler))
        .route("/api/import/grades", post(exchange::import_handler))
        .merge(static_files::static_routes(&app_state.static_dir))
        .with_state(app_state)
}

/// Any origin; the methods and headers the dashboard front-end sends.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// The full application: routes, Swagger UI, CORS and request tracing.
pub fn build_app(app_state: AppState) -> Router {
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
