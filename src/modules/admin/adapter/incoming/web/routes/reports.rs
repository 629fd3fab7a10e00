use crate::admin::application::ports::incoming::use_cases::{
    AdminDashboard, PlatformAnalytics, PlatformReportError,
};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;

/// Platform analytics
///
/// User totals, KYC funnel and registrations by country.
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregates", body = inline(SuccessResponse<PlatformAnalytics>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/admin/analytics")]
pub async fn analytics_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.admin.analytics.execute().await {
        Ok(report) => ApiResponse::success(report),
        Err(PlatformReportError::QueryFailed(e)) => {
            error!(error = %e, "Failed to compute analytics");
            ApiResponse::internal_error()
        }
    }
}

/// Admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Headline counts and newest users", body = inline(SuccessResponse<AdminDashboard>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/admin/dashboard")]
pub async fn dashboard_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.admin.dashboard.execute().await {
        Ok(dashboard) => ApiResponse::success(dashboard),
        Err(PlatformReportError::QueryFailed(e)) => {
            error!(error = %e, "Failed to build dashboard");
            ApiResponse::internal_error()
        }
    }
}
