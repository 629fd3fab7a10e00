use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::domain::entities::KycStatus;
use crate::kyc::application::ports::incoming::use_cases::{
    ApproveKycError, ListKycSubmissionsError, RejectKycError,
};
use crate::kyc::application::ports::outgoing::{KycSubmissionSummary, KycView};
use crate::shared::api::ApiResponse;
use crate::shared::{PageRequest, PageResult};
use crate::AppState;
use actix_web::{get, post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct KycQueueQuery {
    /// `submitted`, `verified` or `rejected`; omit for all submissions.
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproveKycRequest {
    pub admin_note: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RejectKycRequest {
    #[schema(example = "ID photo is blurry")]
    pub reason: String,
}

/// List KYC submissions
#[utoipa::path(
    get,
    path = "/api/admin/kyc",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(KycQueueQuery),
    responses(
        (status = 200, description = "Page of submissions, newest first", body = inline(SuccessResponse<PageResult<KycSubmissionSummary>>)),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/admin/kyc")]
pub async fn list_kyc_submissions_handler(
    _admin: AdminUser,
    query: web::Query<KycQueueQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let status = match query.status.as_deref().map(str::parse::<KycStatus>) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(msg)) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };
    let page = PageRequest::from_query(query.page, query.per_page);

    match data.kyc.list_submissions.execute(status, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(ListKycSubmissionsError::QueryFailed(e)) => {
            error!(error = %e, "Failed to list KYC submissions");
            ApiResponse::internal_error()
        }
    }
}

/// Approve a KYC submission
///
/// Approving an already verified user is a no-op.
#[utoipa::path(
    post,
    path = "/api/admin/kyc/{userId}/approve",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("userId" = Uuid, Path, description = "User under review")),
    request_body(content = ApproveKycRequest, description = "Optional note", content_type = "application/json"),
    responses(
        (status = 200, description = "KYC verified", body = inline(SuccessResponse<KycView>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User has not submitted KYC", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/admin/kyc/{user_id}/approve")]
pub async fn approve_kyc_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: Option<web::Json<ApproveKycRequest>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();
    let note = body.and_then(|b| b.into_inner().admin_note);

    match data
        .kyc
        .approve
        .execute(admin.id(), UserId::from(user_id), note)
        .await
    {
        Ok(view) => {
            info!(admin_id = %admin.0.user_id, user_id = %user_id, "KYC approved");
            ApiResponse::success(view)
        }
        Err(ApproveKycError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(ApproveKycError::NoSubmission) => {
            ApiResponse::conflict("NO_SUBMISSION", "User has no KYC submission to approve")
        }
        Err(ApproveKycError::RepositoryError(e)) => {
            error!(user_id = %user_id, error = %e, "KYC approval failed");
            ApiResponse::internal_error()
        }
    }
}

/// Reject a KYC submission
#[utoipa::path(
    post,
    path = "/api/admin/kyc/{userId}/reject",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("userId" = Uuid, Path, description = "User under review")),
    request_body = RejectKycRequest,
    responses(
        (status = 200, description = "KYC rejected", body = inline(SuccessResponse<KycView>)),
        (status = 400, description = "Missing reason", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Nothing to reject or already verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/admin/kyc/{user_id}/reject")]
pub async fn reject_kyc_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<RejectKycRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data
        .kyc
        .reject
        .execute(admin.id(), UserId::from(user_id), body.into_inner().reason)
        .await
    {
        Ok(view) => {
            info!(admin_id = %admin.0.user_id, user_id = %user_id, "KYC rejected");
            ApiResponse::success(view)
        }
        Err(RejectKycError::MissingReason) => {
            ApiResponse::bad_request("MISSING_REASON", "Rejection reason is required")
        }
        Err(RejectKycError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(RejectKycError::NoSubmission) => {
            ApiResponse::conflict("NO_SUBMISSION", "User has no KYC submission to reject")
        }
        Err(RejectKycError::AlreadyVerified) => {
            ApiResponse::conflict("KYC_ALREADY_VERIFIED", "KYC already verified")
        }
        Err(RejectKycError::RepositoryError(e)) => {
            error!(user_id = %user_id, error = %e, "KYC rejection failed");
            ApiResponse::internal_error()
        }
    }
}
