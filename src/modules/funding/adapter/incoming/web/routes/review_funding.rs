use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::funding::application::domain::entities::{FundingKind, FundingRequest, FundingStatus};
use crate::funding::application::ports::incoming::use_cases::{
    ListFundingRequestsError, ReviewFundingRequestError,
};
use crate::funding::application::ports::outgoing::FundingFilter;
use crate::shared::api::ApiResponse;
use crate::shared::{PageRequest, PageResult};
use crate::AppState;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FundingQueueQuery {
    /// `pending`, `approved` or `rejected`.
    pub status: Option<String>,
    /// `deposit` or `withdrawal`.
    pub kind: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl FundingQueueQuery {
    fn filter(&self) -> Result<FundingFilter, String> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<FundingStatus>)
            .transpose()?;
        let kind = self
            .kind
            .as_deref()
            .map(str::parse::<FundingKind>)
            .transpose()?;
        Ok(FundingFilter { status, kind })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproveFundingRequest {
    pub admin_note: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RejectFundingRequest {
    #[schema(example = "Transfer not received")]
    pub reason: String,
}

fn review_error_response(request_id: Uuid, e: ReviewFundingRequestError) -> HttpResponse {
    match e {
        ReviewFundingRequestError::NotFound => {
            ApiResponse::not_found("FUNDING_REQUEST_NOT_FOUND", "Funding request not found")
        }
        ReviewFundingRequestError::AlreadyReviewed => ApiResponse::conflict(
            "ALREADY_REVIEWED",
            "Funding request has already been reviewed",
        ),
        ReviewFundingRequestError::MissingReason => {
            ApiResponse::bad_request("MISSING_REASON", "Rejection reason is required")
        }
        other => {
            error!(request_id = %request_id, error = %other, "Funding review failed");
            ApiResponse::internal_error()
        }
    }
}

/// List funding requests
#[utoipa::path(
    get,
    path = "/api/admin/funding",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(FundingQueueQuery),
    responses(
        (status = 200, description = "Page of requests, newest first", body = inline(SuccessResponse<PageResult<FundingRequest>>)),
        (status = 400, description = "Unknown status or kind", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/admin/funding")]
pub async fn list_funding_requests_handler(
    _admin: AdminUser,
    query: web::Query<FundingQueueQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };
    let page = PageRequest::from_query(query.page, query.per_page);

    match data.funding.list_all.execute(filter, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(ListFundingRequestsError::QueryFailed(e)) => {
            error!(error = %e, "Failed to list funding requests");
            ApiResponse::internal_error()
        }
    }
}

/// Approve a funding request
#[utoipa::path(
    post,
    path = "/api/admin/funding/{id}/approve",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Funding request id")),
    request_body(content = ApproveFundingRequest, description = "Optional note", content_type = "application/json"),
    responses(
        (status = 200, description = "Request approved", body = inline(SuccessResponse<FundingRequest>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown request", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/admin/funding/{id}/approve")]
pub async fn approve_funding_request_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: Option<web::Json<ApproveFundingRequest>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request_id = path.into_inner();
    let note = body.and_then(|b| b.into_inner().admin_note);

    match data.funding.approve.execute(admin.id(), request_id, note).await {
        Ok(request) => {
            info!(admin_id = %admin.0.user_id, request_id = %request_id, "Funding request approved");
            ApiResponse::success(request)
        }
        Err(e) => review_error_response(request_id, e),
    }
}

/// Reject a funding request
#[utoipa::path(
    post,
    path = "/api/admin/funding/{id}/reject",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Funding request id")),
    request_body = RejectFundingRequest,
    responses(
        (status = 200, description = "Request rejected", body = inline(SuccessResponse<FundingRequest>)),
        (status = 400, description = "Missing reason", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown request", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/admin/funding/{id}/reject")]
pub async fn reject_funding_request_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<RejectFundingRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request_id = path.into_inner();

    match data
        .funding
        .reject
        .execute(admin.id(), request_id, body.into_inner().reason)
        .await
    {
        Ok(request) => {
            info!(admin_id = %admin.0.user_id, request_id = %request_id, "Funding request rejected");
            ApiResponse::success(request)
        }
        Err(e) => review_error_response(request_id, e),
    }
}
