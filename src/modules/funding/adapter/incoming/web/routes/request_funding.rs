use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::funding::application::domain::entities::{FundingKind, FundingRequest};
use crate::funding::application::ports::incoming::use_cases::{
    CreateFundingRequestCommand, CreateFundingRequestError, ListFundingRequestsError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingRequestBody {
    /// Integer minor units of `currency`.
    #[schema(example = 150000)]
    pub amount_minor: i64,
    #[schema(example = "USD")]
    pub currency: String,
    #[schema(example = "bank_transfer")]
    pub method: String,
    pub reference: Option<String>,
}

async fn create(
    user: &AuthenticatedUser,
    kind: FundingKind,
    body: FundingRequestBody,
    data: &AppState,
) -> HttpResponse {
    let command = CreateFundingRequestCommand {
        user_id: user.id(),
        kind,
        amount_minor: body.amount_minor,
        currency: body.currency,
        method: body.method,
        reference: body.reference,
    };

    match data.funding.create.execute(command).await {
        Ok(request) => ApiResponse::created(request),
        Err(CreateFundingRequestError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(CreateFundingRequestError::KycRequired) => ApiResponse::forbidden(
            "KYC_REQUIRED",
            "KYC verification is required for withdrawals",
        ),
        Err(CreateFundingRequestError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, kind = %kind, error = %e, "Funding request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Request a deposit
#[utoipa::path(
    post,
    path = "/api/funding/deposits",
    tag = "funding",
    security(("bearer_auth" = [])),
    request_body = FundingRequestBody,
    responses(
        (status = 201, description = "Deposit request created", body = inline(SuccessResponse<FundingRequest>)),
        (status = 400, description = "Invalid amount, currency or method", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/funding/deposits")]
pub async fn request_deposit_handler(
    user: AuthenticatedUser,
    body: web::Json<FundingRequestBody>,
    data: web::Data<AppState>,
) -> impl Responder {
    create(&user, FundingKind::Deposit, body.into_inner(), &data).await
}

/// Request a withdrawal
///
/// Only available once the caller's KYC is verified.
#[utoipa::path(
    post,
    path = "/api/funding/withdrawals",
    tag = "funding",
    security(("bearer_auth" = [])),
    request_body = FundingRequestBody,
    responses(
        (status = 201, description = "Withdrawal request created", body = inline(SuccessResponse<FundingRequest>)),
        (status = 400, description = "Invalid amount, currency or method", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "KYC not verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/funding/withdrawals")]
pub async fn request_withdrawal_handler(
    user: AuthenticatedUser,
    body: web::Json<FundingRequestBody>,
    data: web::Data<AppState>,
) -> impl Responder {
    create(&user, FundingKind::Withdrawal, body.into_inner(), &data).await
}

/// Funding requests of the caller, newest first
#[utoipa::path(
    get,
    path = "/api/funding/requests",
    tag = "funding",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's requests", body = inline(SuccessResponse<Vec<FundingRequest>>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/funding/requests")]
pub async fn my_funding_requests_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.funding.list_mine.execute(user.id()).await {
        Ok(requests) => ApiResponse::success(requests),
        Err(ListFundingRequestsError::QueryFailed(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to list funding requests");
            ApiResponse::internal_error()
        }
    }
}
