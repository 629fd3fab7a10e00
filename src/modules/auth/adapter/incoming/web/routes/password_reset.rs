use crate::api::schemas::{ErrorResponse, MessageResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::resend_verification::EmailRequest;
use crate::auth::application::use_cases::request_password_reset::RequestPasswordResetError;
use crate::auth::application::use_cases::reset_password::{ResetPasswordError, ResetPasswordInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

const FORGOT_MESSAGE: &str = "If the account exists, a password reset email has been sent.";

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Raw token from the reset email
    pub token: String,
    #[schema(example = "n3w-passw0rd")]
    pub new_password: String,
}

/// Request a password reset
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Malformed email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/forgot-password")]
pub async fn forgot_password_handler(
    req: web::Json<EmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.request_password_reset_use_case.execute(&req.email).await {
        Ok(()) => ApiResponse::success(MessageResponse::new(FORGOT_MESSAGE)),
        Err(RequestPasswordResetError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(e) => {
            error!(error = %e, "Password reset request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Reset password with an emailed token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = inline(SuccessResponse<MessageResponse>)),
        (
            status = 400,
            description = "Invalid input, or token invalid or expired",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVALID_OR_EXPIRED_TOKEN", "message": "Invalid or expired reset token" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/reset-password")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let input = ResetPasswordInput {
        email: req.email,
        token: req.token,
        new_password: req.new_password,
    };

    match data.reset_password_use_case.execute(input).await {
        Ok(()) => {
            info!("Password reset completed");
            ApiResponse::success(MessageResponse::new("Password has been reset"))
        }
        Err(ResetPasswordError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(ResetPasswordError::InvalidOrExpiredToken) => {
            warn!("Password reset with invalid token");
            ApiResponse::bad_request(
                "INVALID_OR_EXPIRED_TOKEN",
                "Invalid or expired reset token",
            )
        }
        Err(e) => {
            error!(error = %e, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}
