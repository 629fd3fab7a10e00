use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::login_user::SessionResponse;
use crate::auth::application::use_cases::verify_user_email::VerifyUserEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub user_id: Uuid,
    /// Raw token from the verification email
    pub token: String,
}

/// Verify email address
///
/// Consumes the single-use verification token and starts a session.
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    tag = "auth",
    request_body = VerifyEmailRequest,
    responses(
        (
            status = 200,
            description = "Email verified, session issued",
            body = inline(SuccessResponse<SessionResponse>)
        ),
        (
            status = 400,
            description = "Token does not match or has expired",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVALID_OR_EXPIRED_TOKEN", "message": "Invalid or expired verification token" }
            })
        ),
        (
            status = 404,
            description = "Unknown user",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "USER_NOT_FOUND", "message": "User not found" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/verify-email")]
pub async fn verify_user_email_handler(
    req: web::Json<VerifyEmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = req.user_id;
    info!(user_id = %user_id, "Email verification attempt");

    match data
        .verify_user_email_use_case
        .execute(user_id, &req.token)
        .await
    {
        Ok(output) => ApiResponse::success(SessionResponse {
            token: output.token,
            expires_at: output.expires_at,
            user: output.user,
        }),
        Err(VerifyUserEmailError::InvalidOrExpiredToken) => {
            warn!(user_id = %user_id, "Invalid or expired verification token");
            ApiResponse::bad_request(
                "INVALID_OR_EXPIRED_TOKEN",
                "Invalid or expired verification token",
            )
        }
        Err(VerifyUserEmailError::UserNotFound) => {
            warn!(user_id = %user_id, "Verification for unknown user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user_id, error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}
