use crate::api::schemas::{ErrorResponse, MessageResponse, SuccessResponse};
use crate::auth::application::use_cases::resend_verification::ResendVerificationError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmailRequest {
    #[schema(example = "a@x.com")]
    pub email: String,
}

const RESEND_MESSAGE: &str =
    "If the account exists and is not yet verified, a new verification email has been sent.";

/// Resend verification email
///
/// Always answers the same way so that account existence is not revealed.
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = "auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Malformed email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/resend-verification")]
pub async fn resend_verification_handler(
    req: web::Json<EmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.resend_verification_use_case.execute(&req.email).await {
        Ok(()) => {
            info!("Verification resend processed");
            ApiResponse::success(MessageResponse::new(RESEND_MESSAGE))
        }
        Err(ResendVerificationError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(e) => {
            error!(error = %e, "Verification resend failed");
            ApiResponse::internal_error()
        }
    }
}
