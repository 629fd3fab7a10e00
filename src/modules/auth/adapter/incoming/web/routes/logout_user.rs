use crate::api::schemas::{ErrorResponse, MessageResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::logout_user::LogoutRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::{error, info};

/// Log out
///
/// Revokes the presented session token until it would have expired.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session revoked", body = inline(SuccessResponse<MessageResponse>)),
        (status = 401, description = "Missing, invalid or already revoked token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = LogoutRequest {
        jti: user.jti,
        user_id: user.user_id,
        expires_at: user.expires_at,
    };

    match data.logout_user_use_case.execute(request).await {
        Ok(()) => {
            info!(user_id = %user.user_id, "User logged out");
            ApiResponse::success(MessageResponse::new("Logged out successfully"))
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Logout failed");
            ApiResponse::internal_error()
        }
    }
}
