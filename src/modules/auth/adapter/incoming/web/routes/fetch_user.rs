use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::UserView;
use crate::auth::application::use_cases::fetch_profile::FetchUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use tracing::{error, warn};

async fn current_user(user: AuthenticatedUser, data: &AppState) -> HttpResponse {
    match data.fetch_user_profile_use_case.execute(user.id()).await {
        Ok(view) => ApiResponse::success(view),
        Err(FetchUserError::UserNotFound) => {
            warn!(user_id = %user.user_id, "Token refers to a missing user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchUserError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load current user");
            ApiResponse::internal_error()
        }
    }
}

/// Current user
///
/// Sanitized record of the bearer: never contains the password hash.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = inline(SuccessResponse<UserView>)),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/auth/me")]
pub async fn auth_me_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    current_user(user, &data).await
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = inline(SuccessResponse<UserView>)),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    )
)]
#[get("/api/profile/me")]
pub async fn profile_me_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    current_user(user, &data).await
}
