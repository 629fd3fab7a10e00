use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::UserView;
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Login request from client
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequestDto {
    #[schema(example = "a@x.com")]
    pub email: String,

    #[schema(example = "pw123456")]
    pub password: String,
}

/// Session issued by login and by email verification.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token for the `Authorization` header
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

/// User login
///
/// Exchanges email and password for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Login successful",
            body = inline(SuccessResponse<SessionResponse>)
        ),
        (
            status = 400,
            description = "Malformed email or empty password",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": "Invalid email format" }
            })
        ),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVALID_CREDENTIALS", "message": "Invalid email or password" }
            })
        ),
        (
            status = 403,
            description = "Email not verified yet",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "EMAIL_NOT_VERIFIED", "message": "Email address has not been verified" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();

    let request = match LoginRequest::new(req.email, req.password) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected login request");
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    let email = request.email().to_string();
    info!(email = %email, "Login attempt");

    match data.login_user_use_case.execute(request).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "User logged in");
            ApiResponse::success(SessionResponse {
                token: session.token,
                expires_at: session.expires_at,
                user: session.user,
            })
        }
        Err(LoginError::InvalidCredentials) => {
            warn!(email = %email, "Invalid login credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        Err(LoginError::EmailNotVerified) => {
            warn!(email = %email, "Login blocked, email not verified");
            ApiResponse::forbidden(
                "EMAIL_NOT_VERIFIED",
                "Email address has not been verified",
            )
        }
        Err(e) => {
            error!(email = %email, error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
