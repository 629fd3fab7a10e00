use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request body for user registration.
///
/// Missing string fields deserialize as empty and are reported by validation.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUserRequest {
    #[schema(example = "a@x.com")]
    pub email: String,

    /// At least 8 characters
    #[schema(example = "pw123456")]
    pub password: String,

    #[schema(example = "Jo")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "NG")]
    pub country: String,

    pub username: Option<String>,
    pub phone: Option<String>,

    /// Id of the user who referred this account
    pub referrer_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    pub user_id: Uuid,
    pub email: String,
    #[schema(example = "Account created. Please check your email to verify your account.")]
    pub message: String,
    /// Only returned when the server is configured to expose tokens (non-production).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
}

fn map_create_user_error(err: CreateUserError, email: &str) -> HttpResponse {
    match err {
        CreateUserError::InvalidInput(msg) => {
            warn!(email = %email, error = %msg, "Invalid registration input");
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        CreateUserError::EmailAlreadyExists => {
            warn!(email = %email, "Email already registered");
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", "Email already registered")
        }
        CreateUserError::UsernameAlreadyExists => {
            warn!(email = %email, "Username already taken");
            ApiResponse::conflict("USERNAME_TAKEN", "Username already taken")
        }
        CreateUserError::InvalidReferrer => {
            warn!(email = %email, "Unknown referrer id");
            ApiResponse::bad_request("INVALID_REFERRER", "Referrer does not exist")
        }
        other => {
            error!(email = %email, error = %other, "Unhandled user creation error");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new user
///
/// Creates an unverified account and mails a single-use verification token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (
            status = 201,
            description = "Account created",
            body = inline(SuccessResponse<RegisterUserResponse>),
            example = json!({
                "success": true,
                "data": {
                    "userId": "123e4567-e89b-12d3-a456-426614174000",
                    "email": "a@x.com",
                    "message": "Account created. Please check your email to verify your account.",
                    "verificationToken": "q3V1c2VyLXRva2Vu"
                }
            })
        ),
        (
            status = 400,
            description = "Validation error or unknown referrer",
            body = ErrorResponse,
            examples(
                ("Missing field" = (value = json!({
                    "success": false,
                    "error": { "code": "VALIDATION_ERROR", "message": "firstName is required" }
                }))),
                ("Unknown referrer" = (value = json!({
                    "success": false,
                    "error": { "code": "INVALID_REFERRER", "message": "Referrer does not exist" }
                })))
            )
        ),
        (
            status = 409,
            description = "Email or username already in use",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "EMAIL_ALREADY_EXISTS", "message": "Email already registered" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let email = req.email.trim().to_lowercase();

    info!(email = %email, "User registration attempt");

    let input = CreateUserInput {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
        country: req.country,
        username: req.username,
        phone: req.phone,
        referrer_id: req.referrer_id,
    };

    match data.register_user_orchestrator.register_user(input).await {
        Ok(output) => {
            info!(user_id = %output.user_id, email = %output.email, "User registered");

            let verification_token = data
                .settings
                .expose_verification_token
                .then_some(output.verification_token);

            ApiResponse::created(RegisterUserResponse {
                user_id: output.user_id,
                email: output.email,
                message: output.message,
                verification_token,
            })
        }
        Err(UserRegistrationError::CreateUserFailed(e)) => map_create_user_error(e, &email),
    }
}
