use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::{ProfileChanges, UserView};
use crate::auth::application::use_cases::update_profile::{UpdateUserError, UpdateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Partial profile update; omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1990-01-02")]
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileChanges {
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
            country: req.country,
            gender: req.gender,
            date_of_birth: req.date_of_birth,
            phone: req.phone,
            address_line: req.address_line,
            city: req.city,
            state: req.state,
            postal_code: req.postal_code,
        }
    }
}

/// Update profile
///
/// Rejected once the account's KYC has been verified.
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = inline(SuccessResponse<UserView>)),
        (status = 400, description = "Blank or malformed field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (
            status = 403,
            description = "Profile locked by KYC verification",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "PROFILE_LOCKED", "message": "Profile is locked after KYC verification" }
            })
        ),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[put("/api/profile")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let input = UpdateUserInput {
        user_id: user.id(),
        changes: req.into_inner().into(),
    };

    match data.update_user_profile_use_case.execute(input).await {
        Ok(view) => {
            info!(user_id = %user.user_id, "Profile updated");
            ApiResponse::success(view)
        }
        Err(UpdateUserError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(UpdateUserError::ProfileLocked) => {
            warn!(user_id = %user.user_id, "Profile update on KYC-locked account");
            ApiResponse::forbidden("PROFILE_LOCKED", "Profile is locked after KYC verification")
        }
        Err(UpdateUserError::UsernameTaken) => {
            ApiResponse::conflict("USERNAME_TAKEN", "Username already taken")
        }
        Err(UpdateUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Profile update failed");
            ApiResponse::internal_error()
        }
    }
}
