use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::UserView;
use crate::auth::application::use_cases::upload_avatar::{UploadAvatarError, UploadAvatarInput};
use crate::shared::api::multipart::read_multipart;
use crate::shared::api::ApiResponse;
use crate::storage::application::domain::UploadRejection;
use crate::AppState;
use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info, warn};

pub(crate) fn upload_rejection_response(field: &str, reason: &UploadRejection) -> HttpResponse {
    let message = format!("{field}: {reason}");
    match reason {
        UploadRejection::TooLarge { .. } => ApiResponse::payload_too_large("FILE_TOO_LARGE", &message),
        _ => ApiResponse::bad_request("INVALID_FILE", &message),
    }
}

/// Upload avatar
///
/// Multipart form with a single `avatar` image (jpeg, png or webp).
/// Allowed even after KYC verification.
#[utoipa::path(
    post,
    path = "/api/profile/avatar",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "`avatar` file part"),
    responses(
        (status = 200, description = "Avatar stored", body = inline(SuccessResponse<UserView>)),
        (status = 400, description = "Missing or unsupported file", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/profile/avatar")]
pub async fn upload_avatar_handler(
    user: AuthenticatedUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let read = read_multipart(payload, &["avatar"], data.settings.max_upload_bytes).await;
    let mut form = match read {
        Ok(form) => form,
        Err(e) => {
            warn!(user_id = %user.user_id, error = %e, "Unreadable avatar upload");
            return e.to_response();
        }
    };

    let Some(file) = form.take_file("avatar") else {
        return ApiResponse::bad_request("MISSING_FIELDS", "Missing required fields: avatar");
    };

    let input = UploadAvatarInput {
        user_id: user.id(),
        file_name: file.file_name,
        content_type: file.content_type,
        bytes: file.bytes,
    };

    match data.upload_avatar_use_case.execute(input).await {
        Ok(view) => {
            info!(user_id = %user.user_id, "Avatar updated");
            ApiResponse::success(view)
        }
        Err(UploadAvatarError::InvalidFile(reason)) => upload_rejection_response("avatar", &reason),
        Err(UploadAvatarError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Avatar upload failed");
            ApiResponse::internal_error()
        }
    }
}
