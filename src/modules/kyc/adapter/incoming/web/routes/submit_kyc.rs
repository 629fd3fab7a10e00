use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::adapter::incoming::web::routes::upload_avatar::upload_rejection_response;
use crate::kyc::application::ports::incoming::use_cases::{
    KycDocumentUpload, SubmitKycCommand, SubmitKycError,
};
use crate::kyc::application::ports::outgoing::KycView;
use crate::shared::api::multipart::{read_multipart, MultipartForm};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_multipart::Multipart;
use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

const KYC_PARTS: &[&str] = &[
    "fullName", "dob", "idType", "idNumber", "idFront", "idBack", "selfie",
];

fn take_document(form: &mut MultipartForm, name: &str) -> Option<KycDocumentUpload> {
    form.take_file(name).map(|f| KycDocumentUpload {
        file_name: f.file_name,
        content_type: f.content_type,
        bytes: f.bytes,
    })
}

/// Submit KYC
///
/// Multipart form with text fields `fullName`, `dob` (YYYY-MM-DD), `idType`
/// (`passport`, `national_id` or `drivers_license`), `idNumber` and the file
/// parts `idFront`, `idBack` and `selfie`. Nothing is stored unless every
/// field and document is present and acceptable.
#[utoipa::path(
    post,
    path = "/api/kyc/submit",
    tag = "kyc",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Identity details and documents"),
    responses(
        (status = 200, description = "Submission recorded", body = inline(SuccessResponse<KycView>)),
        (
            status = 400,
            description = "Missing fields or invalid document",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "MISSING_FIELDS", "message": "Missing required fields: idBack, selfie" }
            })
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Already submitted or verified", body = ErrorResponse),
        (status = 413, description = "Document too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/kyc/submit")]
pub async fn submit_kyc_handler(
    user: AuthenticatedUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let read = read_multipart(payload, KYC_PARTS, data.settings.max_upload_bytes).await;
    let mut form = match read {
        Ok(form) => form,
        Err(e) => {
            warn!(user_id = %user.user_id, error = %e, "Unreadable KYC upload");
            return e.to_response();
        }
    };

    let command = SubmitKycCommand {
        user_id: user.id(),
        full_name: form.text("fullName"),
        date_of_birth: form.text("dob"),
        id_type: form.text("idType"),
        id_number: form.text("idNumber"),
        id_front: take_document(&mut form, "idFront"),
        id_back: take_document(&mut form, "idBack"),
        selfie: take_document(&mut form, "selfie"),
    };

    match data.kyc.submit.execute(command).await {
        Ok(view) => {
            info!(user_id = %user.user_id, "KYC submitted");
            ApiResponse::success(view)
        }
        Err(e @ SubmitKycError::MissingFields(_)) => {
            ApiResponse::bad_request("MISSING_FIELDS", &e.to_string())
        }
        Err(SubmitKycError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(SubmitKycError::InvalidDocument { field, reason }) => {
            upload_rejection_response(field, &reason)
        }
        Err(SubmitKycError::AlreadySubmitted) => ApiResponse::conflict(
            "KYC_ALREADY_SUBMITTED",
            "KYC already submitted and awaiting review",
        ),
        Err(SubmitKycError::AlreadyVerified) => {
            ApiResponse::conflict("KYC_ALREADY_VERIFIED", "KYC already verified")
        }
        Err(SubmitKycError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "KYC submission failed");
            ApiResponse::internal_error()
        }
    }
}
