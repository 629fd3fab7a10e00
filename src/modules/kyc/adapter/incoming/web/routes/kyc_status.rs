use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::kyc::application::ports::incoming::use_cases::GetKycStatusError;
use crate::kyc::application::ports::outgoing::KycView;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;

/// KYC status of the caller
#[utoipa::path(
    get,
    path = "/api/kyc/status",
    tag = "kyc",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current KYC record", body = inline(SuccessResponse<KycView>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/kyc/status")]
pub async fn kyc_status_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.kyc.get_status.execute(user.id()).await {
        Ok(view) => ApiResponse::success(view),
        Err(GetKycStatusError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetKycStatusError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load KYC status");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::tests::support::app_state_builder::{InMemoryBackend, TestAppStateBuilder};
    use crate::tests::support::auth_helper::{bearer, bearer_for};
    use crate::tests::support::fixtures::{submitted_kyc_user, verified_user};
    use crate::tests::support::test_app;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_fresh_user_has_no_kyc() {
        let backend = InMemoryBackend::default();
        let user = verified_user("a@x.com");
        backend.users.insert(user.clone());
        let app = test_app!(TestAppStateBuilder::new(backend); kyc_status_handler);

        let req = test::TestRequest::get()
            .uri("/api/kyc/status")
            .insert_header(("Authorization", bearer_for(&user)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "none");
        assert_eq!(body["data"]["verified"], false);
    }

    #[actix_web::test]
    async fn test_submitted_record_exposes_documents() {
        let backend = InMemoryBackend::default();
        let user = submitted_kyc_user("a@x.com");
        backend.users.insert(user.clone());
        let app = test_app!(TestAppStateBuilder::new(backend); kyc_status_handler);

        let req = test::TestRequest::get()
            .uri("/api/kyc/status")
            .insert_header(("Authorization", bearer_for(&user)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "submitted");
        assert_eq!(body["data"]["idType"], "passport");
        assert_eq!(
            body["data"]["documents"]["selfiePath"],
            "/uploads/kyc/selfie.jpg"
        );
    }

    #[actix_web::test]
    async fn test_deleted_user_is_not_found() {
        let app = test_app!(TestAppStateBuilder::default(); kyc_status_handler);

        let req = test::TestRequest::get()
            .uri("/api/kyc/status")
            .insert_header(("Authorization", bearer(uuid::Uuid::new_v4(), Role::User)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
