use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::referral::application::ports::incoming::use_cases::{
    GetReferralStatsError, ReferralStats,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;

/// Referral summary of the caller
///
/// The referral code is the caller's user id; new users pass it as
/// `referrerId` at registration.
#[utoipa::path(
    get,
    path = "/api/referrals/me",
    tag = "referrals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Referral code and counts", body = inline(SuccessResponse<ReferralStats>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/referrals/me")]
pub async fn referral_stats_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.referral.get_stats.execute(user.id()).await {
        Ok(stats) => ApiResponse::success(stats),
        Err(GetReferralStatsError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetReferralStatsError::QueryFailed(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load referral stats");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::{InMemoryBackend, TestAppStateBuilder};
    use crate::tests::support::auth_helper::bearer_for;
    use crate::tests::support::fixtures::{unverified_user, verified_user};
    use crate::tests::support::test_app;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_counts_verified_and_pending_referrals() {
        let backend = InMemoryBackend::default();
        let referrer = verified_user("ref@x.com");
        backend.users.insert(referrer.clone());

        let mut a = verified_user("a@x.com");
        a.referrer_id = Some(referrer.id);
        let mut b = verified_user("b@x.com");
        b.referrer_id = Some(referrer.id);
        let mut c = unverified_user("c@x.com");
        c.referrer_id = Some(referrer.id);
        for u in [a, b, c, verified_user("d@x.com")] {
            backend.users.insert(u);
        }

        let app = test_app!(TestAppStateBuilder::new(backend); referral_stats_handler);
        let req = test::TestRequest::get()
            .uri("/api/referrals/me")
            .insert_header(("Authorization", bearer_for(&referrer)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["referralCode"], referrer.id.value().to_string());
        assert_eq!(body["data"]["verifiedReferrals"], 2);
        assert_eq!(body["data"]["pendingReferrals"], 1);
        assert_eq!(body["data"]["referrals"].as_array().unwrap().len(), 3);
    }
}
