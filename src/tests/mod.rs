pub mod support;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use crate::admin::adapter::incoming::web::routes::get_user_handler;
use crate::auth::adapter::incoming::web::routes::{
    auth_me_handler, login_user_handler, logout_user_handler, register_user_handler,
    update_profile_handler, verify_user_email_handler,
};
use crate::funding::adapter::incoming::web::routes::{
    approve_funding_request_handler, request_withdrawal_handler,
};
use crate::kyc::adapter::incoming::web::routes::{
    approve_kyc_handler, kyc_status_handler, reject_kyc_handler, submit_kyc_handler,
};
use crate::referral::adapter::incoming::web::routes::referral_stats_handler;
use support::app_state_builder::{InMemoryBackend, TestAppStateBuilder};
use support::auth_helper::bearer_for;
use support::fixtures::admin_user;
use support::multipart::{MultipartBuilder, JPEG_BYTES};
use support::test_app;

fn registration(email: &str, referrer_id: Option<&str>) -> Value {
    let mut body = json!({
        "email": email,
        "password": "pw123456",
        "firstName": "Jo",
        "lastName": "Doe",
        "country": "NG"
    });
    if let Some(referrer) = referrer_id {
        body["referrerId"] = json!(referrer);
    }
    body
}

fn kyc_form() -> (String, Vec<u8>) {
    MultipartBuilder::new()
        .text("fullName", "Jo Doe")
        .text("dob", "1990-01-02")
        .text("idType", "passport")
        .text("idNumber", "A1234567")
        .file("idFront", "front.jpg", "image/jpeg", JPEG_BYTES)
        .file("idBack", "back.jpg", "image/jpeg", JPEG_BYTES)
        .file("selfie", "selfie.jpg", "image/jpeg", JPEG_BYTES)
        .build()
}

fn auth(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_register_verify_login_and_fetch_me() {
    let backend = InMemoryBackend::default();
    let app = test_app!(
        TestAppStateBuilder::new(backend.clone());
        register_user_handler,
        verify_user_email_handler,
        login_user_handler,
        auth_me_handler,
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration("jo@x.com", None))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = registered["data"]["userId"].as_str().unwrap().to_string();
    let token = registered["data"]["verificationToken"]
        .as_str()
        .unwrap()
        .to_string();

    // Unverified accounts cannot log in
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "jo@x.com", "password": "pw123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .set_json(json!({ "userId": user_id, "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The verification token is single-use
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .set_json(json!({ "userId": user_id, "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "JO@x.com", "password": "pw123456" }))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;
    let session_token = session["data"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(auth(&session_token))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["data"]["email"], "jo@x.com");
    assert_eq!(me["data"]["emailVerified"], true);
    assert_eq!(me["data"]["kycStatus"], "none");
}

#[actix_web::test]
async fn test_logout_revokes_session() {
    let backend = InMemoryBackend::default();
    let user = support::fixtures::user_with_password("jo@x.com", "pw123456");
    backend.users.insert(user);
    let app = test_app!(
        TestAppStateBuilder::new(backend.clone());
        login_user_handler,
        logout_user_handler,
        auth_me_handler,
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "jo@x.com", "password": "pw123456" }))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;
    let token = session["data"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_kyc_review_cycle_locks_profile_and_unlocks_withdrawals() {
    let backend = InMemoryBackend::default();
    let user = support::fixtures::verified_user("jo@x.com");
    let admin = admin_user("admin@x.com");
    backend.users.insert(user.clone());
    backend.users.insert(admin.clone());
    let app = test_app!(
        TestAppStateBuilder::new(backend.clone());
        submit_kyc_handler,
        kyc_status_handler,
        approve_kyc_handler,
        reject_kyc_handler,
        update_profile_handler,
        request_withdrawal_handler,
        approve_funding_request_handler,
        get_user_handler,
    );
    let user_auth = ("Authorization", bearer_for(&user));
    let admin_auth = ("Authorization", bearer_for(&admin));
    let user_id = user.id.value();

    // Withdrawals need verified KYC
    let withdrawal = json!({ "amountMinor": 50_000, "currency": "USD", "method": "bank_transfer" });
    let req = test::TestRequest::post()
        .uri("/api/funding/withdrawals")
        .insert_header(user_auth.clone())
        .set_json(&withdrawal)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let (content_type, body) = kyc_form();
    let req = test::TestRequest::post()
        .uri("/api/kyc/submit")
        .insert_header(user_auth.clone())
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(backend.storage.len(), 3);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/kyc/{user_id}/reject"))
        .insert_header(admin_auth.clone())
        .set_json(json!({ "reason": "Selfie is blurry" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/kyc/status")
        .insert_header(user_auth.clone())
        .to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["data"]["status"], "rejected");
    assert_eq!(status["data"]["rejectionReason"], "Selfie is blurry");

    // Profile edits are still allowed while unverified
    let req = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header(user_auth.clone())
        .set_json(json!({ "city": "Lagos" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (content_type, body) = kyc_form();
    let req = test::TestRequest::post()
        .uri("/api/kyc/submit")
        .insert_header(user_auth.clone())
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/kyc/{user_id}/approve"))
        .insert_header(admin_auth.clone())
        .set_json(json!({ "adminNote": "Matches passport" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = backend.users.get(user.id).unwrap();
    assert!(stored.kyc.verified);
    assert_eq!(stored.kyc.reviewed_by, Some(admin.id.value()));

    let req = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header(user_auth.clone())
        .set_json(json!({ "city": "Abuja" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        backend.users.get(user.id).unwrap().profile.city.as_deref(),
        Some("Lagos")
    );

    let req = test::TestRequest::post()
        .uri("/api/funding/withdrawals")
        .insert_header(user_auth.clone())
        .set_json(&withdrawal)
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["data"]["status"], "pending");
    let request_id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/funding/{request_id}/approve"))
        .insert_header(admin_auth.clone())
        .to_request();
    let approved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(approved["data"]["status"], "approved");

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/users/{user_id}"))
        .insert_header(admin_auth)
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["data"]["kyc"]["verified"], true);
    assert_eq!(detail["data"]["kyc"]["adminNote"], "Matches passport");
}

#[actix_web::test]
async fn test_referrals_count_once_referee_verifies() {
    let backend = InMemoryBackend::default();
    let referrer = support::fixtures::verified_user("ref@x.com");
    backend.users.insert(referrer.clone());
    let app = test_app!(
        TestAppStateBuilder::new(backend.clone());
        register_user_handler,
        verify_user_email_handler,
        referral_stats_handler,
    );
    let referral_code = referrer.id.value().to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration("friend@x.com", Some(&referral_code)))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;

    let stats_request = || {
        test::TestRequest::get()
            .uri("/api/referrals/me")
            .insert_header(("Authorization", bearer_for(&referrer)))
            .to_request()
    };

    let stats: Value = test::call_and_read_body_json(&app, stats_request()).await;
    assert_eq!(stats["data"]["verifiedReferrals"], 0);
    assert_eq!(stats["data"]["pendingReferrals"], 1);

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .set_json(json!({
            "userId": registered["data"]["userId"],
            "token": registered["data"]["verificationToken"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: Value = test::call_and_read_body_json(&app, stats_request()).await;
    assert_eq!(stats["data"]["verifiedReferrals"], 1);
    assert_eq!(stats["data"]["pendingReferrals"], 0);
    assert_eq!(stats["data"]["referralCode"], referral_code);
}

#[actix_web::test]
async fn test_unknown_referrer_is_rejected_at_registration() {
    let backend = InMemoryBackend::default();
    let app = test_app!(TestAppStateBuilder::new(backend.clone()); register_user_handler);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration(
            "friend@x.com",
            Some("00000000-0000-0000-0000-000000000001"),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.users.count(), 0);
}
