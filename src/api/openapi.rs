use crate::api::schemas::{ErrorDetail, ErrorResponse, MessageResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::admin::adapter::incoming::web::routes::{reports, users};
use crate::admin::application::ports::incoming::use_cases::{
    AdminDashboard, AdminUserDetail, PlatformAnalytics,
};
use crate::auth::adapter::incoming::web::routes::{
    fetch_user, login_user, logout_user, password_reset, register_user, resend_verification,
    update_profile, upload_avatar, verify_email,
};
use crate::auth::application::domain::entities::{Role, UserView};
use crate::funding::adapter::incoming::web::routes::{request_funding, review_funding};
use crate::funding::application::domain::entities::{FundingKind, FundingRequest, FundingStatus};
use crate::kyc::adapter::incoming::web::routes::{kyc_status, review_kyc, submit_kyc};
use crate::kyc::application::domain::entities::{IdType, KycDocuments, KycStatus};
use crate::kyc::application::ports::outgoing::KycView;
use crate::referral::adapter::incoming::web::routes::referral_stats;
use crate::referral::application::ports::incoming::use_cases::ReferralStats;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invest Platform API",
        version = "1.0.0",
        description = "Accounts, KYC review, referrals and funding requests for the investment platform",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Auth
        register_user::register_user_handler,
        verify_email::verify_user_email_handler,
        resend_verification::resend_verification_handler,
        login_user::login_user_handler,
        logout_user::logout_user_handler,
        password_reset::forgot_password_handler,
        password_reset::reset_password_handler,
        fetch_user::auth_me_handler,

        // Profile
        fetch_user::profile_me_handler,
        update_profile::update_profile_handler,
        upload_avatar::upload_avatar_handler,

        // KYC
        submit_kyc::submit_kyc_handler,
        kyc_status::kyc_status_handler,

        // Referrals
        referral_stats::referral_stats_handler,

        // Funding
        request_funding::request_deposit_handler,
        request_funding::request_withdrawal_handler,
        request_funding::my_funding_requests_handler,

        // Admin
        review_kyc::list_kyc_submissions_handler,
        review_kyc::approve_kyc_handler,
        review_kyc::reject_kyc_handler,
        review_funding::list_funding_requests_handler,
        review_funding::approve_funding_request_handler,
        review_funding::reject_funding_request_handler,
        users::list_users_handler,
        users::get_user_handler,
        reports::analytics_handler,
        reports::dashboard_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
            MessageResponse,
            Role,
            UserView,
            KycStatus,
            IdType,
            KycDocuments,
            KycView,
            ReferralStats,
            FundingKind,
            FundingStatus,
            FundingRequest,
            AdminUserDetail,
            PlatformAnalytics,
            AdminDashboard,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, email verification and sessions"),
        (name = "profile", description = "Profile of the signed-in user"),
        (name = "kyc", description = "Identity verification submissions"),
        (name = "referrals", description = "Referral statistics"),
        (name = "funding", description = "Deposit and withdrawal requests"),
        (name = "admin", description = "Administrator review and reporting"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from login or email verification"))
                        .build(),
                ),
            )
        }
    }
}
