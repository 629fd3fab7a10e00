use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::{Role, User, UserId, UserProfile};
use crate::funding::application::domain::entities::{
    FundingKind, FundingRequest, NewFundingRequest,
};
use crate::kyc::application::domain::entities::{
    IdType, KycDocuments, KycRecord, KycSubmission,
};

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only_0123456789";
pub const TEST_JWT_ISSUER: &str = "invest-platform-test";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        issuer: TEST_JWT_ISSUER.to_string(),
        session_token_expiry: 3600,
    }
}

pub fn jwt_service() -> JwtTokenService {
    JwtTokenService::new(jwt_config())
}

/// Freshly registered account: role user, email unverified, no KYC.
pub fn unverified_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        email: email.to_string(),
        password_hash: "$2b$04$not-a-real-hash".to_string(),
        role: Role::User,
        profile: UserProfile {
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            country: "NG".to_string(),
            ..Default::default()
        },
        email_verified: false,
        referrer_id: None,
        kyc: KycRecord::default(),
        created_at: now,
        updated_at: now,
    }
}

pub fn verified_user(email: &str) -> User {
    let mut user = unverified_user(email);
    user.email_verified = true;
    user
}

pub fn admin_user(email: &str) -> User {
    let mut user = verified_user(email);
    user.role = Role::Admin;
    user
}

pub fn kyc_submission() -> KycSubmission {
    KycSubmission {
        full_name: "Jo Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 2).unwrap_or_default(),
        id_type: IdType::Passport,
        id_number: "A1234567".to_string(),
        documents: KycDocuments {
            id_front_path: "/uploads/kyc/front.jpg".to_string(),
            id_back_path: "/uploads/kyc/back.jpg".to_string(),
            selfie_path: "/uploads/kyc/selfie.jpg".to_string(),
        },
    }
}

/// Verified email, KYC awaiting review.
pub fn submitted_kyc_user(email: &str) -> User {
    let mut user = verified_user(email);
    user.kyc
        .submit(kyc_submission(), Utc::now())
        .expect("fresh record accepts a submission");
    user
}

/// Verified email and approved KYC; profile is locked.
pub fn verified_kyc_user(email: &str) -> User {
    let mut user = submitted_kyc_user(email);
    user.kyc
        .approve(Uuid::new_v4(), None, Utc::now())
        .expect("submitted record can be approved");
    user
}

pub fn pending_funding_request(user_id: Uuid, kind: FundingKind) -> FundingRequest {
    NewFundingRequest {
        user_id,
        kind,
        amount_minor: 10_000,
        currency: "USD".to_string(),
        method: "bank_transfer".to_string(),
        reference: None,
    }
    .into_pending(Uuid::new_v4(), Utc::now())
}

/// Real bcrypt hash at the minimum cost, for flows that verify passwords.
pub fn password_hash(password: &str) -> String {
    bcrypt::hash(password, 4).expect("bcrypt accepts cost 4")
}

/// Verified account whose password is `password`.
pub fn user_with_password(email: &str, password: &str) -> User {
    let mut user = verified_user(email);
    user.password_hash = password_hash(password);
    user
}
