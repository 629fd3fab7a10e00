use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::kyc::application::domain::entities::{KycRecord, KycStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub country: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub avatar_path: Option<String>,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == ProfileChanges::default()
    }

    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(v) = self.first_name {
            profile.first_name = v;
        }
        if let Some(v) = self.last_name {
            profile.last_name = v;
        }
        if let Some(v) = self.username {
            profile.username = Some(v);
        }
        if let Some(v) = self.country {
            profile.country = v;
        }
        if let Some(v) = self.gender {
            profile.gender = Some(v);
        }
        if let Some(v) = self.date_of_birth {
            profile.date_of_birth = Some(v);
        }
        if let Some(v) = self.phone {
            profile.phone = Some(v);
        }
        if let Some(v) = self.address_line {
            profile.address_line = Some(v);
        }
        if let Some(v) = self.city {
            profile.city = Some(v);
        }
        if let Some(v) = self.state {
            profile.state = Some(v);
        }
        if let Some(v) = self.postal_code {
            profile.postal_code = Some(v);
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile: UserProfile,
    pub email_verified: bool,
    pub referrer_id: Option<UserId>,
    pub kyc: KycRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Projection safe to hand to clients: no password hash, no tokens.
    pub fn sanitize(&self) -> UserView {
        UserView {
            id: self.id.value(),
            email: self.email.clone(),
            role: self.role,
            first_name: self.profile.first_name.clone(),
            last_name: self.profile.last_name.clone(),
            username: self.profile.username.clone(),
            country: self.profile.country.clone(),
            gender: self.profile.gender.clone(),
            date_of_birth: self.profile.date_of_birth,
            phone: self.profile.phone.clone(),
            address_line: self.profile.address_line.clone(),
            city: self.profile.city.clone(),
            state: self.profile.state.clone(),
            postal_code: self.profile.postal_code.clone(),
            avatar_path: self.profile.avatar_path.clone(),
            email_verified: self.email_verified,
            referrer_id: self.referrer_id.map(|r| r.value()),
            kyc_status: self.kyc.status,
            kyc_verified: self.kyc.verified,
            kyc_submitted_at: self.kyc.submitted_at,
            kyc_verified_at: self.kyc.verified_at,
            kyc_rejected_at: self.kyc.rejected_at,
            kyc_rejection_reason: self.kyc.rejection_reason.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn is_profile_locked(&self) -> bool {
        self.kyc.verified
    }
}

/// Sanitized user, as returned by every endpoint that exposes a user record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    #[schema(example = "jo@example.com")]
    pub email: String,
    pub role: Role,
    #[schema(example = "Jo")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub username: Option<String>,
    #[schema(example = "NG")]
    pub country: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub avatar_path: Option<String>,
    pub email_verified: bool,
    pub referrer_id: Option<Uuid>,
    pub kyc_status: KycStatus,
    pub kyc_verified: bool,
    pub kyc_submitted_at: Option<DateTime<Utc>>,
    pub kyc_verified_at: Option<DateTime<Utc>>,
    pub kyc_rejected_at: Option<DateTime<Utc>>,
    pub kyc_rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a brand-new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub profile: UserProfile,
    pub referrer_id: Option<UserId>,
}
