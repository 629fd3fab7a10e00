use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, User, UserId};
use crate::kyc::application::domain::entities::KycStatus;
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive match on email, names and username.
    pub search: Option<String>,
    pub kyc_status: Option<KycStatus>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub country: String,
    pub role: Role,
    pub email_verified: bool,
    pub kyc_status: KycStatus,
    pub kyc_verified: bool,
    pub referrer_id: Option<Uuid>,
    /// Referred users who verified their email.
    pub referral_count: u64,
    pub created_at: DateTime<Utc>,
}

impl AdminUserSummary {
    pub fn new(user: &User, referral_count: u64) -> Self {
        Self {
            id: user.id.value(),
            email: user.email.clone(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            username: user.profile.username.clone(),
            country: user.profile.country.clone(),
            role: user.role,
            email_verified: user.email_verified,
            kyc_status: user.kyc.status,
            kyc_verified: user.kyc.verified,
            referrer_id: user.referrer_id.map(|r| r.value()),
            referral_count,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct KycCounts {
    pub none: u64,
    pub submitted: u64,
    pub verified: u64,
    pub rejected: u64,
}

impl KycCounts {
    pub fn add(&mut self, status: KycStatus, count: u64) {
        match status {
            KycStatus::None => self.none += count,
            KycStatus::Submitted => self.submitted += count,
            KycStatus::Verified => self.verified += count,
            KycStatus::Rejected => self.rejected += count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CountryCount {
    #[schema(example = "NG")]
    pub country: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total_users: u64,
    pub email_verified: u64,
    pub kyc: KycCounts,
    /// Most populous first.
    pub by_country: Vec<CountryCount>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AdminQuery: Send + Sync {
    /// Newest accounts first.
    async fn list_users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<PageResult<AdminUserSummary>, AdminQueryError>;

    async fn user_stats(&self) -> Result<UserStats, AdminQueryError>;

    async fn recent_users(&self, limit: u64) -> Result<Vec<AdminUserSummary>, AdminQueryError>;

    async fn referral_count(&self, user_id: UserId) -> Result<u64, AdminQueryError>;
}
