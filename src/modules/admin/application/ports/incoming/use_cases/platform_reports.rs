use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::admin::application::ports::outgoing::{AdminUserSummary, CountryCount, KycCounts};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalytics {
    pub total_users: u64,
    pub email_verified: u64,
    pub email_unverified: u64,
    pub kyc: KycCounts,
    pub registrations_by_country: Vec<CountryCount>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_users: u64,
    pub email_verified: u64,
    pub kyc_verified: u64,
    pub pending_kyc: u64,
    pub pending_funding_requests: u64,
    pub recent_users: Vec<AdminUserSummary>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlatformReportError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetAnalyticsUseCase: Send + Sync {
    async fn execute(&self) -> Result<PlatformAnalytics, PlatformReportError>;
}

#[async_trait]
pub trait GetDashboardUseCase: Send + Sync {
    async fn execute(&self) -> Result<AdminDashboard, PlatformReportError>;
}
