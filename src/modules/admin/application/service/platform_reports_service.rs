use async_trait::async_trait;

use crate::admin::application::ports::incoming::use_cases::{
    AdminDashboard, GetAnalyticsUseCase, GetDashboardUseCase, PlatformAnalytics,
    PlatformReportError,
};
use crate::admin::application::ports::outgoing::AdminQuery;
use crate::funding::application::domain::entities::FundingStatus;
use crate::funding::application::ports::outgoing::FundingQuery;

const RECENT_USERS_LIMIT: u64 = 10;

fn query_failed(e: impl ToString) -> PlatformReportError {
    PlatformReportError::QueryFailed(e.to_string())
}

pub struct GetAnalyticsService<Q: AdminQuery> {
    admin_query: Q,
}

impl<Q: AdminQuery> GetAnalyticsService<Q> {
    pub fn new(admin_query: Q) -> Self {
        Self { admin_query }
    }
}

#[async_trait]
impl<Q: AdminQuery> GetAnalyticsUseCase for GetAnalyticsService<Q> {
    async fn execute(&self) -> Result<PlatformAnalytics, PlatformReportError> {
        let stats = self.admin_query.user_stats().await.map_err(query_failed)?;

        Ok(PlatformAnalytics {
            total_users: stats.total_users,
            email_verified: stats.email_verified,
            email_unverified: stats.total_users.saturating_sub(stats.email_verified),
            kyc: stats.kyc,
            registrations_by_country: stats.by_country,
        })
    }
}

pub struct GetDashboardService<Q, F>
where
    Q: AdminQuery,
    F: FundingQuery,
{
    admin_query: Q,
    funding_query: F,
}

impl<Q, F> GetDashboardService<Q, F>
where
    Q: AdminQuery,
    F: FundingQuery,
{
    pub fn new(admin_query: Q, funding_query: F) -> Self {
        Self {
            admin_query,
            funding_query,
        }
    }
}

#[async_trait]
impl<Q, F> GetDashboardUseCase for GetDashboardService<Q, F>
where
    Q: AdminQuery,
    F: FundingQuery,
{
    async fn execute(&self) -> Result<AdminDashboard, PlatformReportError> {
        let stats = self.admin_query.user_stats().await.map_err(query_failed)?;
        let recent_users = self
            .admin_query
            .recent_users(RECENT_USERS_LIMIT)
            .await
            .map_err(query_failed)?;
        let pending_funding_requests = self
            .funding_query
            .count_by_status(FundingStatus::Pending)
            .await
            .map_err(query_failed)?;

        Ok(AdminDashboard {
            total_users: stats.total_users,
            email_verified: stats.email_verified,
            kyc_verified: stats.kyc.verified,
            pending_kyc: stats.kyc.submitted,
            pending_funding_requests,
            recent_users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::application::domain::entities::FundingKind;
    use crate::tests::support::fixtures::{
        pending_funding_request, submitted_kyc_user, unverified_user, verified_kyc_user,
    };
    use crate::tests::support::in_memory::{InMemoryFunding, InMemoryUsers};
    use uuid::Uuid;

    fn seeded() -> InMemoryUsers {
        let users = InMemoryUsers::default();
        users.insert(unverified_user("a@x.com"));
        let mut ke = unverified_user("b@x.com");
        ke.profile.country = "KE".to_string();
        users.insert(ke);
        users.insert(submitted_kyc_user("c@x.com"));
        users.insert(verified_kyc_user("d@x.com"));
        users
    }

    #[tokio::test]
    async fn test_analytics_counts() {
        let analytics = GetAnalyticsService::new(seeded()).execute().await.unwrap();

        assert_eq!(analytics.total_users, 4);
        assert_eq!(
            analytics.email_verified + analytics.email_unverified,
            analytics.total_users
        );
        assert_eq!(analytics.kyc.none, 2);
        assert_eq!(analytics.kyc.submitted, 1);
        assert_eq!(analytics.kyc.verified, 1);
        assert_eq!(analytics.registrations_by_country[0].country, "NG");
        assert_eq!(analytics.registrations_by_country[0].count, 3);
    }

    #[tokio::test]
    async fn test_dashboard_pending_counts() {
        let funding = InMemoryFunding::default();
        funding.put(pending_funding_request(Uuid::new_v4(), FundingKind::Deposit));
        funding.put(pending_funding_request(Uuid::new_v4(), FundingKind::Withdrawal));

        let dashboard = GetDashboardService::new(seeded(), funding)
            .execute()
            .await
            .unwrap();

        assert_eq!(dashboard.total_users, 4);
        assert_eq!(dashboard.pending_kyc, 1);
        assert_eq!(dashboard.kyc_verified, 1);
        assert_eq!(dashboard.pending_funding_requests, 2);
        assert_eq!(dashboard.recent_users.len(), 4);
    }

    #[tokio::test]
    async fn test_dashboard_caps_recent_users() {
        let users = InMemoryUsers::default();
        for i in 0..12 {
            users.insert(unverified_user(&format!("u{i}@x.com")));
        }

        let dashboard = GetDashboardService::new(users, InMemoryFunding::default())
            .execute()
            .await
            .unwrap();

        assert_eq!(dashboard.recent_users.len(), 10);
    }
}
