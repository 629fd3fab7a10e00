use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::admin::application::ports::outgoing::{
    AdminQuery, AdminQueryError, AdminUserSummary, CountryCount, KycCounts, UserFilter,
    UserStats,
};
use crate::auth::adapter::outgoing::sea_orm_entity::users::{Column, Entity, Model};
use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::domain::entities::KycStatus;
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, FromQueryResult)]
struct ReferralCountRow {
    referrer_id: Uuid,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    kyc_status: String,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CountryCountRow {
    country: String,
    count: i64,
}

const LIKE_ESCAPE: char = '\\';

/// Lowercased substring pattern in which `%`, `_` and the escape char match literally.
fn substring_pattern(search: &str) -> String {
    let mut pattern = String::from("%");
    for c in search.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn db_error(e: impl ToString) -> AdminQueryError {
    AdminQueryError::DatabaseError(e.to_string())
}

#[derive(Clone, Debug)]
pub struct AdminQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Verified-referral counts for a batch of referrers, in one grouped query.
    async fn referral_counts(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, u64>, AdminQueryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Entity::find()
            .select_only()
            .column(Column::ReferrerId)
            .column_as(Column::Id.count(), "count")
            .filter(Column::ReferrerId.is_in(ids))
            .filter(Column::EmailVerified.eq(true))
            .group_by(Column::ReferrerId)
            .into_model::<ReferralCountRow>()
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.referrer_id, r.count.max(0) as u64))
            .collect())
    }

    async fn summarize(&self, models: Vec<Model>) -> Result<Vec<AdminUserSummary>, AdminQueryError> {
        let counts = self
            .referral_counts(models.iter().map(|m| m.id).collect())
            .await?;

        models
            .into_iter()
            .map(|m| {
                let count = counts.get(&m.id).copied().unwrap_or(0);
                m.into_domain()
                    .map(|user| AdminUserSummary::new(&user, count))
                    .map_err(AdminQueryError::DatabaseError)
            })
            .collect()
    }
}

#[async_trait]
impl AdminQuery for AdminQueryPostgres {
    async fn list_users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<PageResult<AdminUserSummary>, AdminQueryError> {
        let mut query = Entity::find();

        if let Some(search) = &filter.search {
            let pattern = LikeExpr::new(substring_pattern(search)).escape(LIKE_ESCAPE);
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(Column::Email))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::FirstName))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::LastName))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Username))).like(pattern)),
            );
        }
        if let Some(status) = filter.kyc_status {
            query = query.filter(Column::KycStatus.eq(status.as_str()));
        }
        query = query
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id);

        let total = query.clone().count(&*self.db).await.map_err(db_error)?;

        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        Ok(PageResult {
            items: self.summarize(models).await?,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn user_stats(&self) -> Result<UserStats, AdminQueryError> {
        let total_users = Entity::find().count(&*self.db).await.map_err(db_error)?;
        let email_verified = Entity::find()
            .filter(Column::EmailVerified.eq(true))
            .count(&*self.db)
            .await
            .map_err(db_error)?;

        let status_rows = Entity::find()
            .select_only()
            .column(Column::KycStatus)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::KycStatus)
            .into_model::<StatusCountRow>()
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        let mut kyc = KycCounts::default();
        for row in status_rows {
            let status: KycStatus = row.kyc_status.parse().map_err(AdminQueryError::DatabaseError)?;
            kyc.add(status, row.count.max(0) as u64);
        }

        let mut by_country: Vec<CountryCount> = Entity::find()
            .select_only()
            .column(Column::Country)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Country)
            .into_model::<CountryCountRow>()
            .all(&*self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|r| CountryCount {
                country: r.country,
                count: r.count.max(0) as u64,
            })
            .collect();
        by_country.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));

        Ok(UserStats {
            total_users,
            email_verified,
            kyc,
            by_country,
        })
    }

    async fn recent_users(&self, limit: u64) -> Result<Vec<AdminUserSummary>, AdminQueryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(db_error)?;

        self.summarize(models).await
    }

    async fn referral_count(&self, user_id: UserId) -> Result<u64, AdminQueryError> {
        Entity::find()
            .filter(Column::ReferrerId.eq(user_id.value()))
            .filter(Column::EmailVerified.eq(true))
            .count(&*self.db)
            .await
            .map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::fixtures::user_model;
    use sea_orm::sea_query::Value;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> BTreeMap<String, Value> {
        BTreeMap::from([("num_items".to_string(), Value::BigInt(Some(n)))])
    }

    fn grouped_row(key: &str, value: Value, n: i64) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (key.to_string(), value),
            ("count".to_string(), Value::BigInt(Some(n))),
        ])
    }

    #[test]
    fn test_search_wildcards_match_literally() {
        assert_eq!(substring_pattern("Ada"), "%ada%");
        assert_eq!(substring_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(substring_pattern("a\\b"), "%a\\\\b%");
    }

    #[tokio::test]
    async fn test_list_users_attaches_referral_counts() {
        let ada = user_model(Uuid::new_v4(), "ada@x.com");
        let bob = user_model(Uuid::new_v4(), "bob@x.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(2)]])
            .append_query_results(vec![vec![ada.clone(), bob.clone()]])
            .append_query_results(vec![vec![grouped_row(
                "referrer_id",
                Value::Uuid(Some(Box::new(ada.id))),
                3,
            )]])
            .into_connection();

        let page = AdminQueryPostgres::new(Arc::new(db))
            .list_users(
                &UserFilter {
                    search: Some("x.com".to_string()),
                    kyc_status: None,
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].referral_count, 3);
        assert_eq!(page.items[1].referral_count, 0);
    }

    #[tokio::test]
    async fn test_user_stats() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(5)]])
            .append_query_results(vec![vec![count_row(3)]])
            .append_query_results(vec![vec![
                grouped_row("kyc_status", Value::String(Some(Box::new("none".into()))), 3),
                grouped_row("kyc_status", Value::String(Some(Box::new("verified".into()))), 2),
            ]])
            .append_query_results(vec![vec![
                grouped_row("country", Value::String(Some(Box::new("KE".into()))), 1),
                grouped_row("country", Value::String(Some(Box::new("NG".into()))), 4),
            ]])
            .into_connection();

        let stats = AdminQueryPostgres::new(Arc::new(db))
            .user_stats()
            .await
            .unwrap();

        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.email_verified, 3);
        assert_eq!(stats.kyc.none, 3);
        assert_eq!(stats.kyc.verified, 2);
        assert_eq!(stats.by_country[0].country, "NG");
    }

    #[tokio::test]
    async fn test_referral_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(6)]])
            .into_connection();

        let count = AdminQueryPostgres::new(Arc::new(db))
            .referral_count(UserId::new())
            .await
            .unwrap();

        assert_eq!(count, 6);
    }

    #[tokio::test]
    async fn test_recent_users_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("down".to_string())])
            .into_connection();

        let result = AdminQueryPostgres::new(Arc::new(db)).recent_users(10).await;

        assert!(matches!(result, Err(AdminQueryError::DatabaseError(_))));
    }
}
