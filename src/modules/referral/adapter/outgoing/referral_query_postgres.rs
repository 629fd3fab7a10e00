use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::auth::adapter::outgoing::sea_orm_entity::users::{Column, Entity};
use crate::auth::application::domain::entities::UserId;
use crate::referral::application::ports::outgoing::{
    ReferralQuery, ReferralQueryError, ReferredUser,
};

#[derive(Clone, Debug)]
pub struct ReferralQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReferralQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferralQuery for ReferralQueryPostgres {
    async fn list_referred(
        &self,
        referrer: UserId,
    ) -> Result<Vec<ReferredUser>, ReferralQueryError> {
        let models = Entity::find()
            .filter(Column::ReferrerId.eq(referrer.value()))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| ReferralQueryError::DatabaseError(e.to_string()))?;

        Ok(models
            .into_iter()
            .map(|m| ReferredUser {
                id: m.id,
                first_name: m.first_name,
                email_verified: m.email_verified,
                joined_at: m.created_at.with_timezone(&chrono::Utc),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::fixtures::user_model;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_list_referred_maps_rows() {
        let referrer = Uuid::new_v4();
        let mut verified = user_model(Uuid::new_v4(), "v@x.com");
        verified.referrer_id = Some(referrer);
        verified.email_verified = true;
        let mut pending = user_model(Uuid::new_v4(), "p@x.com");
        pending.referrer_id = Some(referrer);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![verified.clone(), pending]])
            .into_connection();

        let referred = ReferralQueryPostgres::new(Arc::new(db))
            .list_referred(UserId::from(referrer))
            .await
            .unwrap();

        assert_eq!(referred.len(), 2);
        assert_eq!(referred[0].id, verified.id);
        assert!(referred[0].email_verified);
        assert!(!referred[1].email_verified);
    }

    #[tokio::test]
    async fn test_list_referred_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let result = ReferralQueryPostgres::new(Arc::new(db))
            .list_referred(UserId::new())
            .await;

        assert!(matches!(result, Err(ReferralQueryError::DatabaseError(_))));
    }
}
