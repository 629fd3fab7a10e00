use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;

use crate::auth::adapter::outgoing::sea_orm_entity::users::{Column, Entity};
use crate::kyc::application::domain::entities::KycStatus;
use crate::kyc::application::ports::outgoing::{KycQuery, KycQueryError, KycSubmissionSummary};
use crate::shared::{PageRequest, PageResult};

#[derive(Clone, Debug)]
pub struct KycQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl KycQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KycQuery for KycQueryPostgres {
    async fn list_submissions(
        &self,
        status: Option<KycStatus>,
        page: PageRequest,
    ) -> Result<PageResult<KycSubmissionSummary>, KycQueryError> {
        let mut query = Entity::find();

        query = match status {
            Some(status) => query.filter(Column::KycStatus.eq(status.as_str())),
            None => query.filter(Column::KycStatus.ne(KycStatus::None.as_str())),
        };

        query = query
            .order_by_desc(Column::KycSubmittedAt)
            .order_by_asc(Column::Id);

        let total = query
            .clone()
            .count(&*self.db)
            .await
            .map_err(|e| KycQueryError::DatabaseError(e.to_string()))?;

        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(|e| KycQueryError::DatabaseError(e.to_string()))?;

        let items = models
            .into_iter()
            .map(|m| {
                m.into_domain()
                    .map(|user| KycSubmissionSummary::from(&user))
                    .map_err(KycQueryError::DatabaseError)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResult {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }
}
