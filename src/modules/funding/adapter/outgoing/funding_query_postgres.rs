use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::funding_requests::{Column, Entity, Model};
use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::{FundingRequest, FundingStatus};
use crate::funding::application::ports::outgoing::{
    FundingFilter, FundingQuery, FundingQueryError,
};
use crate::shared::{PageRequest, PageResult};

#[derive(Clone, Debug)]
pub struct FundingQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl FundingQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(models: Vec<Model>) -> Result<Vec<FundingRequest>, FundingQueryError> {
    models
        .into_iter()
        .map(|m| m.into_domain().map_err(FundingQueryError::DatabaseError))
        .collect()
}

#[async_trait]
impl FundingQuery for FundingQueryPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FundingRequest>, FundingQueryError> {
        Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| FundingQueryError::DatabaseError(e.to_string()))?
            .map(|m| m.into_domain().map_err(FundingQueryError::DatabaseError))
            .transpose()
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FundingRequest>, FundingQueryError> {
        let models = Entity::find()
            .filter(Column::UserId.eq(user_id.value()))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| FundingQueryError::DatabaseError(e.to_string()))?;

        to_domain(models)
    }

    async fn list(
        &self,
        filter: FundingFilter,
        page: PageRequest,
    ) -> Result<PageResult<FundingRequest>, FundingQueryError> {
        let mut query = Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(Column::Kind.eq(kind.as_str()));
        }
        query = query
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id);

        let total = query
            .clone()
            .count(&*self.db)
            .await
            .map_err(|e| FundingQueryError::DatabaseError(e.to_string()))?;

        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(|e| FundingQueryError::DatabaseError(e.to_string()))?;

        Ok(PageResult {
            items: to_domain(models)?,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn count_by_status(&self, status: FundingStatus) -> Result<u64, FundingQueryError> {
        Entity::find()
            .filter(Column::Status.eq(status.as_str()))
            .count(&*self.db)
            .await
            .map_err(|e| FundingQueryError::DatabaseError(e.to_string()))
    }
}
