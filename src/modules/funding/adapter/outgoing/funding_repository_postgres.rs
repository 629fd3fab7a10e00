use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::funding_requests::{ActiveModel, Column, Entity};
use crate::funding::application::domain::entities::{
    FundingRequest, FundingStatus, NewFundingRequest,
};
use crate::funding::application::ports::outgoing::{FundingRepository, FundingRepositoryError};

#[derive(Clone, Debug)]
pub struct FundingRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl FundingRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FundingRepository for FundingRepositoryPostgres {
    async fn insert(
        &self,
        request: NewFundingRequest,
    ) -> Result<FundingRequest, FundingRepositoryError> {
        let pending = request.into_pending(Uuid::new_v4(), Utc::now());

        let active = ActiveModel {
            id: Set(pending.id),
            user_id: Set(pending.user_id),
            kind: Set(pending.kind.as_str().to_string()),
            status: Set(pending.status.as_str().to_string()),
            amount_minor: Set(pending.amount_minor),
            currency: Set(pending.currency),
            method: Set(pending.method),
            reference: Set(pending.reference),
            admin_note: Set(None),
            rejection_reason: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            created_at: Set(pending.created_at.fixed_offset()),
            updated_at: Set(pending.updated_at.fixed_offset()),
        };

        let model = active
            .insert(&*self.db)
            .await
            .map_err(|e| FundingRepositoryError::DatabaseError(e.to_string()))?;

        model
            .into_domain()
            .map_err(FundingRepositoryError::DatabaseError)
    }

    /// One `UPDATE ... WHERE status = 'pending' RETURNING *`, so of two
    /// concurrent reviews only the first lands.
    async fn save_review(
        &self,
        request: &FundingRequest,
    ) -> Result<FundingRequest, FundingRepositoryError> {
        let updated = Entity::update_many()
            .col_expr(Column::Status, Expr::value(request.status.as_str()))
            .col_expr(Column::AdminNote, Expr::value(request.admin_note.clone()))
            .col_expr(
                Column::RejectionReason,
                Expr::value(request.rejection_reason.clone()),
            )
            .col_expr(Column::ReviewedBy, Expr::value(request.reviewed_by))
            .col_expr(
                Column::ReviewedAt,
                Expr::value(request.reviewed_at.map(|t| t.fixed_offset())),
            )
            .col_expr(Column::UpdatedAt, Expr::value(request.updated_at.fixed_offset()))
            .filter(Column::Id.eq(request.id))
            .filter(Column::Status.eq(FundingStatus::Pending.as_str()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| FundingRepositoryError::DatabaseError(e.to_string()))?;

        match updated.into_iter().next() {
            Some(model) => model
                .into_domain()
                .map_err(FundingRepositoryError::DatabaseError),
            None => {
                let exists = Entity::find_by_id(request.id)
                    .one(&*self.db)
                    .await
                    .map_err(|e| FundingRepositoryError::DatabaseError(e.to_string()))?
                    .is_some();
                if exists {
                    Err(FundingRepositoryError::NotPending)
                } else {
                    Err(FundingRepositoryError::NotFound)
                }
            }
        }
    }
}
