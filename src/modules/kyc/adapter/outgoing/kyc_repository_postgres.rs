use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use crate::auth::adapter::outgoing::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity,
};
use crate::auth::application::domain::entities::{User, UserId};
use crate::kyc::application::domain::entities::KycRecord;
use crate::kyc::application::ports::outgoing::{KycRepository, KycRepositoryError};

#[derive(Clone, Debug)]
pub struct KycRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl KycRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KycRepository for KycRepositoryPostgres {
    async fn save_record(
        &self,
        user_id: UserId,
        record: &KycRecord,
    ) -> Result<User, KycRepositoryError> {
        let model = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(|e| KycRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(KycRepositoryError::UserNotFound)?;

        let mut active: UserActiveModel = model.into();
        let submission = record.submission.as_ref();

        active.kyc_status = Set(record.status.as_str().to_string());
        active.kyc_verified = Set(record.verified);
        active.kyc_full_name = Set(submission.map(|s| s.full_name.clone()));
        active.kyc_date_of_birth = Set(submission.map(|s| s.date_of_birth));
        active.kyc_id_type = Set(submission.map(|s| s.id_type.as_str().to_string()));
        active.kyc_id_number = Set(submission.map(|s| s.id_number.clone()));
        active.kyc_id_front_path = Set(submission.map(|s| s.documents.id_front_path.clone()));
        active.kyc_id_back_path = Set(submission.map(|s| s.documents.id_back_path.clone()));
        active.kyc_selfie_path = Set(submission.map(|s| s.documents.selfie_path.clone()));
        active.kyc_submitted_at = Set(record.submitted_at.map(|t| t.fixed_offset()));
        active.kyc_reviewed_by = Set(record.reviewed_by);
        active.kyc_verified_at = Set(record.verified_at.map(|t| t.fixed_offset()));
        active.kyc_admin_note = Set(record.admin_note.clone());
        active.kyc_rejected_at = Set(record.rejected_at.map(|t| t.fixed_offset()));
        active.kyc_rejection_reason = Set(record.rejection_reason.clone());

        let updated = active
            .update(&*self.db)
            .await
            .map_err(|e| KycRepositoryError::DatabaseError(e.to_string()))?;

        updated
            .into_domain()
            .map_err(KycRepositoryError::DatabaseError)
    }
}
