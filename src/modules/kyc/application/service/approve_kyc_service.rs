use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::kyc::application::domain::entities::KycTransitionError;
use crate::kyc::application::ports::incoming::use_cases::{ApproveKycError, ApproveKycUseCase};
use crate::kyc::application::ports::outgoing::{KycRepository, KycRepositoryError, KycView};

pub struct ApproveKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    user_query: Q,
    kyc_repository: R,
}

impl<Q, R> ApproveKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    pub fn new(user_query: Q, kyc_repository: R) -> Self {
        Self {
            user_query,
            kyc_repository,
        }
    }
}

#[async_trait]
impl<Q, R> ApproveKycUseCase for ApproveKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    async fn execute(
        &self,
        admin_id: UserId,
        user_id: UserId,
        admin_note: Option<String>,
    ) -> Result<KycView, ApproveKycError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|e| ApproveKycError::RepositoryError(e.to_string()))?
            .ok_or(ApproveKycError::UserNotFound)?;

        let mut record = user.kyc.clone();
        let changed = record
            .approve(
                admin_id.value(),
                admin_note.map(|n| n.trim().to_string()),
                Utc::now(),
            )
            .map_err(|e| match e {
                KycTransitionError::NoSubmission => ApproveKycError::NoSubmission,
                other => ApproveKycError::RepositoryError(other.to_string()),
            })?;

        if !changed {
            return Ok(KycView::from(&user.kyc));
        }

        let saved = self
            .kyc_repository
            .save_record(user.id, &record)
            .await
            .map_err(|e| match e {
                KycRepositoryError::UserNotFound => ApproveKycError::UserNotFound,
                KycRepositoryError::DatabaseError(msg) => ApproveKycError::RepositoryError(msg),
            })?;

        info!(user_id = %saved.id, admin_id = %admin_id, "KYC approved");
        Ok(KycView::from(&saved.kyc))
    }
}
