use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::kyc::application::domain::entities::KycTransitionError;
use crate::kyc::application::ports::incoming::use_cases::{RejectKycError, RejectKycUseCase};
use crate::kyc::application::ports::outgoing::{KycRepository, KycRepositoryError, KycView};

pub struct RejectKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    user_query: Q,
    kyc_repository: R,
}

impl<Q, R> RejectKycService<Q, R>
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
impl<Q, R> RejectKycUseCase for RejectKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    async fn execute(
        &self,
        admin_id: UserId,
        user_id: UserId,
        reason: String,
    ) -> Result<KycView, RejectKycError> {
        if reason.trim().is_empty() {
            return Err(RejectKycError::MissingReason);
        }

        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|e| RejectKycError::RepositoryError(e.to_string()))?
            .ok_or(RejectKycError::UserNotFound)?;

        let mut record = user.kyc.clone();
        record
            .reject(admin_id.value(), &reason, Utc::now())
            .map_err(|e| match e {
                KycTransitionError::MissingReason => RejectKycError::MissingReason,
                KycTransitionError::NoSubmission => RejectKycError::NoSubmission,
                KycTransitionError::AlreadyVerified => RejectKycError::AlreadyVerified,
                other @ KycTransitionError::AlreadySubmitted => {
                    RejectKycError::RepositoryError(other.to_string())
                }
            })?;

        let saved = self
            .kyc_repository
            .save_record(user.id, &record)
            .await
            .map_err(|e| match e {
                KycRepositoryError::UserNotFound => RejectKycError::UserNotFound,
                KycRepositoryError::DatabaseError(msg) => RejectKycError::RepositoryError(msg),
            })?;

        info!(user_id = %saved.id, admin_id = %admin_id, "KYC rejected");
        Ok(KycView::from(&saved.kyc))
    }
}
