use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::kyc::application::domain::entities::{IdType, KycDocuments, KycRecord, KycStatus};
use crate::shared::{PageRequest, PageResult};

//
// ──────────────────────────────────────────────────────────
// Query DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KycView {
    pub status: KycStatus,
    pub verified: bool,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub id_type: Option<IdType>,
    pub id_number: Option<String>,
    pub documents: Option<KycDocuments>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl From<&KycRecord> for KycView {
    fn from(record: &KycRecord) -> Self {
        let submission = record.submission.as_ref();
        Self {
            status: record.status,
            verified: record.verified,
            full_name: submission.map(|s| s.full_name.clone()),
            date_of_birth: submission.map(|s| s.date_of_birth),
            id_type: submission.map(|s| s.id_type),
            id_number: submission.map(|s| s.id_number.clone()),
            documents: submission.map(|s| s.documents.clone()),
            submitted_at: record.submitted_at,
            reviewed_by: record.reviewed_by,
            verified_at: record.verified_at,
            admin_note: record.admin_note.clone(),
            rejected_at: record.rejected_at,
            rejection_reason: record.rejection_reason.clone(),
        }
    }
}

/// One row of the admin review queue.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmissionSummary {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub kyc: KycView,
}

impl From<&User> for KycSubmissionSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.value(),
            email: user.email.clone(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            country: user.profile.country.clone(),
            kyc: KycView::from(&user.kyc),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum KycQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait KycQuery: Send + Sync {
    /// Users that have ever submitted, newest submission first. `status`
    /// narrows the list; `None` means every status except `none`.
    async fn list_submissions(
        &self,
        status: Option<KycStatus>,
        page: PageRequest,
    ) -> Result<PageResult<KycSubmissionSummary>, KycQueryError>;
}
