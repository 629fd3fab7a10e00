use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    #[default]
    None,
    Submitted,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::None => "none",
            KycStatus::Submitted => "submitted",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for KycStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(KycStatus::None),
            "submitted" => Ok(KycStatus::Submitted),
            "verified" => Ok(KycStatus::Verified),
            "rejected" => Ok(KycStatus::Rejected),
            other => Err(format!("Unknown KYC status: {other}")),
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Passport,
    NationalId,
    DriversLicense,
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Passport => "passport",
            IdType::NationalId => "national_id",
            IdType::DriversLicense => "drivers_license",
        }
    }
}

impl FromStr for IdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passport" => Ok(IdType::Passport),
            "national_id" => Ok(IdType::NationalId),
            "drivers_license" => Ok(IdType::DriversLicense),
            other => Err(format!("Unsupported ID type: {other}")),
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored locations of the three identity images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KycDocuments {
    pub id_front_path: String,
    pub id_back_path: String,
    pub selfie_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycSubmission {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub id_type: IdType,
    pub id_number: String,
    pub documents: KycDocuments,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KycTransitionError {
    #[error("KYC already submitted and awaiting review")]
    AlreadySubmitted,

    #[error("KYC already verified")]
    AlreadyVerified,

    #[error("No KYC submission to review")]
    NoSubmission,

    #[error("Rejection reason is required")]
    MissingReason,
}

/// KYC state carried on each user record.
///
/// Transitions: `none -> submitted`, `rejected -> submitted`,
/// `submitted -> verified`, `submitted -> rejected`. A rejected record may still be
/// approved or re-rejected by an admin. `verified` is terminal.
/// `verified == (status == Verified)` holds after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KycRecord {
    pub status: KycStatus,
    pub verified: bool,
    pub submission: Option<KycSubmission>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl KycRecord {
    /// Checked before any document is written to storage.
    pub fn ensure_can_submit(&self) -> Result<(), KycTransitionError> {
        match self.status {
            KycStatus::Submitted => Err(KycTransitionError::AlreadySubmitted),
            KycStatus::Verified => Err(KycTransitionError::AlreadyVerified),
            KycStatus::None | KycStatus::Rejected => Ok(()),
        }
    }

    pub fn submit(
        &mut self,
        submission: KycSubmission,
        now: DateTime<Utc>,
    ) -> Result<(), KycTransitionError> {
        self.ensure_can_submit()?;

        self.status = KycStatus::Submitted;
        self.verified = false;
        self.submission = Some(submission);
        self.submitted_at = Some(now);
        self.reviewed_by = None;
        self.verified_at = None;
        self.admin_note = None;
        self.rejected_at = None;
        self.rejection_reason = None;
        Ok(())
    }

    /// Approving an already verified record is a no-op.
    pub fn approve(
        &mut self,
        admin_id: Uuid,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<bool, KycTransitionError> {
        match self.status {
            KycStatus::Verified => return Ok(false),
            KycStatus::Submitted | KycStatus::Rejected => {}
            KycStatus::None => return Err(KycTransitionError::NoSubmission),
        }

        self.status = KycStatus::Verified;
        self.verified = true;
        self.reviewed_by = Some(admin_id);
        self.verified_at = Some(now);
        self.admin_note = note.filter(|n| !n.trim().is_empty());
        self.rejected_at = None;
        self.rejection_reason = None;
        Ok(true)
    }

    pub fn reject(
        &mut self,
        admin_id: Uuid,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), KycTransitionError> {
        if reason.trim().is_empty() {
            return Err(KycTransitionError::MissingReason);
        }

        match self.status {
            KycStatus::Submitted | KycStatus::Rejected => {}
            KycStatus::None => return Err(KycTransitionError::NoSubmission),
            KycStatus::Verified => return Err(KycTransitionError::AlreadyVerified),
        }

        self.status = KycStatus::Rejected;
        self.verified = false;
        self.reviewed_by = Some(admin_id);
        self.rejected_at = Some(now);
        self.rejection_reason = Some(reason.to_string());
        self.verified_at = None;
        Ok(())
    }
}
