use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FundingKind {
    Deposit,
    Withdrawal,
}

impl FundingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingKind::Deposit => "deposit",
            FundingKind::Withdrawal => "withdrawal",
        }
    }
}

impl FromStr for FundingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(FundingKind::Deposit),
            "withdrawal" => Ok(FundingKind::Withdrawal),
            other => Err(format!("Unknown funding kind: {other}")),
        }
    }
}

impl fmt::Display for FundingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FundingStatus {
    Pending,
    Approved,
    Rejected,
}

impl FundingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingStatus::Pending => "pending",
            FundingStatus::Approved => "approved",
            FundingStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for FundingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(FundingStatus::Pending),
            "approved" => Ok(FundingStatus::Approved),
            "rejected" => Ok(FundingStatus::Rejected),
            other => Err(format!("Unknown funding status: {other}")),
        }
    }
}

impl fmt::Display for FundingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundingReviewError {
    #[error("Funding request has already been reviewed")]
    AlreadyReviewed,

    #[error("Rejection reason is required")]
    MissingReason,
}

/// A deposit or withdrawal the user asked for, awaiting manual settlement.
///
/// Amounts are integer minor units (cents, kobo, ...) of `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundingRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: FundingKind,
    pub status: FundingStatus,
    #[schema(example = 150000)]
    pub amount_minor: i64,
    #[schema(example = "USD")]
    pub currency: String,
    #[schema(example = "bank_transfer")]
    pub method: String,
    pub reference: Option<String>,
    pub admin_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FundingRequest {
    fn ensure_pending(&self) -> Result<(), FundingReviewError> {
        match self.status {
            FundingStatus::Pending => Ok(()),
            FundingStatus::Approved | FundingStatus::Rejected => {
                Err(FundingReviewError::AlreadyReviewed)
            }
        }
    }

    pub fn approve(
        &mut self,
        admin_id: Uuid,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), FundingReviewError> {
        self.ensure_pending()?;

        self.status = FundingStatus::Approved;
        self.admin_note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.reviewed_by = Some(admin_id);
        self.reviewed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(
        &mut self,
        admin_id: Uuid,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), FundingReviewError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(FundingReviewError::MissingReason);
        }
        self.ensure_pending()?;

        self.status = FundingStatus::Rejected;
        self.rejection_reason = Some(reason.to_string());
        self.reviewed_by = Some(admin_id);
        self.reviewed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

/// Validated input for a brand-new request; always starts `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFundingRequest {
    pub user_id: Uuid,
    pub kind: FundingKind,
    pub amount_minor: i64,
    pub currency: String,
    pub method: String,
    pub reference: Option<String>,
}

impl NewFundingRequest {
    pub fn into_pending(self, id: Uuid, now: DateTime<Utc>) -> FundingRequest {
        FundingRequest {
            id,
            user_id: self.user_id,
            kind: self.kind,
            status: FundingStatus::Pending,
            amount_minor: self.amount_minor,
            currency: self.currency,
            method: self.method,
            reference: self.reference,
            admin_note: None,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
