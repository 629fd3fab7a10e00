use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;

/// What a referrer may see about the people they brought in.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferredUser {
    pub id: Uuid,
    pub first_name: String,
    pub email_verified: bool,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReferralQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ReferralQuery: Send + Sync {
    /// Users whose `referrer_id` is `referrer`, newest first.
    async fn list_referred(&self, referrer: UserId) -> Result<Vec<ReferredUser>, ReferralQueryError>;
}
