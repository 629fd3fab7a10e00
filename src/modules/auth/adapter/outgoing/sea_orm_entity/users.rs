use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId, UserProfile};
use crate::kyc::application::domain::entities::{KycDocuments, KycRecord, KycSubmission};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub country: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub phone: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub avatar_path: Option<String>,
    pub email_verified: bool,
    pub referrer_id: Option<Uuid>,
    pub kyc_status: String,
    pub kyc_verified: bool,
    pub kyc_full_name: Option<String>,
    pub kyc_date_of_birth: Option<Date>,
    pub kyc_id_type: Option<String>,
    pub kyc_id_number: Option<String>,
    pub kyc_id_front_path: Option<String>,
    pub kyc_id_back_path: Option<String>,
    pub kyc_selfie_path: Option<String>,
    pub kyc_submitted_at: Option<DateTimeWithTimeZone>,
    pub kyc_reviewed_by: Option<Uuid>,
    pub kyc_verified_at: Option<DateTimeWithTimeZone>,
    pub kyc_admin_note: Option<String>,
    pub kyc_rejected_at: Option<DateTimeWithTimeZone>,
    pub kyc_rejection_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(belongs_to = "Entity", from = "Column::ReferrerId", to = "Column::Id")]
    Referrer,
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        use chrono::Utc;
        use sea_orm::ActiveValue::Set;

        if !insert {
            self.updated_at = Set(Utc::now().into());
        }

        Ok(self)
    }
}

impl Model {
    /// Convert a row into the domain user. Unknown enum strings are reported
    /// as errors instead of being silently defaulted.
    pub fn into_domain(self) -> Result<User, String> {
        let role = self.role.parse()?;
        let status = self.kyc_status.parse()?;

        let submission = match (
            self.kyc_full_name,
            self.kyc_date_of_birth,
            self.kyc_id_type,
            self.kyc_id_number,
            self.kyc_id_front_path,
            self.kyc_id_back_path,
            self.kyc_selfie_path,
        ) {
            (
                Some(full_name),
                Some(date_of_birth),
                Some(id_type),
                Some(id_number),
                Some(id_front_path),
                Some(id_back_path),
                Some(selfie_path),
            ) => Some(KycSubmission {
                full_name,
                date_of_birth,
                id_type: id_type.parse()?,
                id_number,
                documents: KycDocuments {
                    id_front_path,
                    id_back_path,
                    selfie_path,
                },
            }),
            _ => None,
        };

        Ok(User {
            id: UserId::from(self.id),
            email: self.email,
            password_hash: self.password_hash,
            role,
            profile: UserProfile {
                first_name: self.first_name,
                last_name: self.last_name,
                username: self.username,
                country: self.country,
                gender: self.gender,
                date_of_birth: self.date_of_birth,
                phone: self.phone,
                address_line: self.address_line,
                city: self.city,
                state: self.state,
                postal_code: self.postal_code,
                avatar_path: self.avatar_path,
            },
            email_verified: self.email_verified,
            referrer_id: self.referrer_id.map(UserId::from),
            kyc: KycRecord {
                status,
                verified: self.kyc_verified,
                submission,
                submitted_at: self.kyc_submitted_at.map(|t| t.with_timezone(&chrono::Utc)),
                reviewed_by: self.kyc_reviewed_by,
                verified_at: self.kyc_verified_at.map(|t| t.with_timezone(&chrono::Utc)),
                admin_note: self.kyc_admin_note,
                rejected_at: self.kyc_rejected_at.map(|t| t.with_timezone(&chrono::Utc)),
                rejection_reason: self.kyc_rejection_reason,
            },
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        })
    }
}
