use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::funding::application::domain::entities::FundingRequest;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "funding_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub status: String,
    pub amount_minor: i64,
    pub currency: String,
    pub method: String,
    pub reference: Option<String>,
    pub admin_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<crate::auth::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> Result<FundingRequest, String> {
        Ok(FundingRequest {
            id: self.id,
            user_id: self.user_id,
            kind: self.kind.parse()?,
            status: self.status.parse()?,
            amount_minor: self.amount_minor,
            currency: self.currency,
            method: self.method,
            reference: self.reference,
            admin_note: self.admin_note,
            rejection_reason: self.rejection_reason,
            reviewed_by: self.reviewed_by,
            reviewed_at: self.reviewed_at.map(|t| t.with_timezone(&chrono::Utc)),
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        })
    }
}
