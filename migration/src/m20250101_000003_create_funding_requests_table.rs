use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FundingRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FundingRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FundingRequests::UserId).uuid().not_null())
                    .col(ColumnDef::new(FundingRequests::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(FundingRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::AmountMinor)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(FundingRequests::AmountMinor).gt(0)),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::Currency)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FundingRequests::Method).string_len(64).not_null())
                    .col(ColumnDef::new(FundingRequests::Reference).string_len(255).null())
                    .col(ColumnDef::new(FundingRequests::AdminNote).text().null())
                    .col(ColumnDef::new(FundingRequests::RejectionReason).text().null())
                    .col(ColumnDef::new(FundingRequests::ReviewedBy).uuid().null())
                    .col(
                        ColumnDef::new(FundingRequests::ReviewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_requests_user")
                            .from(FundingRequests::Table, FundingRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_funding_requests_user_created
                ON funding_requests (user_id, created_at DESC);
                "#,
            )
            .await?;

        // Admin queue: pending first, oldest first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_funding_requests_status_kind
                ON funding_requests (status, kind, created_at);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_funding_requests_updated_at
                BEFORE UPDATE ON funding_requests
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS update_funding_requests_updated_at ON funding_requests",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FundingRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FundingRequests {
    Table,
    Id,
    UserId,
    Kind,
    Status,
    AmountMinor,
    Currency,
    Method,
    Reference,
    AdminNote,
    RejectionReason,
    ReviewedBy,
    ReviewedAt,
    CreatedAt,
    UpdatedAt,
}
