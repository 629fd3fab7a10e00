use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(16)
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::Username).string_len(50).null().unique_key())
                    .col(ColumnDef::new(Users::Country).string_len(100).not_null())
                    .col(ColumnDef::new(Users::Gender).string_len(32).null())
                    .col(ColumnDef::new(Users::DateOfBirth).date().null())
                    .col(ColumnDef::new(Users::Phone).string_len(32).null())
                    .col(ColumnDef::new(Users::AddressLine).string_len(255).null())
                    .col(ColumnDef::new(Users::City).string_len(100).null())
                    .col(ColumnDef::new(Users::State).string_len(100).null())
                    .col(ColumnDef::new(Users::PostalCode).string_len(20).null())
                    .col(ColumnDef::new(Users::AvatarPath).string_len(512).null())
                    .col(
                        ColumnDef::new(Users::EmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::ReferrerId).uuid().null())
                    .col(
                        ColumnDef::new(Users::KycStatus)
                            .string_len(16)
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(Users::KycVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::KycFullName).string_len(200).null())
                    .col(ColumnDef::new(Users::KycDateOfBirth).date().null())
                    .col(ColumnDef::new(Users::KycIdType).string_len(32).null())
                    .col(ColumnDef::new(Users::KycIdNumber).string_len(64).null())
                    .col(ColumnDef::new(Users::KycIdFrontPath).string_len(512).null())
                    .col(ColumnDef::new(Users::KycIdBackPath).string_len(512).null())
                    .col(ColumnDef::new(Users::KycSelfiePath).string_len(512).null())
                    .col(
                        ColumnDef::new(Users::KycSubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Users::KycReviewedBy).uuid().null())
                    .col(
                        ColumnDef::new(Users::KycVerifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Users::KycAdminNote).text().null())
                    .col(
                        ColumnDef::new(Users::KycRejectedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Users::KycRejectionReason).text().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_referrer")
                            .from(Users::Table, Users::ReferrerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Referral counts and the admin KYC queue
        manager
            .create_index(
                Index::create()
                    .name("idx_users_referrer_id")
                    .table(Users::Table)
                    .col(Users::ReferrerId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_kyc_queue
                ON users (kyc_status, kyc_submitted_at);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_created_at
                ON users (created_at DESC);
                "#,
            )
            .await?;

        // updated_at trigger
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = CURRENT_TIMESTAMP;
                    RETURN NEW;
                END;
                $$ language 'plpgsql';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_users_updated_at
                BEFORE UPDATE ON users
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
            .execute_unprepared("DROP TRIGGER IF EXISTS update_users_updated_at ON users")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS update_updated_at_column CASCADE")
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    Username,
    Country,
    Gender,
    DateOfBirth,
    Phone,
    AddressLine,
    City,
    State,
    PostalCode,
    AvatarPath,
    EmailVerified,
    ReferrerId,
    KycStatus,
    KycVerified,
    KycFullName,
    KycDateOfBirth,
    KycIdType,
    KycIdNumber,
    KycIdFrontPath,
    KycIdBackPath,
    KycSelfiePath,
    KycSubmittedAt,
    KycReviewedBy,
    KycVerifiedAt,
    KycAdminNote,
    KycRejectedAt,
    KycRejectionReason,
    CreatedAt,
    UpdatedAt,
}
