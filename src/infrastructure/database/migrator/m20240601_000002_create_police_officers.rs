//! Create police_officers table

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_organizations::Organizations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PoliceOfficers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PoliceOfficers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PoliceOfficers::FirstName).string())
                    .col(ColumnDef::new(PoliceOfficers::LastName).string())
                    .col(ColumnDef::new(PoliceOfficers::BadgeNumber).string())
                    .col(ColumnDef::new(PoliceOfficers::Rank).string())
                    .col(ColumnDef::new(PoliceOfficers::OrganizationId).integer())
                    .col(
                        ColumnDef::new(PoliceOfficers::VerificationStatus)
                            .string_len(20)
                            .not_null()
                            .default("unverified"),
                    )
                    .col(ColumnDef::new(PoliceOfficers::EstimatedDob).string())
                    .col(
                        ColumnDef::new(PoliceOfficers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_police_officers_organization")
                            .from(PoliceOfficers::Table, PoliceOfficers::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_police_officers_organization_id")
                    .table(PoliceOfficers::Table)
                    .col(PoliceOfficers::OrganizationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PoliceOfficers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PoliceOfficers {
    Table,
    Id,
    FirstName,
    LastName,
    BadgeNumber,
    Rank,
    OrganizationId,
    VerificationStatus,
    EstimatedDob,
    CreatedAt,
}
