// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create inbox table
        manager
            .create_table(
                Table::create()
                    .table(Inbox::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Inbox::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Inbox::Uid).string_len(255).not_null())
                    .col(ColumnDef::new(Inbox::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Inbox::Body).text())
                    .col(
                        ColumnDef::new(Inbox::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Inbox::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Inbox::Cause).string_len(10000))
                    .col(
                        ColumnDef::new(Inbox::IsBodyHtml)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Inbox::UserIntegrationId).uuid().not_null())
                    .col(ColumnDef::new(Inbox::Category).string_len(255))
                    .col(
                        ColumnDef::new(Inbox::IAmMentioned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Inbox::Attachments).json())
                    .col(
                        ColumnDef::new(Inbox::Status)
                            .small_integer()
                            .not_null()
                            .default(-2),
                    )
                    .col(ColumnDef::new(Inbox::SnoozedTill).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Inbox::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Inbox::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inbox_user_integration")
                            .from(Inbox::Table, Inbox::UserIntegrationId)
                            .to(UserIntegration::Table, UserIntegration::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_inbox_uid_user_integration")
                    .table(Inbox::Table)
                    .col(Inbox::Uid)
                    .col(Inbox::UserIntegrationId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inbox::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserIntegration {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Inbox {
    Table,
    Id,
    Uid,
    Title,
    Body,
    IsArchived,
    IsRead,
    Cause,
    IsBodyHtml,
    UserIntegrationId,
    Category,
    IAmMentioned,
    Attachments,
    Status,
    SnoozedTill,
    CreatedAt,
    UpdatedAt,
}
