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
        // Create notification table
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notification::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notification::WorkspaceId).uuid().not_null())
                    .col(ColumnDef::new(Notification::ProjectId).uuid())
                    .col(ColumnDef::new(Notification::Data).json())
                    .col(ColumnDef::new(Notification::EntityIdentifier).big_integer())
                    .col(
                        ColumnDef::new(Notification::EntityName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notification::Title).text().not_null())
                    .col(ColumnDef::new(Notification::Message).json())
                    .col(
                        ColumnDef::new(Notification::MessageHtml)
                            .text()
                            .not_null()
                            .default("<p></p>"),
                    )
                    .col(ColumnDef::new(Notification::MessageStripped).text())
                    .col(ColumnDef::new(Notification::Sender).string_len(255).not_null())
                    .col(ColumnDef::new(Notification::TriggeredById).uuid())
                    .col(ColumnDef::new(Notification::ReceiverId).uuid().not_null())
                    .col(ColumnDef::new(Notification::ReadAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notification::SnoozedTill).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notification::ArchivedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notification::CreatedById).uuid())
                    .col(ColumnDef::new(Notification::UpdatedById).uuid())
                    .col(
                        ColumnDef::new(Notification::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Notification::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_workspace")
                            .from(Notification::Table, Notification::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_receiver")
                            .from(Notification::Table, Notification::ReceiverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_triggered_by")
                            .from(Notification::Table, Notification::TriggeredById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_receiver_workspace")
                    .table(Notification::Table)
                    .col(Notification::ReceiverId)
                    .col(Notification::WorkspaceId)
                    .col(Notification::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create email_notification_log table
        manager
            .create_table(
                Table::create()
                    .table(EmailNotificationLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailNotificationLog::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmailNotificationLog::ReceiverId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailNotificationLog::TriggeredById)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmailNotificationLog::EntityIdentifier).big_integer())
                    .col(
                        ColumnDef::new(EmailNotificationLog::EntityName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmailNotificationLog::Data).json())
                    .col(
                        ColumnDef::new(EmailNotificationLog::ProcessedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(EmailNotificationLog::SentAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(EmailNotificationLog::Entity)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmailNotificationLog::OldValue).string_len(300))
                    .col(ColumnDef::new(EmailNotificationLog::NewValue).string_len(300))
                    .col(ColumnDef::new(EmailNotificationLog::CreatedById).uuid())
                    .col(ColumnDef::new(EmailNotificationLog::UpdatedById).uuid())
                    .col(
                        ColumnDef::new(EmailNotificationLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(EmailNotificationLog::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_notification_log_receiver")
                            .from(EmailNotificationLog::Table, EmailNotificationLog::ReceiverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_notification_log_triggered_by")
                            .from(
                                EmailNotificationLog::Table,
                                EmailNotificationLog::TriggeredById,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_email_notification_log_processed")
                    .table(EmailNotificationLog::Table)
                    .col(EmailNotificationLog::ProcessedAt)
                    .to_owned(),
            )
            .await?;

        // Create user_notification_preference table
        manager
            .create_table(
                Table::create()
                    .table(UserNotificationPreference::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserNotificationPreference::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserNotificationPreference::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserNotificationPreference::WorkspaceId).uuid())
                    .col(ColumnDef::new(UserNotificationPreference::ProjectId).uuid())
                    .col(
                        ColumnDef::new(UserNotificationPreference::PropertyChange)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserNotificationPreference::StateChange)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserNotificationPreference::Comment)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserNotificationPreference::Mention)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserNotificationPreference::IssueCompleted)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(UserNotificationPreference::CreatedById).uuid())
                    .col(ColumnDef::new(UserNotificationPreference::UpdatedById).uuid())
                    .col(
                        ColumnDef::new(UserNotificationPreference::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserNotificationPreference::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_notification_preference_user")
                            .from(
                                UserNotificationPreference::Table,
                                UserNotificationPreference::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_notification_preference_workspace")
                            .from(
                                UserNotificationPreference::Table,
                                UserNotificationPreference::WorkspaceId,
                            )
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UserNotificationPreference::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EmailNotificationLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Workspaces {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    Id,
    WorkspaceId,
    ProjectId,
    Data,
    EntityIdentifier,
    EntityName,
    Title,
    Message,
    MessageHtml,
    MessageStripped,
    Sender,
    TriggeredById,
    ReceiverId,
    ReadAt,
    SnoozedTill,
    ArchivedAt,
    CreatedById,
    UpdatedById,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmailNotificationLog {
    Table,
    Id,
    ReceiverId,
    TriggeredById,
    EntityIdentifier,
    EntityName,
    Data,
    ProcessedAt,
    SentAt,
    Entity,
    OldValue,
    NewValue,
    CreatedById,
    UpdatedById,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserNotificationPreference {
    Table,
    Id,
    UserId,
    WorkspaceId,
    ProjectId,
    PropertyChange,
    StateChange,
    Comment,
    Mention,
    IssueCompleted,
    CreatedById,
    UpdatedById,
    CreatedAt,
    UpdatedAt,
}
