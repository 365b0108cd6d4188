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
        // Create subscription table
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscription::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscription::WorkspaceId).uuid())
                    .col(
                        ColumnDef::new(Subscription::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Subscription::PlanDetails).json().not_null())
                    .col(
                        ColumnDef::new(Subscription::CustomerDetails)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscription::SubscriptionId)
                            .string_len(1000)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subscription::Limits).json().not_null())
                    .col(ColumnDef::new(Subscription::CreatedById).uuid())
                    .col(ColumnDef::new(Subscription::UpdatedById).uuid())
                    .col(
                        ColumnDef::new(Subscription::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Subscription::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_workspace")
                            .from(Subscription::Table, Subscription::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Processed billing provider events, one row per external event id
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionWebhookEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionWebhookEvent::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionWebhookEvent::EventId)
                            .string_len(1000)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SubscriptionWebhookEvent::EventType).string_len(255))
                    .col(ColumnDef::new(SubscriptionWebhookEvent::Payload).json())
                    .col(
                        ColumnDef::new(SubscriptionWebhookEvent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SubscriptionWebhookEvent::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Workspaces {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subscription {
    Table,
    Id,
    WorkspaceId,
    IsActive,
    PlanDetails,
    CustomerDetails,
    SubscriptionId,
    Limits,
    CreatedById,
    UpdatedById,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubscriptionWebhookEvent {
    Table,
    Id,
    EventId,
    EventType,
    Payload,
    CreatedAt,
}
