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
        // Integration catalog
        manager
            .create_table(
                Table::create()
                    .table(Integration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Integration::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Integration::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Integration::Logo).string_len(200))
                    .col(
                        ColumnDef::new(Integration::Description)
                            .string_len(5000)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Integration::ConfigureAt).string_len(250))
                    .to_owned(),
            )
            .await?;

        // Connected accounts of a user
        manager
            .create_table(
                Table::create()
                    .table(UserIntegration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserIntegration::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserIntegration::AccountId)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserIntegration::AccountDisplayName)
                            .string_len(250)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(UserIntegration::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserIntegration::IntegrationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserIntegration::MetaData).text())
                    .col(ColumnDef::new(UserIntegration::Configuration).json())
                    .col(
                        ColumnDef::new(UserIntegration::IsRevoked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserIntegration::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserIntegration::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_integration_user")
                            .from(UserIntegration::Table, UserIntegration::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_integration_integration")
                            .from(UserIntegration::Table, UserIntegration::IntegrationId)
                            .to(Integration::Table, Integration::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_user_integration_account")
                    .table(UserIntegration::Table)
                    .col(UserIntegration::UserId)
                    .col(UserIntegration::IntegrationId)
                    .col(UserIntegration::AccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Events an integration can emit
        manager
            .create_table(
                Table::create()
                    .table(IntegrationEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IntegrationEvent::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IntegrationEvent::IntegrationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IntegrationEvent::Name)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IntegrationEvent::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_integration_event_integration")
                            .from(IntegrationEvent::Table, IntegrationEvent::IntegrationId)
                            .to(Integration::Table, Integration::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_integration_event_name")
                    .table(IntegrationEvent::Table)
                    .col(IntegrationEvent::IntegrationId)
                    .col(IntegrationEvent::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Events a user has switched off for one connected account
        manager
            .create_table(
                Table::create()
                    .table(DisabledUserIntegrationEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DisabledUserIntegrationEvent::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DisabledUserIntegrationEvent::UserIntegrationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DisabledUserIntegrationEvent::IntegrationEventId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DisabledUserIntegrationEvent::Actions)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DisabledUserIntegrationEvent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DisabledUserIntegrationEvent::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_disabled_event_user_integration")
                            .from(
                                DisabledUserIntegrationEvent::Table,
                                DisabledUserIntegrationEvent::UserIntegrationId,
                            )
                            .to(UserIntegration::Table, UserIntegration::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_disabled_event_integration_event")
                            .from(
                                DisabledUserIntegrationEvent::Table,
                                DisabledUserIntegrationEvent::IntegrationEventId,
                            )
                            .to(IntegrationEvent::Table, IntegrationEvent::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_disabled_user_integration_event")
                    .table(DisabledUserIntegrationEvent::Table)
                    .col(DisabledUserIntegrationEvent::UserIntegrationId)
                    .col(DisabledUserIntegrationEvent::IntegrationEventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Legacy account link table, superseded by user_integration
        manager
            .create_table(
                Table::create()
                    .table(IntegrationUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IntegrationUser::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IntegrationUser::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(IntegrationUser::IntegrationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IntegrationUser::AccountId)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IntegrationUser::MetaData).text())
                    .col(
                        ColumnDef::new(IntegrationUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(IntegrationUser::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_integration_user_account")
                    .table(IntegrationUser::Table)
                    .col(IntegrationUser::UserId)
                    .col(IntegrationUser::IntegrationId)
                    .col(IntegrationUser::AccountId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IntegrationUser::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(DisabledUserIntegrationEvent::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(IntegrationEvent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserIntegration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Integration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Integration {
    Table,
    Id,
    Name,
    Logo,
    Description,
    ConfigureAt,
}

#[derive(DeriveIden)]
enum UserIntegration {
    Table,
    Id,
    AccountId,
    AccountDisplayName,
    UserId,
    IntegrationId,
    MetaData,
    Configuration,
    IsRevoked,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum IntegrationEvent {
    Table,
    Id,
    IntegrationId,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum DisabledUserIntegrationEvent {
    Table,
    Id,
    UserIntegrationId,
    IntegrationEventId,
    Actions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum IntegrationUser {
    Table,
    Id,
    UserId,
    IntegrationId,
    AccountId,
    MetaData,
    CreatedAt,
    UpdatedAt,
}
