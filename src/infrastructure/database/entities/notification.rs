// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub project_id: Option<Uuid>,
    pub data: Option<Json>,
    pub entity_identifier: Option<i64>,
    pub entity_name: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub message: Option<Json>,
    #[sea_orm(column_type = "Text")]
    pub message_html: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message_stripped: Option<String>,
    pub sender: String,
    pub triggered_by_id: Option<Uuid>,
    pub receiver_id: Uuid,
    pub read_at: Option<DateTimeWithTimeZone>,
    pub snoozed_till: Option<DateTimeWithTimeZone>,
    pub archived_at: Option<DateTimeWithTimeZone>,
    pub created_by_id: Option<Uuid>,
    pub updated_by_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
