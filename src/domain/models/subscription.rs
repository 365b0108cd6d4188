// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// 套餐及其可邀请成员数
pub const PLAN_LIMITS: [(&str, u32); 4] = [
    ("starter", 3),
    ("plus", 10),
    ("business", 25),
    ("enterprise", 50),
];

/// 查询套餐限制，名称不区分大小写
pub fn plan_limits(plan_name: &str) -> Option<Value> {
    let name = plan_name.to_lowercase();
    PLAN_LIMITS
        .iter()
        .find(|(plan, _)| *plan == name)
        .map(|(_, invitations)| json!({ "invitations": invitations }))
}

/// 工作空间订阅
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: Uuid,
    pub workspace_id: Option<Uuid>,
    pub is_active: bool,
    pub plan_details: Value,
    pub customer_details: Value,
    pub subscription_id: String,
    pub limits: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// 根据计费事件创建订阅，初始状态为未激活
    pub fn pending(subscription_id: impl Into<String>, plan_name: &str, customer: Value) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id: None,
            is_active: false,
            plan_details: json!({ "name": plan_name }),
            customer_details: customer,
            subscription_id: subscription_id.into(),
            limits: plan_limits(plan_name).unwrap_or_else(|| json!({})),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 没有有效订阅时返回的免费试用套餐
pub fn starter_plan() -> Value {
    json!({
        "plan_details": { "name": "Starter Plan" },
        "valid_till": null,
        "subscription_details": {},
        "is_active": true,
        "is_trial": true,
    })
}

/// 已处理的计费 Webhook 事件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionWebhookEvent {
    pub id: Uuid,
    pub event_id: String,
    pub event_type: Option<String>,
    pub payload: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionWebhookEvent {
    pub fn new(event_id: impl Into<String>, event_type: Option<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id: event_id.into(),
            event_type,
            payload: Some(payload),
            created_at: Utc::now(),
        }
    }
}
