// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::subscription::{Subscription, SubscriptionWebhookEvent};
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// 计费事件处理错误
#[derive(Error, Debug)]
pub enum BillingError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// 事件缺少必要字段
    #[error("Malformed billing event: missing {0}")]
    MalformedEvent(&'static str),
}

/// 事件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Processed,
    AlreadyProcessed,
}

/// 校验 `Paddle-Signature` 头
///
/// 头格式为 `ts=<unix>;h1=<hex>`，签名内容为 `ts:body`。密钥为空时一律拒绝
pub fn verify_paddle_signature(secret: &str, header: &str, body: &[u8]) -> bool {
    if secret.is_empty() {
        return false;
    }
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(';') {
        match part.trim().split_once('=') {
            Some(("ts", value)) => timestamp = Some(value),
            Some(("h1", value)) => signatures.push(value),
            _ => {}
        }
    }
    let Some(timestamp) = timestamp else {
        return false;
    };

    signatures.into_iter().any(|signature| {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    })
}

/// 计算签名头，供测试和本地调试使用
pub fn sign_paddle_payload(secret: &str, timestamp: i64, body: &[u8]) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b":");
    mac.update(body);
    format!("ts={};h1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

/// 计费服务
///
/// 将计费平台的订阅事件同步到 `subscription` 表
pub struct BillingService<R: SubscriptionRepository> {
    repo: Arc<R>,
    plus_price_id: String,
}

impl<R: SubscriptionRepository> BillingService<R> {
    pub fn new(repo: Arc<R>, plus_price_id: impl Into<String>) -> Self {
        Self {
            repo,
            plus_price_id: plus_price_id.into(),
        }
    }

    /// 工作空间当前有效订阅
    pub async fn active_subscription(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<Subscription>, RepositoryError> {
        self.repo.find_active_for_workspace(workspace_id).await
    }

    /// 处理一条已通过签名校验的事件
    pub async fn process_event(&self, event: &Value) -> Result<EventOutcome, BillingError> {
        let event_id = event
            .get("event_id")
            .and_then(Value::as_str)
            .ok_or(BillingError::MalformedEvent("event_id"))?;
        if self.repo.event_exists(event_id).await? {
            return Ok(EventOutcome::AlreadyProcessed);
        }

        let event_type = event
            .get("event_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let data = event.get("data").ok_or(BillingError::MalformedEvent("data"))?;
        let subscription_id = data
            .get("id")
            .and_then(Value::as_str)
            .ok_or(BillingError::MalformedEvent("data.id"))?;

        match self
            .repo
            .record_event(&SubscriptionWebhookEvent::new(
                event_id,
                Some(event_type.clone()),
                event.clone(),
            ))
            .await
        {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Ok(EventOutcome::AlreadyProcessed),
            Err(e) => return Err(e.into()),
        }

        match event_type.as_str() {
            "subscription.created" => {
                let plan = self.plan_name(data);
                let customer = json!({
                    "id": data.get("customer_id").cloned().unwrap_or(Value::Null),
                    "address_id": data.get("address_id").cloned().unwrap_or(Value::Null),
                    "business_id": data.get("business_id").cloned().unwrap_or(Value::Null),
                });
                let mut subscription = Subscription::pending(subscription_id, plan, customer);
                subscription.workspace_id = data
                    .pointer("/custom_data/workspace_id")
                    .and_then(Value::as_str)
                    .and_then(|id| Uuid::parse_str(id).ok());
                self.repo.create(&subscription).await?;
                tracing::info!(subscription_id, plan, "Subscription created");
            }
            "subscription.activated" | "subscription.resumed" => {
                let updated = self.repo.set_active(subscription_id, true).await?;
                tracing::info!(subscription_id, updated, %event_type, "Subscription activated");
            }
            "subscription.canceled" | "subscription.paused" | "subscription.past_due" => {
                let updated = self.repo.set_active(subscription_id, false).await?;
                tracing::info!(subscription_id, updated, %event_type, "Subscription deactivated");
            }
            other => {
                tracing::debug!(event_type = other, "Ignoring billing event");
            }
        }

        Ok(EventOutcome::Processed)
    }

    fn plan_name(&self, data: &Value) -> &'static str {
        let price_id = data
            .pointer("/items/0/price/id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !self.plus_price_id.is_empty() && price_id == self.plus_price_id {
            "Plus"
        } else {
            "Business"
        }
    }
}
