// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::User;
use crate::domain::models::notification::EmailNotificationLog;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::notification_repository::NotificationRepository;
use crate::domain::services::communication::{EmailRecipient, EmailSender};
use chrono::Utc;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 一轮汇总的结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DigestReport {
    pub groups: usize,
    pub sent: usize,
    pub failed: usize,
}

type GroupKey = (Uuid, String, Option<i64>);

/// 邮件通知汇总工作器
///
/// 定期取出未处理的邮件通知日志，按接收者和实体分组，每组发送一封邮件
pub struct EmailDigestWorker<N, A>
where
    N: NotificationRepository + 'static,
    A: AccountRepository + 'static,
{
    notifications: Arc<N>,
    accounts: Arc<A>,
    sender: Arc<dyn EmailSender>,
    interval: Duration,
    batch_size: u64,
    frontend_url: String,
}

impl<N, A> EmailDigestWorker<N, A>
where
    N: NotificationRepository + 'static,
    A: AccountRepository + 'static,
{
    pub fn new(
        notifications: Arc<N>,
        accounts: Arc<A>,
        sender: Arc<dyn EmailSender>,
        interval: Duration,
        batch_size: u64,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            notifications,
            accounts,
            sender,
            interval,
            batch_size,
            frontend_url: frontend_url.into(),
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Email digest worker started");

        let mut interval = tokio::time::interval(self.interval);
        loop {
            interval.tick().await;

            match self.process_batch().await {
                Ok(report) if report.groups > 0 => {
                    info!(
                        groups = report.groups,
                        sent = report.sent,
                        failed = report.failed,
                        "Email digest batch processed"
                    );
                }
                Ok(_) => {}
                Err(e) => error!("Failed to process email digest: {}", e),
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 处理一批日志
    ///
    /// 每组无论成功与否都会写入处理时间，发送成功时同时写入发送时间
    pub async fn process_batch(&self) -> Result<DigestReport, RepositoryError> {
        let logs = self.notifications.pending_email_logs(self.batch_size).await?;
        if logs.is_empty() {
            return Ok(DigestReport::default());
        }

        let groups = group_logs(logs);
        let mut receiver_ids: Vec<Uuid> = groups.iter().map(|((id, _, _), _)| *id).collect();
        receiver_ids.sort();
        receiver_ids.dedup();
        let users: HashMap<Uuid, User> = self
            .accounts
            .find_users(&receiver_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut report = DigestReport {
            groups: groups.len(),
            ..Default::default()
        };

        for ((receiver_id, entity_name, entity_identifier), logs) in groups {
            let ids: Vec<Uuid> = logs.iter().map(|l| l.id).collect();

            let sent = match users.get(&receiver_id) {
                Some(user) => {
                    let recipient = EmailRecipient::new(user.email.clone(), user.full_name());
                    let subject = digest_subject(&entity_name, entity_identifier, logs.len());
                    let html = render_digest(&entity_name, entity_identifier, &logs, &self.frontend_url);
                    self.sender
                        .send_email(&recipient, &subject, &html)
                        .await
                        .is_ok()
                }
                None => {
                    warn!(%receiver_id, "Receiver of email notification no longer exists");
                    false
                }
            };

            if sent {
                report.sent += 1;
            } else {
                report.failed += 1;
            }
            self.notifications
                .mark_email_logs(&ids, Utc::now(), sent)
                .await?;
        }

        Ok(report)
    }
}

/// 按 `(接收者, 实体名, 实体编号)` 分组，组内保持创建顺序
fn group_logs(logs: Vec<EmailNotificationLog>) -> Vec<(GroupKey, Vec<EmailNotificationLog>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<EmailNotificationLog>)> = Vec::new();

    for log in logs {
        let key = (log.receiver_id, log.entity_name.clone(), log.entity_identifier);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(log),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![log]));
            }
        }
    }
    groups
}

fn entity_label(entity_name: &str, entity_identifier: Option<i64>) -> String {
    match entity_identifier {
        Some(id) => format!("{} #{}", entity_name, id),
        None => entity_name.to_string(),
    }
}

fn digest_subject(entity_name: &str, entity_identifier: Option<i64>, count: usize) -> String {
    let label = entity_label(entity_name, entity_identifier);
    if count == 1 {
        format!("1 update on {}", label)
    } else {
        format!("{} updates on {}", count, label)
    }
}

fn render_digest(
    entity_name: &str,
    entity_identifier: Option<i64>,
    logs: &[EmailNotificationLog],
    frontend_url: &str,
) -> String {
    let items: String = logs
        .iter()
        .map(|log| {
            let change = match (&log.old_value, &log.new_value) {
                (Some(old), Some(new)) => {
                    format!("{} &rarr; {}", encode_text(old), encode_text(new))
                }
                (None, Some(new)) => encode_text(new).into_owned(),
                (Some(old), None) => format!("removed {}", encode_text(old)),
                (None, None) => "updated".to_string(),
            };
            format!("<li><strong>{}</strong>: {}</li>", encode_text(&log.entity), change)
        })
        .collect();

    format!(
        "<p>There are new updates on {}.</p><ul>{}</ul><p><a href=\"{}\">Open Servcy</a></p>",
        encode_text(&entity_label(entity_name, entity_identifier)),
        items,
        encode_double_quoted_attribute(frontend_url)
    )
}

#[cfg(test)]
#[path = "email_digest_worker_test.rs"]
mod tests;
