// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 通信错误类型
#[derive(Error, Debug)]
pub enum CommunicationError {
    /// 请求未能发出或响应无法读取
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// 服务商拒绝了请求
    #[error("Provider rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// 配置缺失或无效
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 邮件收件人
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecipient {
    pub email: String,
    pub name: Option<String>,
}

impl EmailRecipient {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name,
        }
    }
}

/// 邮件发送特质
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送一封 HTML 邮件
    ///
    /// 失败时记录日志并将错误返回给调用方
    async fn send_email(
        &self,
        to: &EmailRecipient,
        subject: &str,
        html: &str,
    ) -> Result<(), CommunicationError>;
}

/// 短信发送特质
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// 向 E.164 格式的号码发送短信
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), CommunicationError>;
}
