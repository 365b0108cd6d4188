// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SendgridSettings;
use crate::domain::services::communication::{CommunicationError, EmailRecipient, EmailSender};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// 基于 SendGrid v3 API 的邮件发送实现
pub struct SendGridEmailSender {
    /// HTTP 客户端
    client: reqwest::Client,
    settings: SendgridSettings,
}

impl SendGridEmailSender {
    pub fn new(settings: SendgridSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client, settings }
    }

    /// 构造请求体，收件人姓名缺失或为空时不输出 `name`
    fn payload(&self, to: &EmailRecipient, subject: &str, html: &str) -> Value {
        let mut recipient = Map::new();
        recipient.insert("email".to_string(), Value::String(to.email.clone()));
        if let Some(name) = to.name.as_deref().filter(|n| !n.trim().is_empty()) {
            recipient.insert("name".to_string(), Value::String(name.to_string()));
        }

        let sender = json!({
            "email": self.settings.from_email,
            "name": self.settings.from_name,
        });

        json!({
            "personalizations": [{
                "to": [Value::Object(recipient)],
                "subject": subject,
            }],
            "content": [{ "type": "text/html", "value": html }],
            "from": sender,
            "reply_to": sender,
        })
    }
}

#[async_trait]
impl EmailSender for SendGridEmailSender {
    async fn send_email(
        &self,
        to: &EmailRecipient,
        subject: &str,
        html: &str,
    ) -> Result<(), CommunicationError> {
        if self.settings.key.is_empty() {
            let err = CommunicationError::Config("sendgrid.key is not set".to_string());
            tracing::error!(recipient = %to.email, error = %err, "Failed to send email");
            return Err(err);
        }

        let result = async {
            let response = self
                .client
                .post(&self.settings.endpoint)
                .bearer_auth(&self.settings.key)
                .json(&self.payload(to, subject, html))
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }
            let body = response.text().await.unwrap_or_default();
            Err(CommunicationError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(
                recipient = %to.email,
                subject,
                error = %err,
                "Failed to send email"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(endpoint: String) -> SendgridSettings {
        SendgridSettings {
            key: "SG.test".to_string(),
            endpoint,
            from_email: "contact@servcy.com".to_string(),
            from_name: "Support Team Servcy".to_string(),
        }
    }

    fn expected_body(to: Value) -> Value {
        let sender = json!({ "email": "contact@servcy.com", "name": "Support Team Servcy" });
        json!({
            "personalizations": [{ "to": [to], "subject": "Welcome" }],
            "content": [{ "type": "text/html", "value": "<p>Hi</p>" }],
            "from": sender,
            "reply_to": sender,
        })
    }

    #[tokio::test]
    async fn test_send_email_with_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer SG.test"))
            .and(body_json(expected_body(
                json!({ "email": "ada@servcy.com", "name": "Ada Lovelace" }),
            )))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let sender = SendGridEmailSender::new(settings(format!("{}/v3/mail/send", server.uri())));
        let to = EmailRecipient::new("ada@servcy.com", Some("Ada Lovelace".to_string()));

        sender.send_email(&to, "Welcome", "<p>Hi</p>").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_name_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(expected_body(json!({ "email": "anon@servcy.com" }))))
            .respond_with(ResponseTemplate::new(202))
            .expect(2)
            .mount(&server)
            .await;

        let sender = SendGridEmailSender::new(settings(format!("{}/v3/mail/send", server.uri())));

        sender
            .send_email(&EmailRecipient::new("anon@servcy.com", None), "Welcome", "<p>Hi</p>")
            .await
            .unwrap();
        sender
            .send_email(
                &EmailRecipient::new("anon@servcy.com", Some(String::new())),
                "Welcome",
                "<p>Hi</p>",
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejection_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let sender = SendGridEmailSender::new(settings(format!("{}/v3/mail/send", server.uri())));
        let err = sender
            .send_email(&EmailRecipient::new("ada@servcy.com", None), "Welcome", "<p>Hi</p>")
            .await
            .unwrap_err();

        match err {
            CommunicationError::Rejected { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
