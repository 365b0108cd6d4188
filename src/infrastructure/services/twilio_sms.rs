// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::TwilioSettings;
use crate::domain::services::communication::{CommunicationError, SmsSender};
use async_trait::async_trait;
use std::time::Duration;

/// 基于 Twilio Messages API 的短信发送实现
pub struct TwilioSmsSender {
    client: reqwest::Client,
    settings: TwilioSettings,
}

impl TwilioSmsSender {
    pub fn new(settings: TwilioSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client, settings }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), CommunicationError> {
        let result = async {
            if self.settings.account_sid.is_empty() || self.settings.auth_token.is_empty() {
                return Err(CommunicationError::Config(
                    "twilio credentials are not set".to_string(),
                ));
            }

            let form = [
                ("To", to),
                ("From", self.settings.from_number.as_str()),
                ("Body", body),
            ];
            let response = self
                .client
                .post(self.messages_url())
                .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
                .form(&form)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }
            Err(CommunicationError::Rejected {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(to, error = %err, "Failed to send SMS");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(api_base: String) -> TwilioSettings {
        TwilioSettings {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550001111".to_string(),
            api_base,
        }
    }

    #[tokio::test]
    async fn test_send_sms_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(header_exists("authorization"))
            .and(body_string_contains("To=%2B15552223333"))
            .and(body_string_contains("Body=Your+code+is+1234"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let sender = TwilioSmsSender::new(settings(server.uri()));
        sender.send_sms("+15552223333", "Your code is 1234").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_sms_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid number"))
            .mount(&server)
            .await;

        let sender = TwilioSmsSender::new(settings(server.uri()));
        let err = sender.send_sms("bogus", "hi").await.unwrap_err();
        assert!(matches!(err, CommunicationError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let mut settings = settings("http://127.0.0.1:9".to_string());
        settings.auth_token.clear();
        let sender = TwilioSmsSender::new(settings);

        assert!(matches!(
            sender.send_sms("+15552223333", "hi").await,
            Err(CommunicationError::Config(_))
        ));
    }
}
