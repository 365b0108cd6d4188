// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::GoogleOAuthSettings;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("{0} is not configured")]
    Missing(&'static str),
}

/// Google OAuth2 客户端凭据
#[derive(Debug, Clone, Serialize)]
pub struct GoogleCredentials {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub token_uri: String,
    pub auth_uri: Option<String>,
    pub scopes: Vec<String>,
    pub redirect_uri: String,
    pub user_info_uri: String,
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, CredentialsError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(CredentialsError::Missing(name))
}

/// 读取 Google OAuth2 凭据，任一必填项缺失时立即失败
pub fn get_google_credentials(
    settings: &GoogleOAuthSettings,
) -> Result<GoogleCredentials, CredentialsError> {
    let client_id = required(&settings.client_id, "GOOGLE_OAUTH2_CLIENT_ID")?;
    let client_secret = required(&settings.client_secret, "GOOGLE_OAUTH2_CLIENT_SECRET")?;
    let token_uri = required(&settings.token_uri, "GOOGLE_OAUTH2_TOKEN_URI")?;
    let scopes = required(&settings.scopes, "GOOGLE_OAUTH2_SCOPES")?;
    let redirect_uri = required(&settings.redirect_uri, "GOOGLE_OAUTH2_REDIRECT_URI")?;
    let user_info_uri = required(&settings.user_info_uri, "GOOGLE_OAUTH2_USER_INFO_URI")?;

    Ok(GoogleCredentials {
        client_id,
        client_secret,
        token_uri,
        auth_uri: settings.auth_uri.clone().filter(|v| !v.trim().is_empty()),
        scopes: scopes.split_whitespace().map(str::to_string).collect(),
        redirect_uri,
        user_info_uri,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: Some("client".to_string()),
            client_secret: Some("secret".to_string()),
            token_uri: Some("https://oauth2.googleapis.com/token".to_string()),
            auth_uri: None,
            redirect_uri: Some("https://servcy.com/integrations/oauth/google".to_string()),
            scopes: Some("openid email  profile".to_string()),
            user_info_uri: Some("https://www.googleapis.com/oauth2/v3/userinfo".to_string()),
        }
    }

    #[test]
    fn test_complete_credentials() {
        let creds = get_google_credentials(&complete()).unwrap();
        assert_eq!(creds.client_id, "client");
        assert_eq!(creds.scopes, vec!["openid", "email", "profile"]);
        assert!(creds.auth_uri.is_none());
    }

    #[test]
    fn test_first_missing_value_is_reported() {
        let mut settings = complete();
        settings.scopes = None;
        settings.user_info_uri = Some("  ".to_string());
        assert_eq!(
            get_google_credentials(&settings).unwrap_err(),
            CredentialsError::Missing("GOOGLE_OAUTH2_SCOPES")
        );

        assert_eq!(
            get_google_credentials(&GoogleOAuthSettings::default()).unwrap_err(),
            CredentialsError::Missing("GOOGLE_OAUTH2_CLIENT_ID")
        );
    }
}
