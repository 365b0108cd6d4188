// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{HostType, Settings};
use config::{File, FileFormat};

fn load(ini: &str) -> Result<Settings, config::ConfigError> {
    Settings::with_defaults()?
        .add_source(File::from_str(ini, FileFormat::Ini))
        .build()?
        .try_deserialize()
}

#[test]
fn test_defaults_describe_a_development_host() {
    let settings = load("").expect("defaults should deserialize");

    assert_eq!(settings.main.host_type, HostType::Development);
    assert!(settings.is_debug());
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.jwt.access_token_lifetime_minutes, 15);
    assert_eq!(settings.jwt.refresh_token_lifetime_days, 1);
    assert!(settings.jwt.rotate_refresh_tokens);
    assert!(settings.google_oauth.client_id.is_none());
}

#[test]
fn test_ini_host_type_selects_production() {
    let ini = r#"
[main]
host_type = production
secret_key = s3cr3t

[database]
url = postgres://servcy@db/servcy

[sendgrid]
key = SG.test
"#;
    let settings = load(ini).expect("ini should deserialize");

    assert_eq!(settings.main.host_type, HostType::Production);
    assert!(!settings.is_debug());
    assert_eq!(settings.main.secret_key, "s3cr3t");
    assert_eq!(settings.database.url, "postgres://servcy@db/servcy");
    assert_eq!(settings.sendgrid.key, "SG.test");
    assert_eq!(settings.sendgrid.from_email, "contact@servcy.com");
}

#[test]
fn test_unknown_host_type_is_rejected() {
    let ini = "[main]\nhost_type = staging\n";
    assert!(load(ini).is_err());
}

#[test]
fn test_google_oauth_section_is_optional_per_field() {
    let ini = "[google_oauth]\nclient_id = abc\n";
    let settings = load(ini).expect("ini should deserialize");

    assert_eq!(settings.google_oauth.client_id.as_deref(), Some("abc"));
    assert!(settings.google_oauth.client_secret.is_none());
}
