// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 文档实体
///
/// 删除为软删除，只设置 `is_deleted`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub file: Option<String>,
    pub link: Option<String>,
    pub meta_data: serde_json::Value,
    pub workspace_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_by_id: Option<Uuid>,
    pub updated_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建文档请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDocument {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1024))]
    pub file: Option<String>,
    #[validate(url, length(max = 200))]
    pub link: Option<String>,
    pub meta_data: Option<serde_json::Value>,
    pub workspace_id: Option<Uuid>,
}

impl Document {
    pub fn create(input: NewDocument, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            file: input.file,
            link: input.link,
            meta_data: input
                .meta_data
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            workspace_id: input.workspace_id,
            is_deleted: false,
            created_by_id: Some(owner_id),
            updated_by_id: Some(owner_id),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, link: Option<&str>) -> NewDocument {
        NewDocument {
            name: name.to_string(),
            file: None,
            link: link.map(str::to_string),
            meta_data: None,
            workspace_id: None,
        }
    }

    #[test]
    fn test_validation() {
        assert!(input("Roadmap", Some("https://servcy.com/roadmap")).validate().is_ok());
        assert!(input("", None).validate().is_err());
        assert!(input(&"a".repeat(101), None).validate().is_err());
        assert!(input("Roadmap", Some("not a url")).validate().is_err());
    }

    #[test]
    fn test_create_defaults_meta_data() {
        let owner = Uuid::new_v4();
        let document = Document::create(input("Spec", None), owner);
        assert_eq!(document.meta_data, serde_json::json!({}));
        assert_eq!(document.created_by_id, Some(owner));
        assert!(!document.is_deleted);
    }
}
