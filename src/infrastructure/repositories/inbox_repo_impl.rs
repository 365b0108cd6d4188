// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::inbox::{InboxItem, InboxPage, InboxQuery, InboxStatus, NewInboxItem};
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::inbox_repository::InboxRepository;
use crate::infrastructure::database::entities::{inbox, integration, user_integration};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Query, SimpleExpr};
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 收件箱仓库实现
#[derive(Clone)]
pub struct InboxRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl InboxRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_existing(
        &self,
        uid: &str,
        user_integration_id: Uuid,
    ) -> Result<Option<inbox::Model>, DbErr> {
        inbox::Entity::find()
            .filter(inbox::Column::Uid.eq(uid))
            .filter(inbox::Column::UserIntegrationId.eq(user_integration_id))
            .one(self.db.as_ref())
            .await
    }
}

/// 属于用户的集成下的条目
fn owned_by(user_id: Uuid) -> SimpleExpr {
    inbox::Column::UserIntegrationId.in_subquery(
        Query::select()
            .column(user_integration::Column::Id)
            .from(user_integration::Entity)
            .and_where(user_integration::Column::UserId.eq(user_id))
            .to_owned(),
    )
}

fn from_source(source: &str) -> SimpleExpr {
    inbox::Column::UserIntegrationId.in_subquery(
        Query::select()
            .column(user_integration::Column::Id)
            .from(user_integration::Entity)
            .and_where(
                user_integration::Column::IntegrationId.in_subquery(
                    Query::select()
                        .column(integration::Column::Id)
                        .from(integration::Entity)
                        .and_where(integration::Column::Name.eq(source))
                        .to_owned(),
                ),
            )
            .to_owned(),
    )
}

#[async_trait]
impl InboxRepository for InboxRepositoryImpl {
    async fn add_item(&self, item: &NewInboxItem) -> Result<(InboxItem, bool), RepositoryError> {
        if let Some(existing) = self.find_existing(&item.uid, item.user_integration_id).await? {
            return Ok((existing.into(), false));
        }

        let now = Utc::now();
        let active = inbox::ActiveModel {
            id: Set(Uuid::new_v4()),
            uid: Set(item.uid.clone()),
            title: Set(item.title.clone()),
            body: Set(item.body.clone()),
            is_archived: Set(false),
            is_read: Set(false),
            cause: Set(item.cause.clone()),
            is_body_html: Set(item.is_body_html),
            user_integration_id: Set(item.user_integration_id),
            category: Set(item.category.clone()),
            i_am_mentioned: Set(item.i_am_mentioned),
            attachments: Set(item.attachments.clone()),
            status: Set(InboxStatus::Pending.code()),
            snoozed_till: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        match active.insert(self.db.as_ref()).await {
            Ok(model) => Ok((model.into(), true)),
            // 并发插入同一条目时退回读取
            Err(err) => match RepositoryError::from(err) {
                RepositoryError::Conflict(_) => {
                    let existing = self
                        .find_existing(&item.uid, item.user_integration_id)
                        .await?
                        .ok_or(RepositoryError::NotFound)?;
                    Ok((existing.into(), false))
                }
                other => Err(other),
            },
        }
    }

    async fn add_items(&self, items: &[NewInboxItem]) -> Result<u64, RepositoryError> {
        let mut created = 0;
        for item in items {
            if self.add_item(item).await?.1 {
                created += 1;
            }
        }
        Ok(created)
    }

    async fn list(&self, user_id: Uuid, query: &InboxQuery) -> Result<InboxPage, RepositoryError> {
        let mut select = inbox::Entity::find()
            .filter(owned_by(user_id))
            .filter(inbox::Column::IsArchived.eq(query.is_archived));

        if let Some(is_read) = query.is_read {
            select = select.filter(inbox::Column::IsRead.eq(is_read));
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            select = select.filter(inbox::Column::Category.eq(category));
        }
        if let Some(status) = query.status {
            select = select.filter(inbox::Column::Status.eq(status.code()));
        }
        if let Some(source) = query.source.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(from_source(source));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(inbox::Column::Title.contains(search));
        }

        let page_size = query.page_size.max(1);
        let page = query.page.max(1);
        let paginator = select
            .order_by_desc(inbox::Column::CreatedAt)
            .paginate(self.db.as_ref(), page_size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page - 1).await?;

        Ok(InboxPage {
            items: models.into_iter().map(Into::into).collect(),
            total,
            page,
            page_size,
        })
    }

    async fn read_item(&self, user_id: Uuid, item_id: Uuid) -> Result<(), RepositoryError> {
        let result = inbox::Entity::update_many()
            .col_expr(inbox::Column::IsRead, Expr::value(true))
            .col_expr(
                inbox::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(inbox::Column::Id.eq(item_id))
            .filter(owned_by(user_id))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn archive_items(
        &self,
        user_id: Uuid,
        item_ids: &[Uuid],
    ) -> Result<u64, RepositoryError> {
        let result = inbox::Entity::update_many()
            .col_expr(inbox::Column::IsArchived, Expr::value(true))
            .col_expr(
                inbox::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(inbox::Column::Id.is_in(item_ids.iter().copied()))
            .filter(owned_by(user_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_items(&self, user_id: Uuid, item_ids: &[Uuid]) -> Result<u64, RepositoryError> {
        let result = inbox::Entity::delete_many()
            .filter(inbox::Column::Id.is_in(item_ids.iter().copied()))
            .filter(owned_by(user_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        let count = inbox::Entity::find()
            .filter(owned_by(user_id))
            .filter(inbox::Column::IsRead.eq(false))
            .filter(inbox::Column::IsArchived.eq(false))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        status: InboxStatus,
        snoozed_till: Option<DateTime<Utc>>,
    ) -> Result<InboxItem, RepositoryError> {
        let model = inbox::Entity::find()
            .filter(inbox::Column::Id.eq(item_id))
            .filter(owned_by(user_id))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: inbox::ActiveModel = model.into();
        active.status = Set(status.code());
        active.snoozed_till = Set(snoozed_till.map(Into::into));
        active.updated_at = Set(Utc::now().into());
        let model = active.update(self.db.as_ref()).await?;
        Ok(model.into())
    }
}

impl From<inbox::Model> for InboxItem {
    fn from(model: inbox::Model) -> Self {
        Self {
            id: model.id,
            uid: model.uid,
            title: model.title,
            body: model.body,
            is_archived: model.is_archived,
            is_read: model.is_read,
            cause: model.cause,
            is_body_html: model.is_body_html,
            user_integration_id: model.user_integration_id,
            category: model.category,
            i_am_mentioned: model.i_am_mentioned,
            attachments: model.attachments,
            status: InboxStatus::from_code(model.status).unwrap_or_default(),
            snoozed_till: model.snoozed_till.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{
        seed_integration, seed_user, seed_user_integration, setup_db,
    };

    struct Fixture {
        repo: InboxRepositoryImpl,
        user_id: Uuid,
        user_integration_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let db = setup_db().await;
        let user = seed_user(&db, "inbox@servcy.com").await;
        let integration = seed_integration(&db, "Gmail").await;
        let ui = seed_user_integration(&db, user.id, integration.id, "inbox@servcy.com").await;
        Fixture {
            repo: InboxRepositoryImpl::new(db),
            user_id: user.id,
            user_integration_id: ui.id,
        }
    }

    fn item(uid: &str, title: &str, user_integration_id: Uuid) -> NewInboxItem {
        NewInboxItem {
            uid: uid.to_string(),
            title: title.to_string(),
            user_integration_id,
            category: Some("message".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_item_is_get_or_create() {
        let f = fixture().await;
        let (first, created) = f
            .repo
            .add_item(&item("msg-1", "Hello", f.user_integration_id))
            .await
            .unwrap();
        assert!(created);
        assert_eq!(first.status, InboxStatus::Pending);

        let (again, created) = f
            .repo
            .add_item(&item("msg-1", "Hello", f.user_integration_id))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(again.id, first.id);

        let created = f
            .repo
            .add_items(&[
                item("msg-1", "Hello", f.user_integration_id),
                item("msg-2", "World", f.user_integration_id),
            ])
            .await
            .unwrap();
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_unread_count_read_archive_delete() {
        let f = fixture().await;
        let (a, _) = f.repo.add_item(&item("a", "Alpha", f.user_integration_id)).await.unwrap();
        let (b, _) = f.repo.add_item(&item("b", "Beta", f.user_integration_id)).await.unwrap();
        let (c, _) = f.repo.add_item(&item("c", "Gamma", f.user_integration_id)).await.unwrap();
        assert_eq!(f.repo.unread_count(f.user_id).await.unwrap(), 3);

        f.repo.read_item(f.user_id, a.id).await.unwrap();
        assert_eq!(f.repo.archive_items(f.user_id, &[b.id]).await.unwrap(), 1);
        assert_eq!(f.repo.unread_count(f.user_id).await.unwrap(), 1);

        assert_eq!(f.repo.delete_items(f.user_id, &[c.id]).await.unwrap(), 1);
        assert_eq!(f.repo.unread_count(f.user_id).await.unwrap(), 0);

        // 其他用户无法操作
        assert!(matches!(
            f.repo.read_item(Uuid::new_v4(), b.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let f = fixture().await;
        for i in 0..5 {
            f.repo
                .add_item(&item(&format!("m{}", i), &format!("Invoice {}", i), f.user_integration_id))
                .await
                .unwrap();
        }
        f.repo.add_item(&item("x", "Standup", f.user_integration_id)).await.unwrap();

        let page = f
            .repo
            .list(
                f.user_id,
                &InboxQuery {
                    search: Some("Invoice".to_string()),
                    page: 2,
                    page_size: 2,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);

        let snoozed = f
            .repo
            .list(
                f.user_id,
                &InboxQuery {
                    status: Some(InboxStatus::Snoozed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(snoozed.total, 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_source() {
        let f = fixture().await;
        let db = f.repo.db.clone();
        let slack = seed_integration(&db, "Slack").await;
        let slack_ui = seed_user_integration(&db, f.user_id, slack.id, "T0123").await;

        f.repo.add_item(&item("g1", "Mail one", f.user_integration_id)).await.unwrap();
        f.repo.add_item(&item("g2", "Mail two", f.user_integration_id)).await.unwrap();
        f.repo.add_item(&item("s1", "Ping", slack_ui.id)).await.unwrap();

        let query = |source: &str| InboxQuery {
            source: Some(source.to_string()),
            ..Default::default()
        };
        let gmail = f.repo.list(f.user_id, &query("Gmail")).await.unwrap();
        assert_eq!(gmail.total, 2);
        assert!(gmail.items.iter().all(|i| i.user_integration_id == f.user_integration_id));

        let slack_page = f.repo.list(f.user_id, &query("Slack")).await.unwrap();
        assert_eq!(slack_page.total, 1);
        assert_eq!(slack_page.items[0].uid, "s1");

        assert_eq!(f.repo.list(f.user_id, &query("Notion")).await.unwrap().total, 0);
        // 空字符串不过滤
        assert_eq!(f.repo.list(f.user_id, &query("")).await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_update_status() {
        let f = fixture().await;
        let (a, _) = f.repo.add_item(&item("a", "Alpha", f.user_integration_id)).await.unwrap();
        let till = Utc::now() + chrono::Duration::hours(4);

        let updated = f
            .repo
            .update_status(f.user_id, a.id, InboxStatus::Snoozed, Some(till))
            .await
            .unwrap();
        assert_eq!(updated.status, InboxStatus::Snoozed);
        assert!(updated.snoozed_till.is_some());
    }
}
