use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::notification::{NotificationReader, NotificationWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::domain::entities::user::User;

#[derive(Clone)]
pub struct NotificationGateway {
    session: SqlxSession,
}

impl NotificationGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_notification(row: &PgRow) -> AppResult<Notification> {
        let kind: String = row.try_get("kind")?;
        Ok(Notification {
            id: Id::new(row.try_get("id")?),
            recipient_id: Id::new(row.try_get("recipient_id")?),
            kind: kind.parse::<NotificationKind>()?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            data: row.try_get("data")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl NotificationWriter for NotificationGateway {
    async fn insert(&self, notification: Notification) -> AppResult<Id<Notification>> {
        self.session
            .with_tx(|tx| {
                let notification = notification.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO notifications
                                (id, recipient_id, kind, title, message, data, is_read, created_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8)
                            RETURNING id
                        "#,
                    )
                    .bind(notification.id.value)
                    .bind(notification.recipient_id.value)
                    .bind(notification.kind.as_str())
                    .bind(&notification.title)
                    .bind(&notification.message)
                    .bind(&notification.data)
                    .bind(notification.is_read)
                    .bind(notification.created_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn mark_read(&self, notification_id: &Id<Notification>, recipient_id: &Id<User>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let notification_id = notification_id.value;
                let recipient_id = recipient_id.value;
                async move {
                    let result = sqlx::query(
                        "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2",
                    )
                    .bind(notification_id)
                    .bind(recipient_id)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected() == 1)
                }
                .boxed()
            })
            .await
    }

    async fn mark_all_read(&self, recipient_id: &Id<User>) -> AppResult<u64> {
        self.session
            .with_tx(|tx| {
                let recipient_id = recipient_id.value;
                async move {
                    let result = sqlx::query(
                        "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND NOT is_read",
                    )
                    .bind(recipient_id)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl NotificationReader for NotificationGateway {
    async fn get_for_user(&self, recipient_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Notification>> {
        self.session
            .with_tx(|tx| {
                let recipient_id = recipient_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT id, recipient_id, kind, title, message, data, is_read, created_at
                            FROM notifications
                            WHERE recipient_id = $1
                            ORDER BY created_at DESC
                            LIMIT $2 OFFSET $3
                        "#,
                    )
                    .bind(recipient_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(tx.as_mut())
                    .await?;
                    rows.iter().map(Self::get_notification).collect()
                }
                .boxed()
            })
            .await
    }

    async fn count_for_user(&self, recipient_id: &Id<User>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let recipient_id = recipient_id.value;
                async move {
                    let row = sqlx::query("SELECT COUNT(id) AS total FROM notifications WHERE recipient_id = $1")
                        .bind(recipient_id)
                        .fetch_one(tx.as_mut())
                        .await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }

    async fn count_unread(&self, recipient_id: &Id<User>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let recipient_id = recipient_id.value;
                async move {
                    let row = sqlx::query(
                        "SELECT COUNT(id) AS total FROM notifications WHERE recipient_id = $1 AND NOT is_read",
                    )
                    .bind(recipient_id)
                    .fetch_one(tx.as_mut())
                    .await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }
}
