use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::discussion::{DiscussionReader, DiscussionWriter};
use crate::domain::entities::discussion::{Discussion, DiscussionMessage, DiscussionParticipant, DiscussionStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::workspace::Workspace;

const DISCUSSION_COLUMNS: &str = r#"
    id, workspace_id, title, created_by, status::text AS status, is_pinned, message_count, last_activity_at,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct DiscussionGateway {
    session: SqlxSession,
}

impl DiscussionGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_discussion(row: &PgRow) -> AppResult<Discussion> {
        let status: String = row.try_get("status")?;
        Ok(Discussion {
            id: Id::new(row.try_get("id")?),
            workspace_id: Id::new(row.try_get("workspace_id")?),
            title: row.try_get("title")?,
            created_by: Id::new(row.try_get("created_by")?),
            status: status.parse::<DiscussionStatus>()?,
            is_pinned: row.try_get("is_pinned")?,
            messages: Vec::new(),
            participants: Vec::new(),
            message_count: row.try_get("message_count")?,
            last_activity_at: row.try_get("last_activity_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn get_message(row: &PgRow) -> AppResult<DiscussionMessage> {
        Ok(DiscussionMessage {
            id: Id::new(row.try_get("id")?),
            discussion_id: Id::new(row.try_get("discussion_id")?),
            author_id: Id::new(row.try_get("author_id")?),
            body: row.try_get("body")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
        })
    }

    async fn load_thread(tx: &mut Transaction<'static, Postgres>, discussion: &mut Discussion) -> AppResult<()> {
        let messages = sqlx::query(
            r#"
                SELECT id, discussion_id, author_id, body, position, created_at
                FROM discussion_messages
                WHERE discussion_id = $1
                ORDER BY position
            "#,
        )
        .bind(discussion.id.value)
        .fetch_all(tx.as_mut())
        .await?;
        discussion.messages = messages.iter().map(Self::get_message).collect::<AppResult<Vec<_>>>()?;

        let participants = sqlx::query(
            r#"
                SELECT user_id, last_seen_at
                FROM discussion_participants
                WHERE discussion_id = $1
                ORDER BY last_seen_at DESC
            "#,
        )
        .bind(discussion.id.value)
        .fetch_all(tx.as_mut())
        .await?;
        discussion.participants = participants
            .iter()
            .map(|row| {
                Ok(DiscussionParticipant {
                    user_id: Id::new(row.try_get("user_id")?),
                    last_seen_at: row.try_get("last_seen_at")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(())
    }

    async fn find(tx: &mut Transaction<'static, Postgres>, discussion_id: Uuid, lock: bool) -> AppResult<Option<Discussion>> {
        let query = format!(
            "SELECT {} FROM discussions WHERE id = $1{}",
            DISCUSSION_COLUMNS,
            if lock { " FOR UPDATE" } else { "" }
        );
        let row = sqlx::query(&query)
            .bind(discussion_id)
            .fetch_optional(tx.as_mut())
            .await?;
        match row {
            Some(row) => {
                let mut discussion = Self::get_discussion(&row)?;
                Self::load_thread(tx, &mut discussion).await?;
                Ok(Some(discussion))
            }
            None => Ok(None),
        }
    }

    async fn save_message(tx: &mut Transaction<'static, Postgres>, message: &DiscussionMessage) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO discussion_messages (id, discussion_id, author_id, body, position, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.value)
        .bind(message.discussion_id.value)
        .bind(message.author_id.value)
        .bind(&message.body)
        .bind(message.position)
        .bind(message.created_at)
        .execute(tx.as_mut())
        .await?;
        Ok(())
    }

    async fn save_participant(
        tx: &mut Transaction<'static, Postgres>,
        discussion_id: Uuid,
        participant: &DiscussionParticipant,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO discussion_participants (discussion_id, user_id, last_seen_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (discussion_id, user_id) DO UPDATE SET last_seen_at = EXCLUDED.last_seen_at
            "#,
        )
        .bind(discussion_id)
        .bind(participant.user_id.value)
        .bind(participant.last_seen_at)
        .execute(tx.as_mut())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DiscussionWriter for DiscussionGateway {
    async fn insert(&self, discussion: Discussion) -> AppResult<Id<Discussion>> {
        self.session
            .with_tx(|tx| {
                let discussion = discussion.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO discussions
                                (id, workspace_id, title, created_by, status, is_pinned, message_count,
                                 last_activity_at, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5::discussion_status, $6, $7, $8, $9, $10)
                            RETURNING id
                        "#,
                    )
                    .bind(discussion.id.value)
                    .bind(discussion.workspace_id.value)
                    .bind(&discussion.title)
                    .bind(discussion.created_by.value)
                    .bind(discussion.status.as_str())
                    .bind(discussion.is_pinned)
                    .bind(discussion.message_count)
                    .bind(discussion.last_activity_at)
                    .bind(discussion.created_at)
                    .bind(discussion.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;

                    for message in &discussion.messages {
                        Self::save_message(tx, message).await?;
                    }
                    for participant in &discussion.participants {
                        Self::save_participant(tx, discussion.id.value, participant).await?;
                    }

                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn append_message(&self, message: DiscussionMessage) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let message = message.clone();
                async move { Self::save_message(tx, &message).await }.boxed()
            })
            .await
    }

    async fn upsert_participant(
        &self,
        discussion_id: &Id<Discussion>,
        participant: DiscussionParticipant,
    ) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let discussion_id = discussion_id.value;
                let participant = participant.clone();
                async move { Self::save_participant(tx, discussion_id, &participant).await }.boxed()
            })
            .await
    }

    async fn update_summary(&self, discussion: &Discussion) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let discussion = discussion.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                discussions
                            SET
                                status = $2::discussion_status,
                                is_pinned = $3,
                                message_count = $4,
                                last_activity_at = $5,
                                updated_at = $6
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(discussion.id.value)
                    .bind(discussion.status.as_str())
                    .bind(discussion.is_pinned)
                    .bind(discussion.message_count)
                    .bind(discussion.last_activity_at)
                    .bind(discussion.updated_at)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl DiscussionReader for DiscussionGateway {
    async fn find_by_id(&self, discussion_id: &Id<Discussion>) -> AppResult<Option<Discussion>> {
        self.session
            .with_tx(|tx| {
                let discussion_id = discussion_id.value;
                async move { Self::find(tx, discussion_id, false).await }.boxed()
            })
            .await
    }

    async fn find_by_id_for_update(&self, discussion_id: &Id<Discussion>) -> AppResult<Option<Discussion>> {
        self.session
            .with_tx(|tx| {
                let discussion_id = discussion_id.value;
                async move { Self::find(tx, discussion_id, true).await }.boxed()
            })
            .await
    }

    async fn get_all(&self, workspace_id: &Id<Workspace>, limit: i64, offset: i64) -> AppResult<Vec<Discussion>> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    let query = format!(
                        r#"
                            SELECT {}
                            FROM discussions
                            WHERE workspace_id = $1
                            ORDER BY is_pinned DESC, last_activity_at DESC
                            LIMIT $2 OFFSET $3
                        "#,
                        DISCUSSION_COLUMNS
                    );
                    let rows = sqlx::query(&query)
                        .bind(workspace_id)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(tx.as_mut())
                        .await?;

                    let mut discussions = rows.iter().map(Self::get_discussion).collect::<AppResult<Vec<_>>>()?;
                    for discussion in discussions.iter_mut() {
                        Self::load_thread(tx, discussion).await?;
                    }
                    Ok(discussions)
                }
                .boxed()
            })
            .await
    }

    async fn count_discussions(&self, workspace_id: &Id<Workspace>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    let row = sqlx::query("SELECT COUNT(id) AS total FROM discussions WHERE workspace_id = $1")
                        .bind(workspace_id)
                        .fetch_one(tx.as_mut())
                        .await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }
}
