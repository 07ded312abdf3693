use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use sqlx::Row;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::presence::PresenceStore;
use crate::domain::entities::id::Id;
use crate::domain::entities::presence::Presence;
use crate::domain::entities::user::User;

/// Presence kept in `user_presence`, shared by every server instance.
#[derive(Clone)]
pub struct PresenceGateway {
    session: SqlxSession,
}

impl PresenceGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl PresenceStore for PresenceGateway {
    async fn heartbeat(&self, presence: Presence) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let presence = presence.clone();
                async move {
                    sqlx::query(
                        r#"
                            INSERT INTO user_presence (user_id, last_seen_at, expires_at)
                            VALUES ($1, $2, $3)
                            ON CONFLICT (user_id)
                            DO UPDATE SET last_seen_at = EXCLUDED.last_seen_at, expires_at = EXCLUDED.expires_at
                        "#,
                    )
                    .bind(presence.user_id.value)
                    .bind(presence.last_seen_at)
                    .bind(presence.expires_at)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn online_among(&self, user_ids: &[Id<User>], now: DateTime<Utc>) -> AppResult<Vec<Id<User>>> {
        self.session
            .with_tx(|tx| {
                let user_ids: Vec<Uuid> = user_ids.iter().map(|id| id.value).collect();
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT user_id
                            FROM user_presence
                            WHERE user_id = ANY($1) AND expires_at > $2
                        "#,
                    )
                    .bind(&user_ids)
                    .bind(now)
                    .fetch_all(tx.as_mut())
                    .await?;
                    rows.iter()
                        .map(|row| Ok(Id::new(row.try_get("user_id")?)))
                        .collect()
                }
                .boxed()
            })
            .await
    }
}
