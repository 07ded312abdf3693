use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::gig::{GigReader, GigWriter};
use crate::domain::entities::gig::{Gig, GigStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

const GIG_COLUMNS: &str = r#"
    id, client_id, freelancer_id, title, description, budget, deadline, status::text AS status, created_at, updated_at
"#;

#[derive(Clone)]
pub struct GigGateway {
    session: SqlxSession,
}

impl GigGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_gig(row: &PgRow) -> AppResult<Gig> {
        let status: String = row.try_get("status")?;
        let freelancer_id: Option<Uuid> = row.try_get("freelancer_id")?;
        Ok(Gig {
            id: Id::new(row.try_get("id")?),
            client_id: Id::new(row.try_get("client_id")?),
            freelancer_id: freelancer_id.map(Id::new),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            budget: row.try_get("budget")?,
            deadline: row.try_get("deadline")?,
            status: status.parse::<GigStatus>()?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl GigWriter for GigGateway {
    async fn insert(&self, gig: Gig) -> AppResult<Id<Gig>> {
        self.session
            .with_tx(|tx| {
                let gig = gig.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO gigs
                                (id, client_id, title, description, budget, deadline, status, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7::gig_status, $8, $9)
                            RETURNING id
                        "#,
                    )
                    .bind(gig.id.value)
                    .bind(gig.client_id.value)
                    .bind(&gig.title)
                    .bind(&gig.description)
                    .bind(gig.budget)
                    .bind(gig.deadline)
                    .bind(gig.status.as_str())
                    .bind(gig.created_at)
                    .bind(gig.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn assign(&self, gig_id: &Id<Gig>, freelancer_id: &Id<User>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let gig_id = gig_id.value;
                let freelancer_id = freelancer_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE gigs
                            SET freelancer_id = $2, status = 'assigned', updated_at = now()
                            WHERE id = $1 AND status = 'open'
                        "#,
                    )
                    .bind(gig_id)
                    .bind(freelancer_id)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected() == 1)
                }
                .boxed()
            })
            .await
    }

    async fn complete(&self, gig_id: &Id<Gig>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let gig_id = gig_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE gigs
                            SET status = 'completed', updated_at = now()
                            WHERE id = $1 AND status = 'assigned'
                        "#,
                    )
                    .bind(gig_id)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected() == 1)
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl GigReader for GigGateway {
    async fn find_by_id(&self, gig_id: &Id<Gig>) -> AppResult<Option<Gig>> {
        self.session
            .with_tx(|tx| {
                let gig_id = gig_id.value;
                async move {
                    let query = format!("SELECT {} FROM gigs WHERE id = $1", GIG_COLUMNS);
                    let row = sqlx::query(&query).bind(gig_id).fetch_optional(tx.as_mut()).await?;
                    row.as_ref().map(Self::get_gig).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn get_open(&self, limit: i64, offset: i64) -> AppResult<Vec<Gig>> {
        self.session
            .with_tx(|tx| {
                async move {
                    let query = format!(
                        "SELECT {} FROM gigs WHERE status = 'open' ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                        GIG_COLUMNS
                    );
                    let rows = sqlx::query(&query)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(tx.as_mut())
                        .await?;
                    rows.iter().map(Self::get_gig).collect()
                }
                .boxed()
            })
            .await
    }

    async fn count_open(&self) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                async move {
                    let row = sqlx::query("SELECT COUNT(id) AS total FROM gigs WHERE status = 'open'")
                        .fetch_one(tx.as_mut())
                        .await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }
}
