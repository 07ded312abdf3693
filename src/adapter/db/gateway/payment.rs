use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::payment::{PaymentReader, PaymentWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::payment::{Payment, PaymentStatus, PaymentTarget};
use crate::domain::entities::user::User;

const PAYMENT_COLUMNS: &str = r#"
    id, order_id, payment_id, client_id, freelancer_id, target_type, target_id, amount, currency,
    status::text AS status, created_at, updated_at
"#;

#[derive(Clone)]
pub struct PaymentGateway {
    session: SqlxSession,
}

impl PaymentGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_payment(row: &PgRow) -> AppResult<Payment> {
        let status: String = row.try_get("status")?;
        let target_type: String = row.try_get("target_type")?;
        let target_id: Uuid = row.try_get("target_id")?;
        let target = match target_type.as_str() {
            "gig" => PaymentTarget::Gig(Id::new(target_id)),
            "contract" => PaymentTarget::Contract(Id::new(target_id)),
            other => return Err(AppError::Validation(format!("Unknown payment target `{}`", other))),
        };

        Ok(Payment {
            id: Id::new(row.try_get("id")?),
            order_id: row.try_get("order_id")?,
            payment_id: row.try_get("payment_id")?,
            client_id: Id::new(row.try_get("client_id")?),
            freelancer_id: Id::new(row.try_get("freelancer_id")?),
            target,
            amount: row.try_get("amount")?,
            currency: row.try_get("currency")?,
            status: status.parse::<PaymentStatus>()?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn target_id(target: &PaymentTarget) -> Uuid {
    match target {
        PaymentTarget::Gig(id) => id.value,
        PaymentTarget::Contract(id) => id.value,
    }
}

#[async_trait]
impl PaymentWriter for PaymentGateway {
    async fn insert(&self, payment: Payment) -> AppResult<Id<Payment>> {
        self.session
            .with_tx(|tx| {
                let payment = payment.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO payments
                                (id, order_id, client_id, freelancer_id, target_type, target_id, amount, currency,
                                 status, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8, $9::payment_status, $10, $11)
                            RETURNING id
                        "#,
                    )
                    .bind(payment.id.value)
                    .bind(&payment.order_id)
                    .bind(payment.client_id.value)
                    .bind(payment.freelancer_id.value)
                    .bind(payment.target.kind())
                    .bind(target_id(&payment.target))
                    .bind(payment.amount)
                    .bind(&payment.currency)
                    .bind(payment.status.as_str())
                    .bind(payment.created_at)
                    .bind(payment.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn capture(&self, order_id: &str, payment_id: &str) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let order_id = order_id.to_owned();
                let payment_id = payment_id.to_owned();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE payments
                            SET status = 'paid', payment_id = $2, updated_at = now()
                            WHERE order_id = $1 AND status <> 'paid'
                        "#,
                    )
                    .bind(&order_id)
                    .bind(&payment_id)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected() == 1)
                }
                .boxed()
            })
            .await
    }

    async fn mark_failed(&self, order_id: &str, payment_id: Option<String>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let order_id = order_id.to_owned();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE payments
                            SET status = 'failed', payment_id = COALESCE($2, payment_id), updated_at = now()
                            WHERE order_id = $1 AND status IN ('created', 'attempted')
                        "#,
                    )
                    .bind(&order_id)
                    .bind(payment_id)
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
impl PaymentReader for PaymentGateway {
    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Option<Payment>> {
        self.session
            .with_tx(|tx| {
                let order_id = order_id.to_owned();
                async move {
                    let query = format!("SELECT {} FROM payments WHERE order_id = $1", PAYMENT_COLUMNS);
                    let row = sqlx::query(&query).bind(&order_id).fetch_optional(tx.as_mut()).await?;
                    row.as_ref().map(Self::get_payment).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn find_by_payment_id(&self, payment_id: &str) -> AppResult<Option<Payment>> {
        self.session
            .with_tx(|tx| {
                let payment_id = payment_id.to_owned();
                async move {
                    let query = format!("SELECT {} FROM payments WHERE payment_id = $1", PAYMENT_COLUMNS);
                    let row = sqlx::query(&query).bind(&payment_id).fetch_optional(tx.as_mut()).await?;
                    row.as_ref().map(Self::get_payment).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn get_received(&self, user_id: &Id<User>) -> AppResult<Vec<Payment>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = format!("SELECT {} FROM payments WHERE freelancer_id = $1", PAYMENT_COLUMNS);
                    let rows = sqlx::query(&query).bind(user_id).fetch_all(tx.as_mut()).await?;
                    rows.iter().map(Self::get_payment).collect()
                }
                .boxed()
            })
            .await
    }

    async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Payment>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = format!(
                        r#"
                            SELECT {}
                            FROM payments
                            WHERE client_id = $1 OR freelancer_id = $1
                            ORDER BY created_at DESC
                            LIMIT $2 OFFSET $3
                        "#,
                        PAYMENT_COLUMNS
                    );
                    let rows = sqlx::query(&query)
                        .bind(user_id)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(tx.as_mut())
                        .await?;
                    rows.iter().map(Self::get_payment).collect()
                }
                .boxed()
            })
            .await
    }

    async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let row = sqlx::query(
                        "SELECT COUNT(id) AS total FROM payments WHERE client_id = $1 OR freelancer_id = $1",
                    )
                    .bind(user_id)
                    .fetch_one(tx.as_mut())
                    .await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }
}
