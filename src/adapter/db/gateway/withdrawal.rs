use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::withdrawal::{WithdrawalReader, WithdrawalWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::withdrawal::{BankDetails, Withdrawal, WithdrawalStatus};

const WITHDRAWAL_COLUMNS: &str = r#"
    id, user_id, amount, account_holder, account_number, ifsc_code, bank_name, status::text AS status,
    transaction_id, created_at, updated_at
"#;

#[derive(Clone)]
pub struct WithdrawalGateway {
    session: SqlxSession,
}

impl WithdrawalGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_withdrawal(row: &PgRow) -> AppResult<Withdrawal> {
        let status: String = row.try_get("status")?;
        Ok(Withdrawal {
            id: Id::new(row.try_get("id")?),
            user_id: Id::new(row.try_get("user_id")?),
            amount: row.try_get("amount")?,
            bank_details: BankDetails {
                account_holder: row.try_get("account_holder")?,
                account_number: row.try_get("account_number")?,
                ifsc_code: row.try_get("ifsc_code")?,
                bank_name: row.try_get("bank_name")?,
            },
            status: status.parse::<WithdrawalStatus>()?,
            transaction_id: row.try_get("transaction_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl WithdrawalWriter for WithdrawalGateway {
    async fn insert(&self, withdrawal: Withdrawal) -> AppResult<Id<Withdrawal>> {
        self.session
            .with_tx(|tx| {
                let withdrawal = withdrawal.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO withdrawals
                                (id, user_id, amount, account_holder, account_number, ifsc_code, bank_name, status,
                                 transaction_id, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8::withdrawal_status, $9, $10, $11)
                            RETURNING id
                        "#,
                    )
                    .bind(withdrawal.id.value)
                    .bind(withdrawal.user_id.value)
                    .bind(withdrawal.amount)
                    .bind(&withdrawal.bank_details.account_holder)
                    .bind(&withdrawal.bank_details.account_number)
                    .bind(&withdrawal.bank_details.ifsc_code)
                    .bind(&withdrawal.bank_details.bank_name)
                    .bind(withdrawal.status.as_str())
                    .bind(&withdrawal.transaction_id)
                    .bind(withdrawal.created_at)
                    .bind(withdrawal.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn cancel(&self, withdrawal_id: &Id<Withdrawal>, user_id: &Id<User>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let withdrawal_id = withdrawal_id.value;
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE withdrawals
                            SET status = 'cancelled', updated_at = now()
                            WHERE id = $1 AND user_id = $2 AND status = 'pending'
                        "#,
                    )
                    .bind(withdrawal_id)
                    .bind(user_id)
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
impl WithdrawalReader for WithdrawalGateway {
    async fn find_by_id(&self, withdrawal_id: &Id<Withdrawal>) -> AppResult<Option<Withdrawal>> {
        self.session
            .with_tx(|tx| {
                let withdrawal_id = withdrawal_id.value;
                async move {
                    let query = format!("SELECT {} FROM withdrawals WHERE id = $1", WITHDRAWAL_COLUMNS);
                    let row = sqlx::query(&query).bind(withdrawal_id).fetch_optional(tx.as_mut()).await?;
                    row.as_ref().map(Self::get_withdrawal).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn get_all_for_user(&self, user_id: &Id<User>) -> AppResult<Vec<Withdrawal>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = format!("SELECT {} FROM withdrawals WHERE user_id = $1", WITHDRAWAL_COLUMNS);
                    let rows = sqlx::query(&query).bind(user_id).fetch_all(tx.as_mut()).await?;
                    rows.iter().map(Self::get_withdrawal).collect()
                }
                .boxed()
            })
            .await
    }

    async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Withdrawal>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = format!(
                        "SELECT {} FROM withdrawals WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                        WITHDRAWAL_COLUMNS
                    );
                    let rows = sqlx::query(&query)
                        .bind(user_id)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(tx.as_mut())
                        .await?;
                    rows.iter().map(Self::get_withdrawal).collect()
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
                    let row = sqlx::query("SELECT COUNT(id) AS total FROM withdrawals WHERE user_id = $1")
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
