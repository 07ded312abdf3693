use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::contract::{ContractReader, ContractWriter};
use crate::domain::entities::contract::{Contract, ContractStatus, Milestone, MilestoneStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

const CONTRACT_COLUMNS: &str = r#"
    id, client_id, freelancer_id, title, description, budget, deadline, status::text AS status, decline_reason,
    accepted_at, completed_at, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ContractGateway {
    session: SqlxSession,
}

impl ContractGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_contract(row: &PgRow) -> AppResult<Contract> {
        let status: String = row.try_get("status")?;
        Ok(Contract {
            id: Id::new(row.try_get("id")?),
            client_id: Id::new(row.try_get("client_id")?),
            freelancer_id: Id::new(row.try_get("freelancer_id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            budget: row.try_get("budget")?,
            deadline: row.try_get("deadline")?,
            status: status.parse::<ContractStatus>()?,
            milestones: Vec::new(),
            decline_reason: row.try_get("decline_reason")?,
            accepted_at: row.try_get("accepted_at")?,
            completed_at: row.try_get("completed_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn get_milestone(row: &PgRow) -> AppResult<Milestone> {
        let status: String = row.try_get("status")?;
        Ok(Milestone {
            id: Id::new(row.try_get("id")?),
            contract_id: Id::new(row.try_get("contract_id")?),
            title: row.try_get("title")?,
            amount: row.try_get("amount")?,
            due_date: row.try_get("due_date")?,
            status: status.parse::<MilestoneStatus>()?,
            position: row.try_get("position")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn load_milestones(tx: &mut Transaction<'static, Postgres>, contract: &mut Contract) -> AppResult<()> {
        let rows = sqlx::query(
            r#"
                SELECT id, contract_id, title, amount, due_date, status::text AS status, position, updated_at
                FROM contract_milestones
                WHERE contract_id = $1
                ORDER BY position
            "#,
        )
        .bind(contract.id.value)
        .fetch_all(tx.as_mut())
        .await?;
        contract.milestones = rows.iter().map(Self::get_milestone).collect::<AppResult<Vec<_>>>()?;
        Ok(())
    }
}

#[async_trait]
impl ContractWriter for ContractGateway {
    async fn insert(&self, contract: Contract) -> AppResult<Id<Contract>> {
        self.session
            .with_tx(|tx| {
                let contract = contract.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO contracts
                                (id, client_id, freelancer_id, title, description, budget, deadline, status,
                                 created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8::contract_status, $9, $10)
                            RETURNING id
                        "#,
                    )
                    .bind(contract.id.value)
                    .bind(contract.client_id.value)
                    .bind(contract.freelancer_id.value)
                    .bind(&contract.title)
                    .bind(&contract.description)
                    .bind(contract.budget)
                    .bind(contract.deadline)
                    .bind(contract.status.as_str())
                    .bind(contract.created_at)
                    .bind(contract.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;

                    for milestone in &contract.milestones {
                        sqlx::query(
                            r#"
                                INSERT INTO contract_milestones
                                    (id, contract_id, title, amount, due_date, status, position, updated_at)
                                VALUES
                                    ($1, $2, $3, $4, $5, $6::milestone_status, $7, $8)
                            "#,
                        )
                        .bind(milestone.id.value)
                        .bind(milestone.contract_id.value)
                        .bind(&milestone.title)
                        .bind(milestone.amount)
                        .bind(milestone.due_date)
                        .bind(milestone.status.as_str())
                        .bind(milestone.position)
                        .bind(milestone.updated_at)
                        .execute(tx.as_mut())
                        .await?;
                    }

                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update_status(&self, contract: &Contract, expected: ContractStatus) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let contract = contract.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE
                                contracts
                            SET
                                status = $2::contract_status,
                                decline_reason = $3,
                                accepted_at = $4,
                                completed_at = $5,
                                updated_at = $6
                            WHERE
                                id = $1 AND status = $7::contract_status
                        "#,
                    )
                    .bind(contract.id.value)
                    .bind(contract.status.as_str())
                    .bind(&contract.decline_reason)
                    .bind(contract.accepted_at)
                    .bind(contract.completed_at)
                    .bind(contract.updated_at)
                    .bind(expected.as_str())
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected() == 1)
                }
                .boxed()
            })
            .await
    }

    async fn update_milestone(&self, milestone: &Milestone, expected: MilestoneStatus) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let milestone = milestone.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE
                                contract_milestones AS m
                            SET
                                status = $2::milestone_status,
                                updated_at = $3
                            FROM
                                contracts AS c
                            WHERE
                                m.id = $1
                                AND m.status = $4::milestone_status
                                AND c.id = m.contract_id
                                AND c.status = 'in-progress'
                        "#,
                    )
                    .bind(milestone.id.value)
                    .bind(milestone.status.as_str())
                    .bind(milestone.updated_at)
                    .bind(expected.as_str())
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
impl ContractReader for ContractGateway {
    async fn find_by_id(&self, contract_id: &Id<Contract>) -> AppResult<Option<Contract>> {
        self.session
            .with_tx(|tx| {
                let contract_id = contract_id.value;
                async move {
                    let query = format!("SELECT {} FROM contracts WHERE id = $1", CONTRACT_COLUMNS);
                    let row = sqlx::query(&query).bind(contract_id).fetch_optional(tx.as_mut()).await?;
                    match row {
                        Some(row) => {
                            let mut contract = Self::get_contract(&row)?;
                            Self::load_milestones(tx, &mut contract).await?;
                            Ok(Some(contract))
                        }
                        None => Ok(None),
                    }
                }
                .boxed()
            })
            .await
    }

    async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Contract>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = format!(
                        r#"
                            SELECT {}
                            FROM contracts
                            WHERE client_id = $1 OR freelancer_id = $1
                            ORDER BY created_at DESC
                            LIMIT $2 OFFSET $3
                        "#,
                        CONTRACT_COLUMNS
                    );
                    let rows = sqlx::query(&query)
                        .bind(user_id)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(tx.as_mut())
                        .await?;

                    let mut contracts = rows.iter().map(Self::get_contract).collect::<AppResult<Vec<_>>>()?;
                    for contract in contracts.iter_mut() {
                        Self::load_milestones(tx, contract).await?;
                    }
                    Ok(contracts)
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
                        "SELECT COUNT(id) AS total FROM contracts WHERE client_id = $1 OR freelancer_id = $1",
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
