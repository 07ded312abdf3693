use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::{User, UserRole};

const USER_COLUMNS: &str = r#"
    id, username, email, password, role::text AS role, full_name, bio, skills, hourly_rate,
    rating, rating_count, total_earnings, total_spent, created_at, updated_at
"#;

#[derive(Clone)]
pub struct UserGateway {
    session: SqlxSession,
}

impl UserGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    /// Row lock held until the surrounding transaction ends.
    fn lock_query() -> String {
        format!("SELECT {} FROM users WHERE id = $1 FOR UPDATE", USER_COLUMNS)
    }

    fn get_user(row: &PgRow) -> AppResult<User> {
        let role: String = row.try_get("role")?;
        Ok(User {
            id: Id::new(row.try_get("id")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            role: role.parse::<UserRole>()?,
            full_name: row.try_get("full_name")?,
            bio: row.try_get("bio")?,
            skills: row.try_get("skills")?,
            hourly_rate: row.try_get("hourly_rate")?,
            rating: row.try_get("rating")?,
            rating_count: row.try_get("rating_count")?,
            total_earnings: row.try_get("total_earnings")?,
            total_spent: row.try_get("total_spent")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn find_user(result: Option<PgRow>) -> AppResult<Option<User>> {
        result.as_ref().map(Self::get_user).transpose()
    }
}

#[async_trait]
impl UserWriter for UserGateway {
    async fn insert(&self, user: User) -> AppResult<Id<User>> {
        self.session
            .with_tx(|tx| {
                let user = user.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO users
                                (id, username, email, password, role, full_name, skills, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5::user_role, $6, $7, $8, $9)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(user.id.value)
                    .bind(&user.username)
                    .bind(&user.email)
                    .bind(&user.password)
                    .bind(user.role.as_str())
                    .bind(&user.full_name)
                    .bind(&user.skills)
                    .bind(user.created_at)
                    .bind(user.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update_profile(&self, user: User) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let user = user.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                users
                            SET
                                full_name = $2, bio = $3, skills = $4, hourly_rate = $5, updated_at = now()
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(user.id.value)
                    .bind(&user.full_name)
                    .bind(&user.bio)
                    .bind(&user.skills)
                    .bind(user.hourly_rate)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn lock(&self, user_id: &Id<User>) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = Self::lock_query();
                    let result = sqlx::query(&query)
                        .bind(user_id)
                        .fetch_optional(tx.as_mut())
                        .await?;
                    Self::find_user(result)
                }
                .boxed()
            })
            .await
    }

    async fn record_payment_totals(
        &self,
        client_id: &Id<User>,
        freelancer_id: &Id<User>,
        spent: i64,
        earned: i64,
    ) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let client_id = client_id.value;
                let freelancer_id = freelancer_id.value;
                async move {
                    sqlx::query("UPDATE users SET total_spent = total_spent + $2, updated_at = now() WHERE id = $1")
                        .bind(client_id)
                        .bind(spent)
                        .execute(tx.as_mut())
                        .await?;
                    sqlx::query(
                        "UPDATE users SET total_earnings = total_earnings + $2, updated_at = now() WHERE id = $1",
                    )
                    .bind(freelancer_id)
                    .bind(earned)
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
impl UserReader for UserGateway {
    async fn find_by_id(&self, user_id: &Id<User>) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
                    let result = sqlx::query(&query)
                        .bind(user_id)
                        .fetch_optional(tx.as_mut())
                        .await?;
                    Self::find_user(result)
                }
                .boxed()
            })
            .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let email = email.to_lowercase();
                async move {
                    let query = format!("SELECT {} FROM users WHERE lower(email) = $1", USER_COLUMNS);
                    let result = sqlx::query(&query)
                        .bind(&email)
                        .fetch_optional(tx.as_mut())
                        .await?;
                    Self::find_user(result)
                }
                .boxed()
            })
            .await
    }

    async fn is_user(&self, username: &str, email: &str) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let username = username.to_owned();
                let email = email.to_lowercase();
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT EXISTS(
                                SELECT
                                    id
                                FROM
                                    users
                                WHERE username = $1 OR lower(email) = $2
                            ) AS is_user
                        "#,
                    )
                    .bind(&username)
                    .bind(&email)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let is_user: bool = result.try_get("is_user")?;
                    Ok(is_user)
                }
                .boxed()
            })
            .await
    }
}
