#![cfg(test)]

use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::application::interface::crypto::CredentialsHasher;
use crate::infra::state::AppState;

pub fn unique_credentials() -> (String, String) {
    let id = Uuid::now_v7().as_simple().to_string();
    let username = format!("t_{}", &id[..16]);
    let email = format!("{}@test.example", &id[..16]);

    (username, email)
}

pub async fn hash_password(state: &AppState, password: &str) -> String {
    state.hasher.hash_password(password).await.expect("hash password")
}

pub async fn insert_user(pool: &PgPool, username: &str, email: &str, hashed_password: &str, role: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (id, username, email, password, role) VALUES ($1, $2, $3, $4, $5::user_role) RETURNING id",
    )
    .bind(Uuid::now_v7())
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("insert user")
}

/// A user with an unusable password, for tests that log in through a session row.
pub async fn insert_plain_user(pool: &PgPool, role: &str) -> Uuid {
    let (username, email) = unique_credentials();
    insert_user(pool, &username, &email, "not-a-hash", role).await
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Option<Uuid> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .expect("find user by email")
}

pub async fn insert_session(pool: &PgPool, user_id: Uuid) -> Uuid {
    let now = Utc::now();
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO sessions (id, user_id, created_at, last_activity) VALUES ($1, $2, $3, $3) RETURNING id",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("insert session")
}

pub fn session_cookie(session_id: Uuid, cookie_name: &str) -> String {
    format!("{}={}", cookie_name, session_id)
}

/// Inserts a captured payment from `client_id` to `freelancer_id`.
pub async fn insert_paid_payment(pool: &PgPool, client_id: Uuid, freelancer_id: Uuid, amount: i64) -> Uuid {
    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO payments (id, order_id, payment_id, client_id, freelancer_id, target_type, target_id, amount, currency, status) \
         VALUES ($1, $2, $3, $4, $5, 'gig', $6, $7, 'INR', 'paid')",
    )
    .bind(id)
    .bind(format!("order_{}", id.simple()))
    .bind(format!("pay_{}", id.simple()))
    .bind(client_id)
    .bind(freelancer_id)
    .bind(Uuid::now_v7())
    .bind(amount)
    .execute(pool)
    .await
    .expect("insert paid payment");
    id
}

pub async fn withdrawn_total(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM withdrawals \
         WHERE user_id = $1 AND status IN ('pending', 'processing', 'completed')",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("sum withdrawals")
}

/// Removes a user with everything that references them without cascading.
pub async fn delete_user(pool: &PgPool, user_id: Uuid) {
    for query in [
        "DELETE FROM withdrawals WHERE user_id = $1",
        "DELETE FROM payments WHERE client_id = $1 OR freelancer_id = $1",
        "DELETE FROM contracts WHERE client_id = $1 OR freelancer_id = $1",
        "DELETE FROM gigs WHERE client_id = $1 OR freelancer_id = $1",
        "DELETE FROM workspaces WHERE owner_user_id = $1",
        "DELETE FROM users WHERE id = $1",
    ] {
        sqlx::query(query)
            .bind(user_id)
            .execute(pool)
            .await
            .expect("delete user data");
    }
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("json body")
}
