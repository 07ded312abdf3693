use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[async_trait]
pub trait UserWriter: Send + Sync {
    async fn insert(&self, user: User) -> AppResult<Id<User>>;
    async fn update_profile(&self, user: User) -> AppResult<()>;
    /// Locks the user row until the current transaction ends.
    async fn lock(&self, user_id: &Id<User>) -> AppResult<Option<User>>;
    async fn record_payment_totals(
        &self,
        client_id: &Id<User>,
        freelancer_id: &Id<User>,
        spent: i64,
        earned: i64,
    ) -> AppResult<()>;
}

#[async_trait]
pub trait UserReader: Send + Sync {
    async fn find_by_id(&self, user_id: &Id<User>) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn is_user(&self, username: &str, email: &str) -> AppResult<bool>;
}
