use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::Notification;
use crate::domain::entities::user::User;

#[async_trait]
pub trait NotificationWriter: Send + Sync {
    async fn insert(&self, notification: Notification) -> AppResult<Id<Notification>>;
    async fn mark_read(&self, notification_id: &Id<Notification>, recipient_id: &Id<User>) -> AppResult<bool>;
    async fn mark_all_read(&self, recipient_id: &Id<User>) -> AppResult<u64>;
}

#[async_trait]
pub trait NotificationReader: Send + Sync {
    async fn get_for_user(&self, recipient_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Notification>>;
    async fn count_for_user(&self, recipient_id: &Id<User>) -> AppResult<i64>;
    async fn count_unread(&self, recipient_id: &Id<User>) -> AppResult<i64>;
}
