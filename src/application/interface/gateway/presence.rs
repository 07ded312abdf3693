use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::presence::Presence;
use crate::domain::entities::user::User;

#[async_trait]
pub trait PresenceStore: Send + Sync {
    async fn heartbeat(&self, presence: Presence) -> AppResult<()>;
    async fn online_among(&self, user_ids: &[Id<User>], now: DateTime<Utc>) -> AppResult<Vec<Id<User>>>;
}
