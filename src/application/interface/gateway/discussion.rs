use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::discussion::{Discussion, DiscussionMessage, DiscussionParticipant};
use crate::domain::entities::id::Id;
use crate::domain::entities::workspace::Workspace;

#[async_trait]
pub trait DiscussionWriter: Send + Sync {
    async fn insert(&self, discussion: Discussion) -> AppResult<Id<Discussion>>;
    async fn append_message(&self, message: DiscussionMessage) -> AppResult<()>;
    async fn upsert_participant(
        &self,
        discussion_id: &Id<Discussion>,
        participant: DiscussionParticipant,
    ) -> AppResult<()>;
    /// Persists status, pin flag and the derived counters.
    async fn update_summary(&self, discussion: &Discussion) -> AppResult<()>;
}

#[async_trait]
pub trait DiscussionReader: Send + Sync {
    async fn find_by_id(&self, discussion_id: &Id<Discussion>) -> AppResult<Option<Discussion>>;
    /// Same as `find_by_id` but locks the discussion row for the rest of the transaction.
    async fn find_by_id_for_update(&self, discussion_id: &Id<Discussion>) -> AppResult<Option<Discussion>>;
    async fn get_all(&self, workspace_id: &Id<Workspace>, limit: i64, offset: i64) -> AppResult<Vec<Discussion>>;
    async fn count_discussions(&self, workspace_id: &Id<Workspace>) -> AppResult<i64>;
}
