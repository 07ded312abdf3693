use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::gig::Gig;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[async_trait]
pub trait GigWriter: Send + Sync {
    async fn insert(&self, gig: Gig) -> AppResult<Id<Gig>>;
    /// `open -> assigned`; returns false when the gig was no longer open.
    async fn assign(&self, gig_id: &Id<Gig>, freelancer_id: &Id<User>) -> AppResult<bool>;
    /// `assigned -> completed`; returns false when the gig was not assigned.
    async fn complete(&self, gig_id: &Id<Gig>) -> AppResult<bool>;
}

#[async_trait]
pub trait GigReader: Send + Sync {
    async fn find_by_id(&self, gig_id: &Id<Gig>) -> AppResult<Option<Gig>>;
    async fn get_open(&self, limit: i64, offset: i64) -> AppResult<Vec<Gig>>;
    async fn count_open(&self) -> AppResult<i64>;
}
