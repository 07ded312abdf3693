use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::withdrawal::Withdrawal;

#[async_trait]
pub trait WithdrawalWriter: Send + Sync {
    async fn insert(&self, withdrawal: Withdrawal) -> AppResult<Id<Withdrawal>>;
    /// `pending -> cancelled` for the owner's withdrawal; false if it was not pending.
    async fn cancel(&self, withdrawal_id: &Id<Withdrawal>, user_id: &Id<User>) -> AppResult<bool>;
}

#[async_trait]
pub trait WithdrawalReader: Send + Sync {
    async fn find_by_id(&self, withdrawal_id: &Id<Withdrawal>) -> AppResult<Option<Withdrawal>>;
    /// Every withdrawal of the user, for balance settlement.
    async fn get_all_for_user(&self, user_id: &Id<User>) -> AppResult<Vec<Withdrawal>>;
    async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Withdrawal>>;
    async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64>;
}
