use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::contract::{Contract, ContractStatus, Milestone, MilestoneStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[async_trait]
pub trait ContractWriter: Send + Sync {
    async fn insert(&self, contract: Contract) -> AppResult<Id<Contract>>;
    /// Writes the contract's status and lifecycle stamps only if the stored
    /// status still equals `expected`. Returns whether the row was updated.
    async fn update_status(&self, contract: &Contract, expected: ContractStatus) -> AppResult<bool>;
    /// Same compare-and-set for a milestone; also requires the contract to be in progress.
    async fn update_milestone(&self, milestone: &Milestone, expected: MilestoneStatus) -> AppResult<bool>;
}

#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn find_by_id(&self, contract_id: &Id<Contract>) -> AppResult<Option<Contract>>;
    async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Contract>>;
    async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64>;
}
