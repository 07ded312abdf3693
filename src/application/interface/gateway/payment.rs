use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::payment::Payment;
use crate::domain::entities::user::User;

#[async_trait]
pub trait PaymentWriter: Send + Sync {
    async fn insert(&self, payment: Payment) -> AppResult<Id<Payment>>;
    /// Marks the order paid unless it already is. Returns true only for the
    /// call that performed the transition.
    async fn capture(&self, order_id: &str, payment_id: &str) -> AppResult<bool>;
    /// Marks a not-yet-paid order as failed.
    async fn mark_failed(&self, order_id: &str, payment_id: Option<String>) -> AppResult<bool>;
}

#[async_trait]
pub trait PaymentReader: Send + Sync {
    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Option<Payment>>;
    async fn find_by_payment_id(&self, payment_id: &str) -> AppResult<Option<Payment>>;
    /// Every payment where `user_id` is the payee, for balance settlement.
    async fn get_received(&self, user_id: &Id<User>) -> AppResult<Vec<Payment>>;
    async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Payment>>;
    async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64>;
}
