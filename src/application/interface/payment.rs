use async_trait::async_trait;
use serde_json::Value;

use crate::application::app_error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: CreateOrderRequest) -> AppResult<GatewayOrder>;
}
