use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::payment::{CreateOrderRequest, GatewayOrder, PaymentGateway};

/// Offline provider for development; orders exist only as generated ids.
#[derive(Default, Clone)]
pub struct LocalPaymentGateway;

#[async_trait]
impl PaymentGateway for LocalPaymentGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> AppResult<GatewayOrder> {
        if request.amount <= 0 {
            return Err(AppError::PaymentGatewayError("amount must be positive".to_string()));
        }
        let order_id = format!("order_{}", Uuid::now_v7().simple());
        info!("Local order {} for receipt {}", order_id, request.receipt);

        Ok(GatewayOrder {
            order_id,
            amount: request.amount,
            currency: request.currency,
        })
    }
}
