use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::payment::{CreateOrderRequest, GatewayOrder, PaymentGateway};

#[derive(Serialize)]
struct OrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a Value,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

impl From<OrderResponse> for GatewayOrder {
    fn from(response: OrderResponse) -> Self {
        Self {
            order_id: response.id,
            amount: response.amount,
            currency: response.currency,
        }
    }
}

/// Razorpay Orders API over HTTPS with basic auth.
#[derive(Clone)]
pub struct RazorpayGateway {
    client: reqwest::Client,
    api_base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(api_base_url: String, key_id: String, key_secret: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_base_url,
            key_id,
            key_secret,
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> AppResult<GatewayOrder> {
        let body = OrderBody {
            amount: request.amount,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        let response = self
            .client
            .post(self.orders_url())
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::PaymentGatewayError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Order creation rejected: status={} body={}", status, detail);
            return Err(AppError::PaymentGatewayError(format!("order creation failed with {}", status)));
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| AppError::PaymentGatewayError(e.to_string()))?;
        info!("Created gateway order {} for receipt {}", order.id, request.receipt);
        Ok(order.into())
    }
}
