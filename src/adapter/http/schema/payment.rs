use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::payment::{PaymentDTO, PaymentOrderDTO, WebhookAckDTO};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({ "target_type": "gig", "target_id": "019c47ec-183d-744e-b11d-cd409015bf13" }))]
pub struct CreatePaymentOrderRequest {
    /// `gig` or `contract`.
    pub target_type: String,
    pub target_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentOrderResponse {
    pub payment_id: String,
    #[schema(example = "order_NfX2b9PZ1k3Qa7")]
    pub order_id: String,
    pub amount: i64,
    #[schema(example = "INR")]
    pub currency: String,
    /// Public key the checkout widget is opened with.
    pub key_id: String,
}

impl From<PaymentOrderDTO> for PaymentOrderResponse {
    fn from(dto: PaymentOrderDTO) -> Self {
        Self {
            payment_id: dto.payment_id,
            order_id: dto.order_id,
            amount: dto.amount,
            currency: dto.currency,
            key_id: dto.key_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1))]
    pub razorpay_order_id: String,
    #[validate(length(min = 1))]
    pub razorpay_payment_id: String,
    #[validate(length(min = 1))]
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: String,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub client_id: String,
    pub freelancer_id: String,
    pub target_type: String,
    pub target_id: String,
    pub amount: i64,
    pub currency: String,
    #[schema(example = "paid")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentDTO> for PaymentResponse {
    fn from(dto: PaymentDTO) -> Self {
        Self {
            id: dto.id,
            order_id: dto.order_id,
            payment_id: dto.payment_id,
            client_id: dto.client_id,
            freelancer_id: dto.freelancer_id,
            target_type: dto.target_type,
            target_id: dto.target_id,
            amount: dto.amount,
            currency: dto.currency,
            status: dto.status,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

page_response!(PaymentListResponse, PaymentResponse);

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAckResponse {
    #[schema(example = "payment.captured")]
    pub event: String,
    pub handled: bool,
}

impl From<WebhookAckDTO> for WebhookAckResponse {
    fn from(dto: WebhookAckDTO) -> Self {
        Self {
            event: dto.event,
            handled: dto.handled,
        }
    }
}
