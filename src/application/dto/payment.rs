use chrono::{DateTime, Utc};

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::payment::{Payment, PaymentTarget};

#[derive(Debug, Clone)]
pub struct CreatePaymentOrderDTO {
    pub user_id: String,
    pub target_type: String,
    pub target_id: String,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Clone)]
pub struct PaymentOrderDTO {
    pub payment_id: String,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Clone)]
pub struct VerifyPaymentDTO {
    pub user_id: String,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct WebhookDTO {
    pub body: Vec<u8>,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookAckDTO {
    pub event: String,
    pub handled: bool,
}

#[derive(Debug, Clone)]
pub struct CapturePaymentDTO {
    pub order_id: String,
    pub payment_id: String,
}

#[derive(Debug, Clone)]
pub struct GetPaymentListDTO {
    pub user_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone)]
pub struct PaymentDTO {
    pub id: String,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub client_id: String,
    pub freelancer_id: String,
    pub target_type: String,
    pub target_id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDTO {
    fn from(payment: Payment) -> Self {
        let target_id = match &payment.target {
            PaymentTarget::Gig(id) => id.value.to_string(),
            PaymentTarget::Contract(id) => id.value.to_string(),
        };
        Self {
            id: payment.id.value.to_string(),
            order_id: payment.order_id,
            payment_id: payment.payment_id,
            client_id: payment.client_id.value.to_string(),
            freelancer_id: payment.freelancer_id.value.to_string(),
            target_type: payment.target.kind().to_string(),
            target_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status.as_str().to_string(),
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}
