use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::contract::Contract;
use crate::domain::entities::gig::Gig;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Created,
    Attempted,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Attempted => "attempted",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(PaymentStatus::Created),
            "attempted" => Ok(PaymentStatus::Attempted),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(AppError::Validation(format!("Unknown payment status `{}`", other))),
        }
    }
}

/// A payment settles exactly one gig or one contract.
#[derive(Debug, Clone)]
pub enum PaymentTarget {
    Gig(Id<Gig>),
    Contract(Id<Contract>),
}

impl PaymentTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentTarget::Gig(_) => "gig",
            PaymentTarget::Contract(_) => "contract",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub id: Id<Payment>,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub client_id: Id<User>,
    pub freelancer_id: Id<User>,
    pub target: PaymentTarget,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        order_id: String,
        client_id: Id<User>,
        freelancer_id: Id<User>,
        target: PaymentTarget,
        amount: i64,
        currency: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            order_id,
            payment_id: None,
            client_id,
            freelancer_id,
            target,
            amount,
            currency,
            status: PaymentStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }
}
