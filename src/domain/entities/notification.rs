use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ContractOffered,
    ContractAccepted,
    ContractDeclined,
    GigAccepted,
    InvitationReceived,
    PaymentCaptured,
    PaymentFailed,
    PaymentDisputed,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ContractOffered => "contract_offered",
            NotificationKind::ContractAccepted => "contract_accepted",
            NotificationKind::ContractDeclined => "contract_declined",
            NotificationKind::GigAccepted => "gig_accepted",
            NotificationKind::InvitationReceived => "invitation_received",
            NotificationKind::PaymentCaptured => "payment_captured",
            NotificationKind::PaymentFailed => "payment_failed",
            NotificationKind::PaymentDisputed => "payment_disputed",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contract_offered" => Ok(NotificationKind::ContractOffered),
            "contract_accepted" => Ok(NotificationKind::ContractAccepted),
            "contract_declined" => Ok(NotificationKind::ContractDeclined),
            "gig_accepted" => Ok(NotificationKind::GigAccepted),
            "invitation_received" => Ok(NotificationKind::InvitationReceived),
            "payment_captured" => Ok(NotificationKind::PaymentCaptured),
            "payment_failed" => Ok(NotificationKind::PaymentFailed),
            "payment_disputed" => Ok(NotificationKind::PaymentDisputed),
            other => Err(AppError::Validation(format!("Unknown notification kind `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Id<Notification>,
    pub recipient_id: Id<User>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(recipient_id: Id<User>, kind: NotificationKind, title: &str, message: String, data: Value) -> Self {
        Self {
            id: Id::generate(),
            recipient_id,
            kind,
            title: title.to_string(),
            message,
            data,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
