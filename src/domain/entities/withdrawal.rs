use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Processing => "processing",
            WithdrawalStatus::Completed => "completed",
            WithdrawalStatus::Failed => "failed",
            WithdrawalStatus::Cancelled => "cancelled",
        }
    }

    /// Failed and cancelled withdrawals never reduce the balance.
    pub fn reduces_balance(&self) -> bool {
        matches!(
            self,
            WithdrawalStatus::Pending | WithdrawalStatus::Processing | WithdrawalStatus::Completed
        )
    }
}

impl FromStr for WithdrawalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WithdrawalStatus::Pending),
            "processing" => Ok(WithdrawalStatus::Processing),
            "completed" => Ok(WithdrawalStatus::Completed),
            "failed" => Ok(WithdrawalStatus::Failed),
            "cancelled" => Ok(WithdrawalStatus::Cancelled),
            other => Err(AppError::Validation(format!("Unknown withdrawal status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDetails {
    pub account_holder: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
}

#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub id: Id<Withdrawal>,
    pub user_id: Id<User>,
    pub amount: i64,
    pub bank_details: BankDetails,
    pub status: WithdrawalStatus,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Withdrawal {
    pub fn new(user_id: Id<User>, amount: i64, bank_details: BankDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            user_id,
            amount,
            bank_details,
            status: WithdrawalStatus::Pending,
            transaction_id: generate_transaction_id(),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn generate_transaction_id() -> String {
    format!("WD{}", Uuid::now_v7().simple()).to_uppercase()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::entities::withdrawal::{generate_transaction_id, WithdrawalStatus};

    #[rstest]
    #[case(WithdrawalStatus::Pending, true)]
    #[case(WithdrawalStatus::Processing, true)]
    #[case(WithdrawalStatus::Completed, true)]
    #[case(WithdrawalStatus::Failed, false)]
    #[case(WithdrawalStatus::Cancelled, false)]
    fn test_reduces_balance(#[case] status: WithdrawalStatus, #[case] expected: bool) {
        assert_eq!(status.reduces_balance(), expected);
    }

    #[rstest]
    fn test_transaction_ids_are_unique() {
        let a = generate_transaction_id();
        let b = generate_transaction_id();
        assert!(a.starts_with("WD"));
        assert_eq!(a.len(), 34);
        assert_ne!(a, b);
    }
}
