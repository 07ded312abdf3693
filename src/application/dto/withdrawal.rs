use chrono::{DateTime, Utc};

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::withdrawal::Withdrawal;
use crate::domain::services::settlement::{Balance, EarningsPolicy};

#[derive(Debug, Clone)]
pub struct BankDetailsDTO {
    pub account_holder: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
}

#[derive(Debug, Clone)]
pub struct RequestWithdrawalDTO {
    pub user_id: String,
    pub amount: i64,
    pub bank_details: BankDetailsDTO,
    pub minimum_amount: i64,
    pub policy: EarningsPolicy,
}

#[derive(Debug, Clone)]
pub struct GetBalanceDTO {
    pub user_id: String,
    pub policy: EarningsPolicy,
}

#[derive(Debug, Clone)]
pub struct CancelWithdrawalDTO {
    pub user_id: String,
    pub withdrawal_id: String,
}

#[derive(Debug, Clone)]
pub struct GetWithdrawalListDTO {
    pub user_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceDTO {
    pub gross: i64,
    pub fee: i64,
    pub net: i64,
    pub withdrawn: i64,
    pub available: i64,
}

impl From<Balance> for BalanceDTO {
    fn from(balance: Balance) -> Self {
        Self {
            gross: balance.gross,
            fee: balance.fee,
            net: balance.net,
            withdrawn: balance.withdrawn,
            available: balance.available,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WithdrawalDTO {
    pub id: String,
    pub amount: i64,
    pub status: String,
    pub transaction_id: String,
    pub bank_name: String,
    /// Last four digits only.
    pub account_last4: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Withdrawal> for WithdrawalDTO {
    fn from(withdrawal: Withdrawal) -> Self {
        let number = &withdrawal.bank_details.account_number;
        let account_last4 = number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| number[i..].to_string())
            .unwrap_or_else(|| number.clone());
        Self {
            id: withdrawal.id.value.to_string(),
            amount: withdrawal.amount,
            status: withdrawal.status.as_str().to_string(),
            transaction_id: withdrawal.transaction_id,
            bank_name: withdrawal.bank_details.bank_name,
            account_last4,
            created_at: withdrawal.created_at,
            updated_at: withdrawal.updated_at,
        }
    }
}
