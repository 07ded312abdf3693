use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::withdrawal::{BalanceDTO, BankDetailsDTO, WithdrawalDTO};
use crate::infra::constants::MAX_AMOUNT;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BankDetailsRequest {
    #[validate(length(min = 1, max = 100))]
    pub account_holder: String,
    #[validate(length(min = 6, max = 20, message = "Account number must be between 6 and 20 characters"))]
    pub account_number: String,
    #[validate(length(equal = 11, message = "IFSC code must be 11 characters"))]
    pub ifsc_code: String,
    #[validate(length(min = 1, max = 100))]
    pub bank_name: String,
}

impl From<BankDetailsRequest> for BankDetailsDTO {
    fn from(request: BankDetailsRequest) -> Self {
        Self {
            account_holder: request.account_holder,
            account_number: request.account_number,
            ifsc_code: request.ifsc_code,
            bank_name: request.bank_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "amount": 400000,
    "bank_details": {
        "account_holder": "Asha Rao",
        "account_number": "000123456789",
        "ifsc_code": "HDFC0001234",
        "bank_name": "HDFC"
    }
}))]
pub struct RequestWithdrawalRequest {
    #[validate(range(min = 1, max = MAX_AMOUNT, message = "Amount must be between 1 and 10^12"))]
    pub amount: i64,
    #[validate(nested)]
    pub bank_details: BankDetailsRequest,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Sum of counted payments before the platform fee.
    pub gross: i64,
    pub fee: i64,
    pub net: i64,
    pub withdrawn: i64,
    pub available: i64,
}

impl From<BalanceDTO> for BalanceResponse {
    fn from(dto: BalanceDTO) -> Self {
        Self {
            gross: dto.gross,
            fee: dto.fee,
            net: dto.net,
            withdrawn: dto.withdrawn,
            available: dto.available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawalResponse {
    pub id: String,
    pub amount: i64,
    #[schema(example = "pending")]
    pub status: String,
    pub transaction_id: String,
    pub bank_name: String,
    #[schema(example = "6789")]
    pub account_last4: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WithdrawalDTO> for WithdrawalResponse {
    fn from(dto: WithdrawalDTO) -> Self {
        Self {
            id: dto.id,
            amount: dto.amount,
            status: dto.status,
            transaction_id: dto.transaction_id,
            bank_name: dto.bank_name,
            account_last4: dto.account_last4,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

page_response!(WithdrawalListResponse, WithdrawalResponse);
