use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::pagination::PageDTO;
use crate::application::dto::withdrawal::{
    BalanceDTO, CancelWithdrawalDTO, GetBalanceDTO, GetWithdrawalListDTO, RequestWithdrawalDTO, WithdrawalDTO,
};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::payment::PaymentReader;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::application::interface::gateway::withdrawal::{WithdrawalReader, WithdrawalWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::withdrawal::{BankDetails, Withdrawal, WithdrawalStatus};
use crate::domain::services::settlement::{ensure_withdrawable, settle, Balance, EarningsPolicy};

async fn current_balance(
    payment_reader: &dyn PaymentReader,
    withdrawal_reader: &dyn WithdrawalReader,
    policy: EarningsPolicy,
    user_id: &Id<User>,
) -> AppResult<Balance> {
    let payments = payment_reader.get_received(user_id).await?;
    let withdrawals = withdrawal_reader.get_all_for_user(user_id).await?;
    settle(policy, user_id, &payments, &withdrawals)
}

#[derive(Clone)]
pub struct GetBalanceInteractor {
    payment_reader: Arc<dyn PaymentReader>,
    withdrawal_reader: Arc<dyn WithdrawalReader>,
}

impl GetBalanceInteractor {
    pub fn new(payment_reader: Arc<dyn PaymentReader>, withdrawal_reader: Arc<dyn WithdrawalReader>) -> Self {
        Self {
            payment_reader,
            withdrawal_reader,
        }
    }

    pub async fn execute(&self, dto: GetBalanceDTO) -> AppResult<BalanceDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let balance = current_balance(
            self.payment_reader.as_ref(),
            self.withdrawal_reader.as_ref(),
            dto.policy,
            &user_id,
        )
        .await?;
        Ok(balance.into())
    }
}

#[derive(Clone)]
pub struct RequestWithdrawalInteractor {
    db_session: Arc<dyn DBSession>,
    user_writer: Arc<dyn UserWriter>,
    payment_reader: Arc<dyn PaymentReader>,
    withdrawal_reader: Arc<dyn WithdrawalReader>,
    withdrawal_writer: Arc<dyn WithdrawalWriter>,
}

impl RequestWithdrawalInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_writer: Arc<dyn UserWriter>,
        payment_reader: Arc<dyn PaymentReader>,
        withdrawal_reader: Arc<dyn WithdrawalReader>,
        withdrawal_writer: Arc<dyn WithdrawalWriter>,
    ) -> Self {
        Self {
            db_session,
            user_writer,
            payment_reader,
            withdrawal_reader,
            withdrawal_writer,
        }
    }

    pub async fn execute(&self, dto: RequestWithdrawalDTO) -> AppResult<WithdrawalDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        if dto.amount <= 0 {
            return Err(AppError::Validation("Withdrawal amount must be positive".to_string()));
        }
        if dto.amount < dto.minimum_amount {
            return Err(AppError::Validation(format!(
                "Minimum withdrawal amount is {}",
                dto.minimum_amount
            )));
        }
        let bank = dto.bank_details;
        if [&bank.account_holder, &bank.account_number, &bank.ifsc_code, &bank.bank_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AppError::Validation("Bank details are incomplete".to_string()));
        }

        // Held until commit: concurrent requests for the same user queue here.
        let user = self.user_writer.lock(&user_id).await?.ok_or(AppError::UserNotFound)?;
        if !user.is_freelancer() {
            return Err(AppError::Forbidden("Only freelancers can withdraw earnings".to_string()));
        }

        let balance = current_balance(
            self.payment_reader.as_ref(),
            self.withdrawal_reader.as_ref(),
            dto.policy,
            &user_id,
        )
        .await?;
        if let Err(err) = ensure_withdrawable(&balance, dto.amount) {
            warn!("Withdrawal of {} refused for {}: {}", dto.amount, user_id, err);
            return Err(err);
        }

        let withdrawal = Withdrawal::new(
            user_id,
            dto.amount,
            BankDetails {
                account_holder: bank.account_holder,
                account_number: bank.account_number,
                ifsc_code: bank.ifsc_code.to_uppercase(),
                bank_name: bank.bank_name,
            },
        );
        self.withdrawal_writer.insert(withdrawal.clone()).await?;
        self.db_session.commit().await?;
        info!(
            "Withdrawal {} of {} requested by {}",
            withdrawal.transaction_id, withdrawal.amount, withdrawal.user_id
        );
        Ok(withdrawal.into())
    }
}

#[derive(Clone)]
pub struct GetWithdrawalListInteractor {
    withdrawal_reader: Arc<dyn WithdrawalReader>,
}

impl GetWithdrawalListInteractor {
    pub fn new(withdrawal_reader: Arc<dyn WithdrawalReader>) -> Self {
        Self { withdrawal_reader }
    }

    pub async fn execute(&self, dto: GetWithdrawalListDTO) -> AppResult<PageDTO<WithdrawalDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let (page, per_page, offset) = dto.page.bounds();
        let total = self.withdrawal_reader.count_for_user(&user_id).await?;
        let withdrawals = self.withdrawal_reader.get_for_user(&user_id, per_page, offset).await?;
        Ok(PageDTO {
            total,
            page,
            per_page,
            items: withdrawals.into_iter().map(WithdrawalDTO::from).collect(),
        })
    }
}

#[derive(Clone)]
pub struct CancelWithdrawalInteractor {
    db_session: Arc<dyn DBSession>,
    withdrawal_reader: Arc<dyn WithdrawalReader>,
    withdrawal_writer: Arc<dyn WithdrawalWriter>,
}

impl CancelWithdrawalInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        withdrawal_reader: Arc<dyn WithdrawalReader>,
        withdrawal_writer: Arc<dyn WithdrawalWriter>,
    ) -> Self {
        Self {
            db_session,
            withdrawal_reader,
            withdrawal_writer,
        }
    }

    pub async fn execute(&self, dto: CancelWithdrawalDTO) -> AppResult<WithdrawalDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let withdrawal_id: Id<Withdrawal> = dto.withdrawal_id.try_into()?;

        let mut withdrawal = self
            .withdrawal_reader
            .find_by_id(&withdrawal_id)
            .await?
            .filter(|w| w.user_id == user_id)
            .ok_or(AppError::WithdrawalNotFound)?;

        let invalid = AppError::InvalidTransition {
            entity: "withdrawal",
            from: withdrawal.status.as_str().to_string(),
            to: WithdrawalStatus::Cancelled.as_str().to_string(),
        };
        if withdrawal.status != WithdrawalStatus::Pending {
            return Err(invalid);
        }
        if !self.withdrawal_writer.cancel(&withdrawal_id, &user_id).await? {
            return Err(invalid);
        }
        withdrawal.status = WithdrawalStatus::Cancelled;
        withdrawal.updated_at = Utc::now();

        self.db_session.commit().await?;
        Ok(withdrawal.into())
    }
}
