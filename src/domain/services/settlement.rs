use serde::{Deserialize, Serialize};

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::id::Id;
use crate::domain::entities::payment::{Payment, PaymentStatus};
use crate::domain::entities::user::User;
use crate::domain::entities::withdrawal::Withdrawal;

/// Platform fee in basis points (5%).
pub const PLATFORM_FEE_BASIS_POINTS: i64 = 500;
const BASIS_POINTS: i64 = 10_000;

/// Which payments count as earned money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsPolicy {
    /// Only captured (`paid`) payments are withdrawable.
    #[default]
    CapturedOnly,
    /// `created` and `attempted` payments count as well.
    IncludeUnconfirmed,
}

impl EarningsPolicy {
    pub fn counts(&self, status: PaymentStatus) -> bool {
        match self {
            EarningsPolicy::CapturedOnly => status == PaymentStatus::Paid,
            EarningsPolicy::IncludeUnconfirmed => matches!(
                status,
                PaymentStatus::Paid | PaymentStatus::Created | PaymentStatus::Attempted
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    pub gross: i64,
    pub fee: i64,
    pub net: i64,
    pub withdrawn: i64,
    pub available: i64,
}

/// Amount credited to the freelancer after the platform fee, rounded down.
pub fn net_of_fee(gross: i64) -> i64 {
    (gross as i128 * (BASIS_POINTS - PLATFORM_FEE_BASIS_POINTS) as i128 / BASIS_POINTS as i128) as i64
}

/// Recomputes a freelancer's balance from scratch. Pure: the same records
/// always give the same balance. Sums are taken in `i128`; a total that does
/// not fit back into `i64` is rejected.
pub fn settle(
    policy: EarningsPolicy,
    user_id: &Id<User>,
    payments: &[Payment],
    withdrawals: &[Withdrawal],
) -> AppResult<Balance> {
    let gross = to_amount(
        payments
            .iter()
            .filter(|p| &p.freelancer_id == user_id && policy.counts(p.status))
            .map(|p| p.amount as i128)
            .sum(),
    )?;
    let net = net_of_fee(gross);
    let withdrawn = to_amount(
        withdrawals
            .iter()
            .filter(|w| &w.user_id == user_id && w.status.reduces_balance())
            .map(|w| w.amount as i128)
            .sum(),
    )?;

    Ok(Balance {
        gross,
        fee: gross - net,
        net,
        withdrawn,
        available: to_amount(net as i128 - withdrawn as i128)?,
    })
}

fn to_amount(total: i128) -> AppResult<i64> {
    i64::try_from(total)
        .map_err(|_| AppError::Validation("Amount exceeds the supported range".to_string()))
}

pub fn ensure_withdrawable(balance: &Balance, requested: i64) -> AppResult<()> {
    if requested > balance.available {
        return Err(AppError::InsufficientBalance {
            requested,
            available: balance.available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::payment::{Payment, PaymentStatus, PaymentTarget};
    use crate::domain::entities::user::User;
    use crate::domain::entities::withdrawal::{BankDetails, Withdrawal, WithdrawalStatus};
    use crate::domain::services::settlement::{ensure_withdrawable, net_of_fee, settle, EarningsPolicy};

    #[fixture]
    fn freelancer() -> Id<User> {
        Id::generate()
    }

    fn payment(freelancer: &Id<User>, amount: i64, status: PaymentStatus) -> Payment {
        let mut payment = Payment::new(
            format!("order_{}", Id::<Payment>::generate()),
            Id::generate(),
            freelancer.clone(),
            PaymentTarget::Gig(Id::generate()),
            amount,
            "INR".to_string(),
        );
        payment.status = status;
        payment
    }

    fn withdrawal(freelancer: &Id<User>, amount: i64, status: WithdrawalStatus) -> Withdrawal {
        let mut withdrawal = Withdrawal::new(
            freelancer.clone(),
            amount,
            BankDetails {
                account_holder: "Asha Rao".to_string(),
                account_number: "000123456789".to_string(),
                ifsc_code: "HDFC0001234".to_string(),
                bank_name: "HDFC".to_string(),
            },
        );
        withdrawal.status = status;
        withdrawal
    }

    #[rstest]
    fn test_single_paid_payment(freelancer: Id<User>) {
        let payments = vec![payment(&freelancer, 10_000, PaymentStatus::Paid)];
        let balance = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &[]).unwrap();

        assert_eq!(balance.gross, 10_000);
        assert_eq!(balance.fee, 500);
        assert_eq!(balance.net, 9_500);
        assert_eq!(balance.available, 9_500);
    }

    #[rstest]
    fn test_pending_withdrawal_reduces_balance(freelancer: Id<User>) {
        let payments = vec![payment(&freelancer, 10_000, PaymentStatus::Paid)];
        let withdrawals = vec![withdrawal(&freelancer, 4_000, WithdrawalStatus::Pending)];
        let balance = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap();

        assert_eq!(balance.available, 5_500);
        match ensure_withdrawable(&balance, 6_000).unwrap_err() {
            AppError::InsufficientBalance { requested, available } => {
                assert_eq!(requested, 6_000);
                assert_eq!(available, 5_500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(ensure_withdrawable(&balance, 5_500).is_ok());
    }

    #[rstest]
    #[case(WithdrawalStatus::Pending, 5_500)]
    #[case(WithdrawalStatus::Processing, 5_500)]
    #[case(WithdrawalStatus::Completed, 5_500)]
    #[case(WithdrawalStatus::Failed, 9_500)]
    #[case(WithdrawalStatus::Cancelled, 9_500)]
    fn test_withdrawal_status_effect(
        freelancer: Id<User>,
        #[case] status: WithdrawalStatus,
        #[case] expected: i64,
    ) {
        let payments = vec![payment(&freelancer, 10_000, PaymentStatus::Paid)];
        let withdrawals = vec![withdrawal(&freelancer, 4_000, status)];
        let balance = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap();

        assert_eq!(balance.available, expected);
    }

    #[rstest]
    #[case(PaymentStatus::Paid, true, true)]
    #[case(PaymentStatus::Created, false, true)]
    #[case(PaymentStatus::Attempted, false, true)]
    #[case(PaymentStatus::Failed, false, false)]
    #[case(PaymentStatus::Refunded, false, false)]
    fn test_earnings_policy_predicate(
        #[case] status: PaymentStatus,
        #[case] captured_only: bool,
        #[case] include_unconfirmed: bool,
    ) {
        assert_eq!(EarningsPolicy::CapturedOnly.counts(status), captured_only);
        assert_eq!(EarningsPolicy::IncludeUnconfirmed.counts(status), include_unconfirmed);
    }

    #[rstest]
    fn test_unconfirmed_payments_follow_policy(freelancer: Id<User>) {
        let payments = vec![
            payment(&freelancer, 10_000, PaymentStatus::Paid),
            payment(&freelancer, 2_000, PaymentStatus::Created),
            payment(&freelancer, 2_000, PaymentStatus::Attempted),
        ];

        let strict = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &[]).unwrap();
        let lenient = settle(EarningsPolicy::IncludeUnconfirmed, &freelancer, &payments, &[]).unwrap();

        assert_eq!(strict.available, 9_500);
        assert_eq!(lenient.available, 13_300);
    }

    #[rstest]
    fn test_fee_is_applied_to_the_sum(freelancer: Id<User>) {
        let payments = vec![
            payment(&freelancer, 10, PaymentStatus::Paid),
            payment(&freelancer, 10, PaymentStatus::Paid),
        ];
        let balance = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &[]).unwrap();

        assert_eq!(balance.net, net_of_fee(20));
        assert_eq!(balance.net, 19);
    }

    #[rstest]
    fn test_other_users_records_are_ignored(freelancer: Id<User>) {
        let someone_else = Id::generate();
        let payments = vec![
            payment(&freelancer, 10_000, PaymentStatus::Paid),
            payment(&someone_else, 50_000, PaymentStatus::Paid),
        ];
        let withdrawals = vec![withdrawal(&someone_else, 1_000, WithdrawalStatus::Pending)];
        let balance = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap();

        assert_eq!(balance.available, 9_500);
    }

    #[rstest]
    fn test_settle_is_idempotent(freelancer: Id<User>) {
        let payments = vec![payment(&freelancer, 12_345, PaymentStatus::Paid)];
        let withdrawals = vec![withdrawal(&freelancer, 345, WithdrawalStatus::Completed)];

        let first = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap();
        let second = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_new_withdrawal_never_increases_balance(freelancer: Id<User>) {
        let payments = vec![payment(&freelancer, 10_000, PaymentStatus::Paid)];
        let mut withdrawals = Vec::new();
        let mut previous = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap().available;

        for status in [
            WithdrawalStatus::Pending,
            WithdrawalStatus::Failed,
            WithdrawalStatus::Processing,
            WithdrawalStatus::Cancelled,
            WithdrawalStatus::Completed,
        ] {
            withdrawals.push(withdrawal(&freelancer, 1_000, status));
            let current = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &withdrawals).unwrap().available;
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 6_500);
    }

    #[rstest]
    fn test_huge_totals_are_rejected_instead_of_wrapping(freelancer: Id<User>) {
        let half = i64::MAX / 2 + 1;
        let payments = vec![
            payment(&freelancer, half, PaymentStatus::Paid),
            payment(&freelancer, half, PaymentStatus::Paid),
        ];

        let error = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &[]).unwrap_err();
        assert_eq!(error.kind(), "validation_error");
    }

    #[rstest]
    fn test_largest_representable_total_settles(freelancer: Id<User>) {
        let payments = vec![
            payment(&freelancer, i64::MAX / 2, PaymentStatus::Paid),
            payment(&freelancer, i64::MAX / 2, PaymentStatus::Paid),
        ];

        let balance = settle(EarningsPolicy::CapturedOnly, &freelancer, &payments, &[]).unwrap();
        assert_eq!(balance.gross, i64::MAX - 1);
        assert_eq!(balance.net, net_of_fee(i64::MAX - 1));
    }
}
