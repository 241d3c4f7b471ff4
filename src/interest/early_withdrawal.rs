use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest::day_count::YEAR_BASIS;

/// early withdrawal terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyWithdrawalConfig {
    /// flat annual rate paid instead of the contracted tier rate
    pub annual_rate: Rate,
}

impl Default for EarlyWithdrawalConfig {
    fn default() -> Self {
        Self {
            annual_rate: Rate::from_decimal(dec!(0.005)),
        }
    }
}

/// result of withdrawing from a deposit before maturity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyWithdrawalQuote {
    pub days_elapsed: u32,
    pub applied_rate: Rate,
    pub new_interest: Money,
    pub total_withdrawal_amount: Money,
    pub remaining_balance: Money,
    pub is_partial: bool,
}

/// engine for pricing early withdrawals
#[derive(Debug, Clone, Default)]
pub struct EarlyWithdrawalEngine {
    pub config: EarlyWithdrawalConfig,
}

impl EarlyWithdrawalEngine {
    pub fn new(config: EarlyWithdrawalConfig) -> Self {
        Self { config }
    }

    /// price a withdrawal of `requested` out of `principal` after `days_elapsed` days.
    /// `requested` is expected to be clamped to `[0, principal]` already.
    pub fn quote(&self, principal: Money, requested: Money, days_elapsed: u32) -> EarlyWithdrawalQuote {
        let rate = self.config.annual_rate;
        let new_interest = requested.simple_interest(rate, days_elapsed, YEAR_BASIS);
        let is_partial = requested < principal;

        let (total_withdrawal_amount, remaining_balance) = if is_partial {
            (requested + new_interest, principal - requested)
        } else {
            (principal + new_interest, Money::ZERO)
        };

        EarlyWithdrawalQuote {
            days_elapsed,
            applied_rate: rate,
            new_interest,
            total_withdrawal_amount,
            remaining_balance,
            is_partial,
        }
    }
}

/// clamp a typed-in withdrawal amount to what the deposit holds
pub fn clamp_withdrawal_amount(requested: Money, principal: Money) -> Money {
    requested.clamp(Money::ZERO, principal.max(Money::ZERO))
}
