pub mod day_count;
pub mod early_withdrawal;
pub mod rate_table;

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

pub use day_count::{add_months, days_between, fixed_term_days, sub_months, DayCountConvention, YEAR_BASIS};
pub use early_withdrawal::{
    clamp_withdrawal_amount, EarlyWithdrawalConfig, EarlyWithdrawalEngine, EarlyWithdrawalQuote,
};
pub use rate_table::{RateSchedule, RateScheduleKind, RateTable, RateTier};

/// interest earned over a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCalculation {
    pub principal_base: Money,
    pub annual_rate: Rate,
    pub days: u32,
    pub interest_amount: Money,
}

/// simple interest on `principal` for `days` days at an annual rate
pub fn simple_interest(principal: Money, annual_rate: Rate, days: u32) -> InterestCalculation {
    InterestCalculation {
        principal_base: principal,
        annual_rate,
        days,
        interest_amount: principal.simple_interest(annual_rate, days, YEAR_BASIS),
    }
}
