use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DepositConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{add_months, simple_interest};

/// quoted terms for placing a time deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub principal: Money,
    pub term_months: u32,
    pub interest_rate: Rate,
    /// days of interest earned over the term
    pub day_count: u32,
    pub interest: Money,
    /// always `principal + interest`
    pub payout: Money,
    pub start_date: DateTime<Utc>,
    pub maturity_date: DateTime<Utc>,
}

/// calculator for time deposit placement
#[derive(Debug, Clone, Default)]
pub struct DepositCalculator {
    pub config: DepositConfig,
}

impl DepositCalculator {
    pub fn new(config: DepositConfig) -> Self {
        Self { config }
    }

    pub fn rate_for(&self, term_months: u32, principal: Money) -> Rate {
        self.config.rate_schedule.rate_for(term_months, principal)
    }

    pub fn supports_term(&self, term_months: u32) -> bool {
        self.config.rate_schedule.supports_term(term_months)
    }

    /// quote interest, payout and maturity for a deposit placed on `as_of`.
    /// unsupported terms and amounts below the first tier quote zero interest.
    pub fn quote(&self, principal: Money, term_months: u32, as_of: DateTime<Utc>) -> Result<DepositQuote> {
        let interest_rate = self.rate_for(term_months, principal);
        let maturity_date = add_months(as_of, term_months)?;
        let day_count = self
            .config
            .day_count_convention
            .term_days(term_months, as_of, maturity_date);

        let interest = if interest_rate.is_zero() {
            Money::ZERO
        } else {
            simple_interest(principal, interest_rate, day_count).interest_amount
        };

        log::debug!(
            "deposit quote: {} for {} months at {} -> interest {}",
            principal,
            term_months,
            interest_rate,
            interest
        );

        Ok(DepositQuote {
            principal,
            term_months,
            interest_rate,
            day_count,
            interest,
            payout: principal + interest,
            start_date: as_of,
            maturity_date,
        })
    }
}
