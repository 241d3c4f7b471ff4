use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::deposits::calculator::DepositCalculator;
use crate::errors::Result;
use crate::interest::add_months;

/// member's choices when renewing a deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverOptions {
    pub selected_term: u32,
    /// compound the earned interest into the new principal
    pub include_interest: bool,
    /// fresh funds added on top
    pub additional_deposit: Money,
}

/// terms of the renewed deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverQuote {
    pub total_amount: Money,
    pub new_interest_rate: Rate,
    pub new_maturity_date: DateTime<Utc>,
}

impl RolloverOptions {
    pub fn new(selected_term: u32) -> Self {
        Self {
            selected_term,
            include_interest: false,
            additional_deposit: Money::ZERO,
        }
    }

    pub fn include_interest(mut self, include: bool) -> Self {
        self.include_interest = include;
        self
    }

    pub fn additional_deposit(mut self, amount: Money) -> Self {
        self.additional_deposit = amount;
        self
    }

    /// new principal, re-looked-up rate and maturity for rolling over on `today`
    pub fn quote(
        &self,
        calculator: &DepositCalculator,
        principal: Money,
        interest_accrued: Money,
        today: DateTime<Utc>,
    ) -> Result<RolloverQuote> {
        let carried = if self.include_interest {
            principal + interest_accrued
        } else {
            principal
        };
        let total_amount = carried + self.additional_deposit;

        Ok(RolloverQuote {
            total_amount,
            new_interest_rate: calculator.rate_for(self.selected_term, total_amount),
            new_maturity_date: add_months(today, self.selected_term)?,
        })
    }
}
