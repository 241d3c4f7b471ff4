use serde::{Deserialize, Serialize};

use crate::config::LoanConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, LoanValidationError, Result};
use crate::types::LoanType;

/// outcome of checking a loan amount against its ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanValidation {
    pub loan_type: LoanType,
    pub requested_amount: Money,
    pub loanable_amount: Money,
    pub valid: bool,
    pub error: Option<LoanValidationError>,
}

impl LoanValidation {
    fn evaluate(loan_type: LoanType, requested_amount: Money, loanable_amount: Money) -> Self {
        let error = if !requested_amount.is_positive() {
            Some(LoanValidationError::ZeroAmount)
        } else if requested_amount > loanable_amount {
            Some(LoanValidationError::ExceedsLimit {
                limit: loanable_amount,
                requested: requested_amount,
            })
        } else {
            None
        };

        Self {
            loan_type,
            requested_amount,
            loanable_amount,
            valid: error.is_none(),
            error,
        }
    }

    /// turn an advisory failure into a hard error
    pub fn into_result(self) -> Result<Self> {
        match self.error.clone() {
            Some(err) => Err(EngineError::LoanRejected(err)),
            None => Ok(self),
        }
    }
}

/// check a sack-based request: `price * sacks` must be positive and within `max_sacks * price`
pub fn validate_loan_request(
    loan_type: LoanType,
    sacks: u32,
    max_sacks: u32,
    price_per_unit: Money,
) -> LoanValidation {
    let requested_amount = price_per_unit.times_units(sacks);
    let loanable_amount = price_per_unit.times_units(max_sacks);

    LoanValidation::evaluate(loan_type, requested_amount, loanable_amount)
}

/// ceiling for cash loans: marketing loans have a fixed cap, back-to-back loans are capped at share capital
pub fn cash_loan_ceiling(loan_type: LoanType, share_capital: Money, config: &LoanConfig) -> Result<Money> {
    match loan_type {
        LoanType::Marketing => Ok(config.marketing_loan_ceiling),
        LoanType::BackToBack => Ok(share_capital.max(Money::ZERO)),
        LoanType::Feeds | LoanType::Rice => Err(EngineError::UnsupportedLoanType { loan_type }),
    }
}

/// check a cash loan amount against its ceiling
pub fn validate_capped_loan(
    loan_type: LoanType,
    amount: Money,
    share_capital: Money,
    config: &LoanConfig,
) -> Result<LoanValidation> {
    let ceiling = cash_loan_ceiling(loan_type, share_capital, config)?;
    Ok(LoanValidation::evaluate(loan_type, amount, ceiling))
}

/// a member's commodity loan request as entered on the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityLoanRequest {
    pub loan_type: LoanType,
    pub sacks: u32,
    pub price_per_unit: Money,
    /// share of the commodity value financed; falls back to the configured default
    pub loan_percentage: Option<Rate>,
}

/// commodity request checked against the member's sack limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityLoanAssessment {
    pub max_sacks: u32,
    pub loan_percentage: Rate,
    /// requested amount times the loan percentage
    pub financed_amount: Money,
    pub validation: LoanValidation,
}

impl CommodityLoanRequest {
    pub fn new(loan_type: LoanType, sacks: u32, price_per_unit: Money) -> Self {
        Self {
            loan_type,
            sacks,
            price_per_unit,
            loan_percentage: None,
        }
    }

    pub fn with_loan_percentage(mut self, pct: Rate) -> Self {
        self.loan_percentage = Some(pct);
        self
    }

    /// look up the sack limit for `share_capital` and validate the request against it
    pub fn assess(&self, share_capital: Money, config: &LoanConfig) -> Result<CommodityLoanAssessment> {
        if !self.loan_type.is_commodity() {
            return Err(EngineError::UnsupportedLoanType {
                loan_type: self.loan_type,
            });
        }

        let loan_percentage = self.loan_percentage.unwrap_or(config.default_loan_percentage);
        if loan_percentage <= Rate::ZERO || loan_percentage > Rate::ONE {
            return Err(EngineError::InvalidConfiguration {
                message: format!("loan percentage must be within (0%, 100%]: {}", loan_percentage),
            });
        }

        let max_sacks = config.sack_limit_rule.sack_limit(share_capital, self.loan_type);
        let validation = validate_loan_request(self.loan_type, self.sacks, max_sacks, self.price_per_unit);
        let financed_amount = validation.requested_amount.portion(loan_percentage);

        log::debug!(
            "{:?} loan request: {} sacks of {} allowed, requested {}, valid {}",
            self.loan_type,
            self.sacks,
            max_sacks,
            validation.requested_amount,
            validation.valid
        );

        Ok(CommodityLoanAssessment {
            max_sacks,
            loan_percentage,
            financed_amount,
            validation,
        })
    }
}
