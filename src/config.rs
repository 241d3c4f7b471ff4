use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::interest::{DayCountConvention, EarlyWithdrawalConfig, RateSchedule, RateScheduleKind};
use crate::loans::SackLimitRule;

/// engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub deposit_config: DepositConfig,
    pub early_withdrawal: EarlyWithdrawalConfig,
    pub loan_config: LoanConfig,
}

/// time deposit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositConfig {
    pub rate_schedule: RateSchedule,
    pub day_count_convention: DayCountConvention,
}

/// loan limit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    pub sack_limit_rule: SackLimitRule,
    /// fixed ceiling for marketing loans
    pub marketing_loan_ceiling: Money,
    /// share of the commodity value financed when a request does not say
    pub default_loan_percentage: Rate,
}

impl Default for DepositConfig {
    fn default() -> Self {
        Self {
            rate_schedule: RateSchedule::progressive(),
            day_count_convention: DayCountConvention::FixedTerm,
        }
    }
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            sack_limit_rule: SackLimitRule::PerCommodity,
            marketing_loan_ceiling: Money::from_major(75_000),
            default_loan_percentage: Rate::ONE,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineConfig {
    /// cooperative defaults: progressive rates, fixed term day count, per-commodity sack limits
    pub fn standard() -> Self {
        Self {
            deposit_config: DepositConfig::default(),
            early_withdrawal: EarlyWithdrawalConfig::default(),
            loan_config: LoanConfig::default(),
        }
    }

    /// swap the deposit rate schedule for a named one
    pub fn with_rate_schedule(mut self, kind: RateScheduleKind) -> Self {
        self.deposit_config.rate_schedule = RateSchedule::from_kind(kind);
        self
    }

    pub fn with_day_count(mut self, convention: DayCountConvention) -> Self {
        self.deposit_config.day_count_convention = convention;
        self
    }

    pub fn with_sack_limit_rule(mut self, rule: SackLimitRule) -> Self {
        self.loan_config.sack_limit_rule = rule;
        self
    }

    pub fn with_early_withdrawal_rate(mut self, rate: Rate) -> Self {
        self.early_withdrawal.annual_rate = rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.deposit_config.rate_schedule.validate()?;

        if self.early_withdrawal.annual_rate < Rate::ZERO {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "early withdrawal rate cannot be negative: {}",
                    self.early_withdrawal.annual_rate
                ),
            });
        }

        if self.loan_config.marketing_loan_ceiling.is_negative() {
            return Err(EngineError::InvalidConfiguration {
                message: "marketing loan ceiling cannot be negative".to_string(),
            });
        }

        let pct = self.loan_config.default_loan_percentage;
        if pct <= Rate::ZERO || pct > Rate::ONE {
            return Err(EngineError::InvalidConfiguration {
                message: format!("default loan percentage must be within (0%, 100%]: {}", pct),
            });
        }

        Ok(())
    }

    /// load and validate a configuration from json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
