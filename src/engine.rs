use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::deposits::{DepositCalculator, DepositQuote, RolloverOptions, RolloverQuote, TimeDepositRecord};
use crate::errors::Result;
use crate::interest::{EarlyWithdrawalEngine, EarlyWithdrawalQuote};
use crate::loans::{
    validate_capped_loan, validate_loan_request, CommodityLoanAssessment, CommodityLoanRequest,
    LoanValidation,
};
use crate::types::LoanType;

/// entry point for deposit and loan computations under one configuration
#[derive(Debug, Clone)]
pub struct FinancialEngine {
    config: EngineConfig,
    deposits: DepositCalculator,
    early_withdrawal: EarlyWithdrawalEngine,
}

impl FinancialEngine {
    /// create an engine; the configuration is validated first
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            deposits: DepositCalculator::new(config.deposit_config.clone()),
            early_withdrawal: EarlyWithdrawalEngine::new(config.early_withdrawal),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn deposit_calculator(&self) -> &DepositCalculator {
        &self.deposits
    }

    pub fn early_withdrawal_engine(&self) -> &EarlyWithdrawalEngine {
        &self.early_withdrawal
    }

    /// annual deposit rate; zero for unsupported terms or amounts below the first tier
    pub fn rate_for(&self, term_months: u32, principal: Money) -> Rate {
        self.deposits.rate_for(term_months, principal)
    }

    /// strict rate lookup rejecting unsupported terms and negative amounts
    pub fn try_rate_for(&self, term_months: u32, principal: Money) -> Result<Rate> {
        self.config
            .deposit_config
            .rate_schedule
            .try_rate_for(term_months, principal)
    }

    pub fn compute_deposit(&self, principal: Money, term_months: u32, as_of: DateTime<Utc>) -> Result<DepositQuote> {
        self.deposits.quote(principal, term_months, as_of)
    }

    pub fn compute_deposit_now(
        &self,
        principal: Money,
        term_months: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<DepositQuote> {
        self.compute_deposit(principal, term_months, time_provider.now())
    }

    pub fn compute_early_withdrawal(
        &self,
        deposit: &TimeDepositRecord,
        requested_amount: Money,
        today: DateTime<Utc>,
    ) -> Result<EarlyWithdrawalQuote> {
        deposit.quote_early_withdrawal(&self.early_withdrawal, requested_amount, today)
    }

    pub fn compute_early_withdrawal_now(
        &self,
        deposit: &TimeDepositRecord,
        requested_amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<EarlyWithdrawalQuote> {
        self.compute_early_withdrawal(deposit, requested_amount, time_provider.now())
    }

    pub fn compute_rollover(
        &self,
        deposit: &TimeDepositRecord,
        options: &RolloverOptions,
        today: DateTime<Utc>,
    ) -> Result<RolloverQuote> {
        deposit.quote_rollover(&self.deposits, options, today)
    }

    pub fn compute_rollover_now(
        &self,
        deposit: &TimeDepositRecord,
        options: &RolloverOptions,
        time_provider: &SafeTimeProvider,
    ) -> Result<RolloverQuote> {
        self.compute_rollover(deposit, options, time_provider.now())
    }

    /// place a new deposit dated from the time provider
    pub fn open_deposit(
        &self,
        member_id: impl Into<String>,
        principal: Money,
        term_months: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<TimeDepositRecord> {
        TimeDepositRecord::open(member_id, principal, term_months, time_provider.now(), &self.deposits)
    }

    pub fn withdraw_early(
        &self,
        deposit: &mut TimeDepositRecord,
        requested_amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<EarlyWithdrawalQuote> {
        deposit.withdraw_early(&self.early_withdrawal, requested_amount, time_provider.now())
    }

    pub fn roll_over(
        &self,
        deposit: &mut TimeDepositRecord,
        options: &RolloverOptions,
        time_provider: &SafeTimeProvider,
    ) -> Result<(RolloverQuote, TimeDepositRecord)> {
        deposit.roll_over(&self.deposits, options, time_provider.now())
    }

    /// sacks a member may borrow under the configured rule
    pub fn sack_limit(&self, share_capital: Money, loan_type: LoanType) -> u32 {
        self.config
            .loan_config
            .sack_limit_rule
            .sack_limit(share_capital, loan_type)
    }

    pub fn validate_loan_request(
        &self,
        loan_type: LoanType,
        sacks: u32,
        max_sacks: u32,
        price_per_unit: Money,
    ) -> LoanValidation {
        validate_loan_request(loan_type, sacks, max_sacks, price_per_unit)
    }

    pub fn validate_cash_loan(&self, loan_type: LoanType, amount: Money, share_capital: Money) -> Result<LoanValidation> {
        validate_capped_loan(loan_type, amount, share_capital, &self.config.loan_config)
    }

    pub fn assess_commodity_loan(
        &self,
        request: &CommodityLoanRequest,
        share_capital: Money,
    ) -> Result<CommodityLoanAssessment> {
        request.assess(share_capital, &self.config.loan_config)
    }
}

impl Default for FinancialEngine {
    fn default() -> Self {
        let config = EngineConfig::standard();
        Self {
            deposits: DepositCalculator::new(config.deposit_config.clone()),
            early_withdrawal: EarlyWithdrawalEngine::new(config.early_withdrawal),
            config,
        }
    }
}
