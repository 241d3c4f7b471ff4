use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::deposits::calculator::{DepositCalculator, DepositQuote};
use crate::deposits::rollover::{RolloverOptions, RolloverQuote};
use crate::errors::{EngineError, Result};
use crate::events::{Event, EventStore};
use crate::interest::{days_between, sub_months, EarlyWithdrawalEngine, EarlyWithdrawalQuote};
use crate::types::{DepositId, DepositStatus};

/// a member's time deposit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeDepositRecord {
    pub id: DepositId,
    pub member_id: String,
    pub principal: Money,
    pub term_months: u32,
    /// placement date when stored; otherwise derived from maturity
    pub start_date: Option<DateTime<Utc>>,
    pub maturity_date: DateTime<Utc>,
    /// rate locked in at placement
    pub interest_rate: Rate,
    pub interest_accrued: Money,
    pub payout_amount: Money,
    pub status: DepositStatus,
    #[serde(skip)]
    events: EventStore,
}

impl TimeDepositRecord {
    /// place a new deposit, locking in the quoted rate
    pub fn open(
        member_id: impl Into<String>,
        principal: Money,
        term_months: u32,
        as_of: DateTime<Utc>,
        calculator: &DepositCalculator,
    ) -> Result<Self> {
        if !principal.is_positive() {
            return Err(EngineError::InvalidAmount { amount: principal });
        }
        if !calculator.supports_term(term_months) {
            return Err(EngineError::InvalidTerm { term_months });
        }

        let quote = calculator.quote(principal, term_months, as_of)?;
        Ok(Self::from_quote(member_id.into(), &quote))
    }

    /// rebuild a record fetched from storage; the start date is derived on demand
    pub fn existing(
        id: DepositId,
        member_id: impl Into<String>,
        principal: Money,
        term_months: u32,
        maturity_date: DateTime<Utc>,
        interest_rate: Rate,
        interest_accrued: Money,
    ) -> Self {
        Self {
            id,
            member_id: member_id.into(),
            principal,
            term_months,
            start_date: None,
            maturity_date,
            interest_rate,
            interest_accrued,
            payout_amount: principal + interest_accrued,
            status: DepositStatus::Active,
            events: EventStore::new(),
        }
    }

    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    fn from_quote(member_id: String, quote: &DepositQuote) -> Self {
        let mut record = Self {
            id: Uuid::new_v4(),
            member_id,
            principal: quote.principal,
            term_months: quote.term_months,
            start_date: Some(quote.start_date),
            maturity_date: quote.maturity_date,
            interest_rate: quote.interest_rate,
            interest_accrued: quote.interest,
            payout_amount: quote.payout,
            status: DepositStatus::Active,
            events: EventStore::new(),
        };

        record.events.emit(Event::DepositOpened {
            deposit_id: record.id,
            member_id: record.member_id.clone(),
            principal: record.principal,
            term_months: record.term_months,
            interest_rate: record.interest_rate,
            maturity_date: record.maturity_date,
            timestamp: quote.start_date,
        });

        record
    }

    /// stored start date, or maturity minus the term.
    /// the derivation drifts when the original day did not exist in the maturity month.
    pub fn effective_start_date(&self) -> Result<DateTime<Utc>> {
        match self.start_date {
            Some(start) => Ok(start),
            None => sub_months(self.maturity_date, self.term_months),
        }
    }

    pub fn is_matured(&self, today: DateTime<Utc>) -> bool {
        today >= self.maturity_date
    }

    pub fn days_to_maturity(&self, today: DateTime<Utc>) -> u32 {
        days_between(today, self.maturity_date)
    }

    /// price an early withdrawal without changing the record.
    /// `requested` is used as given; clamp it with `clamp_withdrawal_amount` first.
    pub fn quote_early_withdrawal(
        &self,
        engine: &EarlyWithdrawalEngine,
        requested: Money,
        today: DateTime<Utc>,
    ) -> Result<EarlyWithdrawalQuote> {
        let start = self.effective_start_date()?;
        let days_elapsed = days_between(start, today);
        Ok(engine.quote(self.principal, requested, days_elapsed))
    }

    /// price a rollover without changing the record
    pub fn quote_rollover(
        &self,
        calculator: &DepositCalculator,
        options: &RolloverOptions,
        today: DateTime<Utc>,
    ) -> Result<RolloverQuote> {
        options.quote(calculator, self.principal, self.interest_accrued, today)
    }

    /// move a running deposit to matured once its maturity date is reached;
    /// a partially withdrawn remainder matures like any other
    pub fn mark_matured(&mut self, today: DateTime<Utc>) -> bool {
        let running = matches!(self.status, DepositStatus::Active | DepositStatus::PartiallyWithdrawn);
        if !running || !self.is_matured(today) {
            return false;
        }

        self.set_status(DepositStatus::Matured, today);
        self.events.emit(Event::DepositMatured {
            deposit_id: self.id,
            payout_amount: self.payout_amount,
            timestamp: today,
        });
        true
    }

    /// withdraw before maturity at the reduced rate; once the maturity date is
    /// reached the full payout is due instead and this is refused
    pub fn withdraw_early(
        &mut self,
        engine: &EarlyWithdrawalEngine,
        requested: Money,
        today: DateTime<Utc>,
    ) -> Result<EarlyWithdrawalQuote> {
        self.ensure_open()?;
        if self.status == DepositStatus::Matured || self.is_matured(today) {
            return Err(EngineError::DepositNotActive { status: self.status });
        }
        if !requested.is_positive() {
            return Err(EngineError::InvalidAmount { amount: requested });
        }
        if requested > self.principal {
            return Err(EngineError::WithdrawalExceedsPrincipal {
                principal: self.principal,
                requested,
            });
        }

        let quote = self.quote_early_withdrawal(engine, requested, today)?;

        if quote.is_partial {
            // interest on the remainder keeps the locked rate, scaled to the smaller principal
            let remaining = quote.remaining_balance;
            self.interest_accrued = self.interest_accrued * (remaining.as_decimal() / self.principal.as_decimal());
            self.principal = remaining;
            self.payout_amount = self.principal + self.interest_accrued;
            self.set_status(DepositStatus::PartiallyWithdrawn, today);
        } else {
            self.set_status(DepositStatus::Withdrawn, today);
        }

        log::debug!(
            "early withdrawal from deposit {}: {} after {} days, remaining {}",
            self.id,
            quote.total_withdrawal_amount,
            quote.days_elapsed,
            quote.remaining_balance
        );

        self.events.emit(Event::EarlyWithdrawalProcessed {
            deposit_id: self.id,
            amount_withdrawn: quote.total_withdrawal_amount,
            interest_paid: quote.new_interest,
            remaining_balance: quote.remaining_balance,
            days_elapsed: quote.days_elapsed,
            timestamp: today,
        });

        Ok(quote)
    }

    /// close this deposit and place the rolled-over amount as a new one
    pub fn roll_over(
        &mut self,
        calculator: &DepositCalculator,
        options: &RolloverOptions,
        today: DateTime<Utc>,
    ) -> Result<(RolloverQuote, TimeDepositRecord)> {
        self.ensure_open()?;
        if !calculator.supports_term(options.selected_term) {
            return Err(EngineError::InvalidTerm {
                term_months: options.selected_term,
            });
        }
        if options.additional_deposit.is_negative() {
            return Err(EngineError::InvalidAmount {
                amount: options.additional_deposit,
            });
        }

        let rollover = self.quote_rollover(calculator, options, today)?;
        let placement = calculator.quote(rollover.total_amount, options.selected_term, today)?;
        let renewed = Self::from_quote(self.member_id.clone(), &placement);

        self.set_status(DepositStatus::RolledOver, today);
        self.events.emit(Event::DepositRolledOver {
            deposit_id: self.id,
            new_deposit_id: renewed.id,
            total_amount: rollover.total_amount,
            new_interest_rate: rollover.new_interest_rate,
            new_maturity_date: rollover.new_maturity_date,
            timestamp: today,
        });

        Ok((rollover, renewed))
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.status.is_open() {
            Ok(())
        } else {
            Err(EngineError::DepositNotActive { status: self.status })
        }
    }

    fn set_status(&mut self, new_status: DepositStatus, timestamp: DateTime<Utc>) {
        if self.status == new_status {
            return;
        }
        self.events.emit(Event::StatusChanged {
            deposit_id: self.id,
            old_status: self.status,
            new_status,
            timestamp,
        });
        self.status = new_status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn jan_1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn open_deposit(amount: i64, term: u32) -> TimeDepositRecord {
        TimeDepositRecord::open("M-0001", Money::from_major(amount), term, jan_1(), &DepositCalculator::default())
            .unwrap()
    }

    #[test]
    fn test_open_locks_rate_and_emits_event() {
        let deposit = open_deposit(150_000, 12);

        assert_eq!(deposit.status, DepositStatus::Active);
        assert_eq!(deposit.interest_rate.as_decimal(), dec!(0.015));
        assert_eq!(deposit.interest_accrued, Money::from_major(2_250));
        assert_eq!(deposit.payout_amount, Money::from_major(152_250));
        assert_eq!(deposit.start_date, Some(jan_1()));
        assert!(matches!(deposit.events()[0], Event::DepositOpened { term_months: 12, .. }));
    }

    #[test]
    fn test_open_rejects_bad_inputs() {
        let calc = DepositCalculator::default();
        assert!(matches!(
            TimeDepositRecord::open("M-1", Money::ZERO, 6, jan_1(), &calc),
            Err(EngineError::InvalidAmount { .. })
        ));
        assert!(matches!(
            TimeDepositRecord::open("M-1", Money::from_major(10_000), 18, jan_1(), &calc),
            Err(EngineError::InvalidTerm { term_months: 18 })
        ));
    }

    #[test]
    fn test_start_date_derived_from_maturity() {
        let maturity = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let deposit = TimeDepositRecord::existing(
            Uuid::new_v4(),
            "M-0002",
            Money::from_major(20_000),
            6,
            maturity,
            Rate::from_bps(75),
            Money::from_str_exact("74.38").unwrap(),
        );

        assert_eq!(deposit.effective_start_date().unwrap(), jan_1());
        assert_eq!(deposit.payout_amount, Money::from_str_exact("20074.38").unwrap());

        let explicit = deposit.with_start_date(jan_1() + Duration::days(2));
        assert_eq!(explicit.effective_start_date().unwrap(), jan_1() + Duration::days(2));
    }

    #[test]
    fn test_quote_early_withdrawal_full_and_partial() {
        let deposit = open_deposit(50_000, 6);
        let engine = EarlyWithdrawalEngine::default();
        let today = jan_1() + Duration::days(73);

        let full = deposit.quote_early_withdrawal(&engine, deposit.principal, today).unwrap();
        assert!(!full.is_partial);
        assert_eq!(full.days_elapsed, 73);
        assert_eq!(full.remaining_balance, Money::ZERO);
        assert_eq!(full.total_withdrawal_amount, Money::from_major(50_050));

        let partial = deposit.quote_early_withdrawal(&engine, Money::from_major(15_000), today).unwrap();
        assert!(partial.is_partial);
        assert_eq!(partial.remaining_balance, Money::from_major(35_000));
        assert_eq!(partial.new_interest, Money::from_major(15));
    }

    #[test]
    fn test_quote_before_start_counts_zero_days() {
        let deposit = open_deposit(50_000, 6);
        let quote = deposit
            .quote_early_withdrawal(&EarlyWithdrawalEngine::default(), deposit.principal, jan_1() - Duration::days(5))
            .unwrap();

        assert_eq!(quote.days_elapsed, 0);
        assert_eq!(quote.new_interest, Money::ZERO);
    }

    #[test]
    fn test_withdraw_early_partial_keeps_deposit_open() {
        let mut deposit = open_deposit(40_000, 12);
        let engine = EarlyWithdrawalEngine::default();
        let original_interest = deposit.interest_accrued;

        let quote = deposit
            .withdraw_early(&engine, Money::from_major(10_000), jan_1() + Duration::days(30))
            .unwrap();

        assert!(quote.is_partial);
        assert_eq!(deposit.status, DepositStatus::PartiallyWithdrawn);
        assert_eq!(deposit.principal, Money::from_major(30_000));
        assert_eq!(deposit.interest_accrued, Money::from_decimal(original_interest.as_decimal() * dec!(0.75)));
        assert_eq!(deposit.payout_amount, deposit.principal + deposit.interest_accrued);

        // a second, full withdrawal closes it
        let full = deposit
            .withdraw_early(&engine, deposit.principal, jan_1() + Duration::days(60))
            .unwrap();
        assert!(!full.is_partial);
        assert_eq!(deposit.status, DepositStatus::Withdrawn);
        assert!(matches!(
            deposit.withdraw_early(&engine, Money::from_major(1), jan_1() + Duration::days(61)),
            Err(EngineError::DepositNotActive { status: DepositStatus::Withdrawn })
        ));
    }

    #[test]
    fn test_withdraw_early_enforces_bounds() {
        let mut deposit = open_deposit(40_000, 12);
        let engine = EarlyWithdrawalEngine::default();

        assert!(matches!(
            deposit.withdraw_early(&engine, Money::from_major(40_001), jan_1()),
            Err(EngineError::WithdrawalExceedsPrincipal { .. })
        ));
        assert!(matches!(
            deposit.withdraw_early(&engine, Money::ZERO, jan_1()),
            Err(EngineError::InvalidAmount { .. })
        ));
        assert_eq!(deposit.status, DepositStatus::Active);
    }

    #[test]
    fn test_mark_matured() {
        let mut deposit = open_deposit(10_000, 6);

        assert!(!deposit.mark_matured(jan_1() + Duration::days(100)));
        assert_eq!(deposit.days_to_maturity(jan_1() + Duration::days(100)), 82);

        let maturity = deposit.maturity_date;
        assert!(deposit.mark_matured(maturity));
        assert_eq!(deposit.status, DepositStatus::Matured);
        assert!(!deposit.mark_matured(maturity + Duration::days(1)));
        assert!(deposit
            .events()
            .iter()
            .any(|e| matches!(e, Event::DepositMatured { .. })));
    }

    #[test]
    fn test_partially_withdrawn_remainder_matures() {
        let mut deposit = open_deposit(40_000, 6);
        let engine = EarlyWithdrawalEngine::default();
        deposit
            .withdraw_early(&engine, Money::from_major(10_000), jan_1() + Duration::days(30))
            .unwrap();
        assert_eq!(deposit.status, DepositStatus::PartiallyWithdrawn);

        let maturity = deposit.maturity_date;
        assert!(!deposit.mark_matured(maturity - Duration::days(1)));
        assert!(deposit.mark_matured(maturity + Duration::days(1)));
        assert_eq!(deposit.status, DepositStatus::Matured);
        assert!(matches!(
            deposit.events().last(),
            Some(Event::DepositMatured { payout_amount, .. }) if *payout_amount == deposit.payout_amount
        ));
    }

    #[test]
    fn test_withdraw_early_refused_once_matured() {
        let mut deposit = open_deposit(100_000, 12);
        let engine = EarlyWithdrawalEngine::default();
        let maturity = deposit.maturity_date;
        assert_eq!(deposit.payout_amount, Money::from_major(101_500));

        assert!(deposit.mark_matured(maturity));
        assert!(matches!(
            deposit.withdraw_early(&engine, Money::from_major(100_000), maturity + Duration::days(10)),
            Err(EngineError::DepositNotActive { status: DepositStatus::Matured })
        ));
        assert_eq!(deposit.status, DepositStatus::Matured);
        assert_eq!(deposit.principal, Money::from_major(100_000));
        assert_eq!(deposit.payout_amount, Money::from_major(101_500));
    }

    #[test]
    fn test_withdraw_early_refused_past_maturity_date() {
        // never marked matured, but the term has run out
        let mut deposit = open_deposit(100_000, 12);
        let engine = EarlyWithdrawalEngine::default();
        let maturity = deposit.maturity_date;

        assert!(matches!(
            deposit.withdraw_early(&engine, Money::from_major(20_000), maturity),
            Err(EngineError::DepositNotActive { status: DepositStatus::Active })
        ));
        assert_eq!(deposit.status, DepositStatus::Active);
        assert_eq!(deposit.principal, Money::from_major(100_000));

        // the day before maturity is still early
        assert!(deposit
            .withdraw_early(&engine, Money::from_major(20_000), maturity - Duration::days(1))
            .is_ok());
    }

    #[test]
    fn test_terms_follow_configured_schedule() {
        use crate::config::DepositConfig;
        use crate::interest::{RateSchedule, RateTable, RateTier};

        let mut tables = RateSchedule::progressive().tables().to_vec();
        tables.push(RateTable::new(3, vec![RateTier::new(10_000, dec!(0.005))]).unwrap());
        let calc = DepositCalculator::new(DepositConfig {
            rate_schedule: RateSchedule::new(tables).unwrap(),
            ..DepositConfig::default()
        });

        let deposit = TimeDepositRecord::open("M-0003", Money::from_major(20_000), 3, jan_1(), &calc).unwrap();
        assert_eq!(deposit.interest_rate.as_decimal(), dec!(0.005));
        assert_eq!(deposit.maturity_date, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());

        let mut six_month = open_deposit(20_000, 6);
        let maturity = six_month.maturity_date;
        let (_, renewed) = six_month.roll_over(&calc, &RolloverOptions::new(3), maturity).unwrap();
        assert_eq!(renewed.term_months, 3);

        assert!(matches!(
            TimeDepositRecord::open("M-0003", Money::from_major(20_000), 3, jan_1(), &DepositCalculator::default()),
            Err(EngineError::InvalidTerm { term_months: 3 })
        ));
    }

    #[test]
    fn test_roll_over_closes_and_renews() {
        let mut deposit = open_deposit(95_000, 6);
        let calc = DepositCalculator::default();
        let maturity = deposit.maturity_date;
        deposit.mark_matured(maturity);

        let options = RolloverOptions {
            selected_term: 12,
            include_interest: true,
            additional_deposit: Money::from_major(5_000),
        };
        let (quote, renewed) = deposit.roll_over(&calc, &options, maturity).unwrap();

        assert_eq!(quote.total_amount, Money::from_major(100_000) + deposit.interest_accrued);
        assert_eq!(quote.new_interest_rate.as_decimal(), dec!(0.015));
        assert_eq!(deposit.status, DepositStatus::RolledOver);

        assert_eq!(renewed.status, DepositStatus::Active);
        assert_eq!(renewed.principal, quote.total_amount);
        assert_eq!(renewed.interest_rate, quote.new_interest_rate);
        assert_eq!(renewed.maturity_date, quote.new_maturity_date);
        assert_eq!(renewed.maturity_date.year(), 2025);
        assert_ne!(renewed.id, deposit.id);

        assert!(matches!(
            deposit.roll_over(&calc, &options, maturity),
            Err(EngineError::DepositNotActive { .. })
        ));
    }

    #[test]
    fn test_roll_over_rejects_unsupported_term() {
        let mut deposit = open_deposit(95_000, 6);
        let options = RolloverOptions {
            selected_term: 24,
            include_interest: false,
            additional_deposit: Money::ZERO,
        };

        assert!(matches!(
            deposit.roll_over(&DepositCalculator::default(), &options, jan_1()),
            Err(EngineError::InvalidTerm { term_months: 24 })
        ));
        assert_eq!(deposit.status, DepositStatus::Active);
    }
}
