use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};
use crate::types::{SIX_MONTHS, TWELVE_MONTHS};

/// denominator for every annual rate the cooperative quotes
pub const YEAR_BASIS: u32 = 365;

/// how many days of interest a deposit term earns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCountConvention {
    /// 181 days for six months, 365 for twelve, regardless of the calendar
    #[default]
    FixedTerm,
    /// actual calendar days from placement to maturity
    Actual365,
}

impl DayCountConvention {
    /// days of interest between `start` and `maturity` for a term
    pub fn term_days(
        &self,
        term_months: u32,
        start: DateTime<Utc>,
        maturity: DateTime<Utc>,
    ) -> u32 {
        match self {
            DayCountConvention::FixedTerm => fixed_term_days(term_months),
            DayCountConvention::Actual365 => days_between(start, maturity),
        }
    }
}

/// fixed day count per term
pub fn fixed_term_days(term_months: u32) -> u32 {
    match term_months {
        SIX_MONTHS => 181,
        TWELVE_MONTHS => 365,
        // no table exists for other terms, so the rate is zero anyway
        other => other.saturating_mul(30),
    }
}

/// whole days from `start` to `end`, zero when `end` is earlier
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let days = (end - start).num_days();
    if days <= 0 {
        0
    } else {
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// calendar month addition; the day clamps to the end of a shorter month
pub fn add_months(date: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| EngineError::InvalidDate {
            message: format!("{} plus {} months is out of range", date, months),
        })
}

/// calendar month subtraction; the day clamps to the end of a shorter month
pub fn sub_months(date: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| EngineError::InvalidDate {
            message: format!("{} minus {} months is out of range", date, months),
        })
}
