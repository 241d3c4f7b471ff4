use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::types::{REQUIRED_TERMS, SIX_MONTHS, TWELVE_MONTHS};

/// one step of a tiered rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTier {
    /// minimum principal at which `rate` applies
    pub threshold: Money,
    pub rate: Rate,
}

impl RateTier {
    pub fn new(threshold: i64, rate: Decimal) -> Self {
        Self {
            threshold: Money::from_major(threshold),
            rate: Rate::from_decimal(rate),
        }
    }
}

/// ascending tier table for a single term length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    term_months: u32,
    tiers: Vec<RateTier>,
}

impl RateTable {
    /// create a table; tiers must be strictly ascending by threshold
    pub fn new(term_months: u32, tiers: Vec<RateTier>) -> Result<Self> {
        let table = Self { term_months, tiers };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(EngineError::InvalidConfiguration {
                message: format!("rate table for {} months has no tiers", self.term_months),
            });
        }

        for tier in &self.tiers {
            if tier.threshold.is_negative() || tier.rate.as_decimal() < Decimal::ZERO {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "rate table for {} months has a negative tier ({} at {})",
                        self.term_months, tier.rate, tier.threshold
                    ),
                });
            }
        }

        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].threshold >= pair[1].threshold)
        {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "rate table for {} months is not strictly ascending",
                    self.term_months
                ),
            });
        }

        Ok(())
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// smallest principal that earns any interest
    pub fn minimum_threshold(&self) -> Money {
        self.tiers.first().map(|t| t.threshold).unwrap_or(Money::ZERO)
    }

    /// rate of the greatest threshold not exceeding `principal`, zero below the first tier
    pub fn lookup(&self, principal: Money) -> Rate {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.threshold <= principal)
            .map(|tier| tier.rate)
            .unwrap_or(Rate::ZERO)
    }
}

/// named rate schedules; the 500k and 1M+ tiers differ between the two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateScheduleKind {
    /// top tiers keep climbing (6 mo: 3.25% / 3.5%, 12 mo: 4%)
    Progressive,
    /// 6 mo tiers stop at 2.5%, 12 mo 1M+ tier jumps to 6%
    FlatTop,
}

/// set of rate tables, one per offered term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSchedule {
    tables: Vec<RateTable>,
}

impl RateSchedule {
    pub fn new(tables: Vec<RateTable>) -> Result<Self> {
        let schedule = Self { tables };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn from_kind(kind: RateScheduleKind) -> Self {
        match kind {
            RateScheduleKind::Progressive => Self::progressive(),
            RateScheduleKind::FlatTop => Self::flat_top(),
        }
    }

    pub fn progressive() -> Self {
        Self {
            tables: vec![
                RateTable {
                    term_months: SIX_MONTHS,
                    tiers: six_month_base_tiers(dec!(0.0325), dec!(0.035)),
                },
                RateTable {
                    term_months: TWELVE_MONTHS,
                    tiers: twelve_month_base_tiers(dec!(0.04)),
                },
            ],
        }
    }

    pub fn flat_top() -> Self {
        Self {
            tables: vec![
                RateTable {
                    term_months: SIX_MONTHS,
                    tiers: six_month_base_tiers(dec!(0.025), dec!(0.025)),
                },
                RateTable {
                    term_months: TWELVE_MONTHS,
                    tiers: twelve_month_base_tiers(dec!(0.06)),
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (i, table) in self.tables.iter().enumerate() {
            table.validate()?;
            if self.tables[..i]
                .iter()
                .any(|other| other.term_months == table.term_months)
            {
                return Err(EngineError::InvalidConfiguration {
                    message: format!("duplicate rate table for {} months", table.term_months),
                });
            }
        }
        if let Some(missing) = REQUIRED_TERMS.iter().find(|&&term| !self.supports_term(term)) {
            return Err(EngineError::InvalidConfiguration {
                message: format!("missing rate table for {} months", missing),
            });
        }
        Ok(())
    }

    /// terms that can be opened or rolled into are exactly the ones with a table
    pub fn supports_term(&self, term_months: u32) -> bool {
        self.table_for(term_months).is_some()
    }

    pub fn table_for(&self, term_months: u32) -> Option<&RateTable> {
        self.tables.iter().find(|t| t.term_months == term_months)
    }

    pub fn tables(&self) -> &[RateTable] {
        &self.tables
    }

    /// annual rate for a principal and term; unsupported terms and negative amounts give zero
    pub fn rate_for(&self, term_months: u32, principal: Money) -> Rate {
        match self.table_for(term_months) {
            Some(table) => table.lookup(principal),
            None => {
                log::warn!("no rate table for {} month term, using zero rate", term_months);
                Rate::ZERO
            }
        }
    }

    /// strict lookup that rejects unknown terms and negative principals
    pub fn try_rate_for(&self, term_months: u32, principal: Money) -> Result<Rate> {
        if principal.is_negative() {
            return Err(EngineError::InvalidAmount { amount: principal });
        }
        self.table_for(term_months)
            .map(|table| table.lookup(principal))
            .ok_or(EngineError::InvalidTerm { term_months })
    }
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self::progressive()
    }
}

fn six_month_base_tiers(half_million: Decimal, million: Decimal) -> Vec<RateTier> {
    vec![
        RateTier::new(10_000, dec!(0.0075)),
        RateTier::new(100_000, dec!(0.01)),
        RateTier::new(200_000, dec!(0.0175)),
        RateTier::new(300_000, dec!(0.0225)),
        RateTier::new(400_000, dec!(0.025)),
        RateTier::new(500_000, half_million),
        RateTier::new(1_000_000, million),
    ]
}

fn twelve_month_base_tiers(million: Decimal) -> Vec<RateTier> {
    vec![
        RateTier::new(10_000, dec!(0.01)),
        RateTier::new(100_000, dec!(0.015)),
        RateTier::new(200_000, dec!(0.02)),
        RateTier::new(300_000, dec!(0.0275)),
        RateTier::new(400_000, dec!(0.03)),
        RateTier::new(500_000, dec!(0.0325)),
        RateTier::new(1_000_000, million),
    ]
}
