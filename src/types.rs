use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a time deposit record
pub type DepositId = Uuid;

/// six month time deposit term
pub const SIX_MONTHS: u32 = 6;
/// twelve month time deposit term
pub const TWELVE_MONTHS: u32 = 12;

/// terms every rate schedule must carry a table for
pub const REQUIRED_TERMS: [u32; 2] = [SIX_MONTHS, TWELVE_MONTHS];

/// time deposit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// funds placed, term running
    Active,
    /// term ended, payout due
    Matured,
    /// closed early with reduced interest
    Withdrawn,
    /// part of the principal withdrawn early, remainder still placed
    PartiallyWithdrawn,
    /// closed and renewed into a new record
    RolledOver,
}

impl DepositStatus {
    /// whether rollover may still be applied; early withdrawal additionally needs the term running
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            DepositStatus::Active | DepositStatus::Matured | DepositStatus::PartiallyWithdrawn
        )
    }
}

/// loan products offered to members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// feed sacks, limited by share capital
    Feeds,
    /// rice sacks, limited by share capital
    Rice,
    /// cash loan with a fixed ceiling
    Marketing,
    /// cash loan secured by the member's share capital
    BackToBack,
}

impl LoanType {
    /// commodity loans are sized in sacks
    pub fn is_commodity(&self) -> bool {
        matches!(self, LoanType::Feeds | LoanType::Rice)
    }
}
