pub mod calculator;
pub mod record;
pub mod rollover;

pub use calculator::{DepositCalculator, DepositQuote};
pub use record::TimeDepositRecord;
pub use rollover::{RolloverOptions, RolloverQuote};
