pub mod config;
pub mod decimal;
pub mod deposits;
pub mod engine;
pub mod errors;
pub mod events;
pub mod interest;
pub mod loans;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{DepositConfig, EngineConfig, LoanConfig};
pub use decimal::{Money, Rate};
pub use deposits::{DepositCalculator, DepositQuote, RolloverOptions, RolloverQuote, TimeDepositRecord};
pub use engine::FinancialEngine;
pub use errors::{EngineError, LoanValidationError, Result};
pub use events::{Event, EventStore};
pub use interest::{
    DayCountConvention, EarlyWithdrawalConfig, EarlyWithdrawalEngine, EarlyWithdrawalQuote,
    RateSchedule, RateScheduleKind, RateTable, RateTier,
};
pub use loans::{CommodityLoanAssessment, CommodityLoanRequest, LoanValidation, SackLimitRule};
pub use serialization::DepositView;
pub use types::{DepositId, DepositStatus, LoanType, SIX_MONTHS, TWELVE_MONTHS};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
