use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{DepositStatus, LoanType};

/// operational errors raised by the engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("unsupported deposit term: {term_months} months")]
    InvalidTerm {
        term_months: u32,
    },

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("time deposit does not accept this operation: status {status:?} or term already ended")]
    DepositNotActive {
        status: DepositStatus,
    },

    #[error("withdrawal exceeds principal: principal {principal}, requested {requested}")]
    WithdrawalExceedsPrincipal {
        principal: Money,
        requested: Money,
    },

    #[error("operation not supported for {loan_type:?} loans")]
    UnsupportedLoanType {
        loan_type: LoanType,
    },

    #[error("loan request rejected: {0}")]
    LoanRejected(#[from] LoanValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// advisory validation failures shown to the member before a loan is submitted
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanValidationError {
    #[error("loan amount must be greater than zero")]
    ZeroAmount,

    #[error("loan amount {requested} exceeds the limit of {limit}")]
    ExceedsLimit {
        limit: Money,
        requested: Money,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
