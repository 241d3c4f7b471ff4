pub mod sack_limit;
pub mod validation;

pub use sack_limit::SackLimitRule;
pub use validation::{
    cash_loan_ceiling, validate_capped_loan, validate_loan_request, CommodityLoanAssessment,
    CommodityLoanRequest, LoanValidation,
};
