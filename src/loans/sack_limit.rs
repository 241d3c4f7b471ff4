use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::LoanType;

/// share capital below which feeds loans are not granted under the per-commodity rule
const LOWER_CAPITAL: i64 = 6_000;
/// share capital at which the top sack limit applies
const UPPER_CAPITAL: i64 = 20_000;

const FEEDS_MAX_SACKS: u32 = 15;
const TOP_SACKS: u32 = 30;
const MIDDLE_SACKS: u32 = 4;
const BASE_SACKS: u32 = 2;

/// how share capital maps to a sack limit.
///
/// The loan application screen and the form transformer disagree, so both
/// rules are kept and selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SackLimitRule {
    /// one three-step table for every commodity: 30 / 4 / 2 sacks
    Uniform,
    /// feeds scale linearly from 0 to 15 sacks between 6,000 and 20,000;
    /// rice uses the three-step table
    PerCommodity,
}

impl SackLimitRule {
    /// maximum sacks a member may borrow; cash loans are not sack based and get zero
    pub fn sack_limit(&self, share_capital: Money, loan_type: LoanType) -> u32 {
        if !loan_type.is_commodity() {
            return 0;
        }

        match (self, loan_type) {
            (SackLimitRule::PerCommodity, LoanType::Feeds) => feeds_interpolated(share_capital),
            _ => stepped(share_capital),
        }
    }
}

/// 30 sacks at 20,000 and above, 4 from 6,000, otherwise 2
fn stepped(share_capital: Money) -> u32 {
    if share_capital >= Money::from_major(UPPER_CAPITAL) {
        TOP_SACKS
    } else if share_capital >= Money::from_major(LOWER_CAPITAL) {
        MIDDLE_SACKS
    } else {
        BASE_SACKS
    }
}

/// floor((capital - 6,000) / 14,000 * 15), bounded to 0..=15
fn feeds_interpolated(share_capital: Money) -> u32 {
    if share_capital < Money::from_major(LOWER_CAPITAL) {
        return 0;
    }
    if share_capital >= Money::from_major(UPPER_CAPITAL) {
        return FEEDS_MAX_SACKS;
    }

    // multiply before dividing so exact boundaries floor correctly
    let above_floor = share_capital.as_decimal() - Decimal::from(LOWER_CAPITAL);
    let span = Decimal::from(UPPER_CAPITAL - LOWER_CAPITAL);
    let sacks = (above_floor * Decimal::from(FEEDS_MAX_SACKS) / span).floor();

    sacks.to_u32().unwrap_or(0).min(FEEDS_MAX_SACKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital(amount: i64) -> Money {
        Money::from_major(amount)
    }

    #[test]
    fn test_rice_steps() {
        let rule = SackLimitRule::PerCommodity;
        assert_eq!(rule.sack_limit(capital(25_000), LoanType::Rice), 30);
        assert_eq!(rule.sack_limit(capital(20_000), LoanType::Rice), 30);
        assert_eq!(rule.sack_limit(capital(19_999), LoanType::Rice), 4);
        assert_eq!(rule.sack_limit(capital(6_000), LoanType::Rice), 4);
        assert_eq!(rule.sack_limit(capital(5_000), LoanType::Rice), 2);
        assert_eq!(rule.sack_limit(Money::ZERO, LoanType::Rice), 2);
    }

    #[test]
    fn test_feeds_interpolation() {
        let rule = SackLimitRule::PerCommodity;
        assert_eq!(rule.sack_limit(capital(5_999), LoanType::Feeds), 0);
        assert_eq!(rule.sack_limit(capital(6_000), LoanType::Feeds), 0);
        assert_eq!(rule.sack_limit(capital(13_000), LoanType::Feeds), 7);
        assert_eq!(rule.sack_limit(capital(19_999), LoanType::Feeds), 14);
        assert_eq!(rule.sack_limit(capital(20_000), LoanType::Feeds), 15);
        assert_eq!(rule.sack_limit(capital(100_000), LoanType::Feeds), 15);
    }

    #[test]
    fn test_feeds_interpolation_exact_boundary() {
        // 6,000 + 14,000 * 2 / 15 lands exactly on 2 sacks
        let amount = Money::from_str_exact("7866.66666667").unwrap();
        assert_eq!(feeds_interpolated(amount), 2);

        let just_below = Money::from_str_exact("7866.66").unwrap();
        assert_eq!(feeds_interpolated(just_below), 1);
    }

    #[test]
    fn test_uniform_rule_ignores_commodity() {
        let rule = SackLimitRule::Uniform;
        for loan_type in [LoanType::Feeds, LoanType::Rice] {
            assert_eq!(rule.sack_limit(capital(20_000), loan_type), 30);
            assert_eq!(rule.sack_limit(capital(6_000), loan_type), 4);
            assert_eq!(rule.sack_limit(capital(1_000), loan_type), 2);
        }
    }

    #[test]
    fn test_rules_diverge_for_feeds() {
        let share_capital = capital(25_000);
        assert_eq!(SackLimitRule::Uniform.sack_limit(share_capital, LoanType::Feeds), 30);
        assert_eq!(SackLimitRule::PerCommodity.sack_limit(share_capital, LoanType::Feeds), 15);
    }

    #[test]
    fn test_cash_loans_have_no_sack_limit() {
        for rule in [SackLimitRule::Uniform, SackLimitRule::PerCommodity] {
            assert_eq!(rule.sack_limit(capital(50_000), LoanType::Marketing), 0);
            assert_eq!(rule.sack_limit(capital(50_000), LoanType::BackToBack), 0);
        }
    }
}
