use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// internal precision kept on every monetary value
const MONEY_DP: u32 = 8;

/// peso amount; carries 8 decimal places internally, rounded to centavos for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_DP)))
    }

    /// create from whole pesos
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from centavos
    pub fn from_centavos(amount: i64) -> Self {
        Money(Decimal::new(amount, 2))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half away from zero to the centavo, the way amounts are shown to members
    pub fn round_currency(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// clamp into `[low, high]`
    pub fn clamp(self, low: Self, high: Self) -> Self {
        self.max(low).min(high)
    }

    /// price times a whole number of units (sacks, bags)
    pub fn times_units(&self, units: u32) -> Self {
        Money((self.0 * Decimal::from(units)).round_dp(MONEY_DP))
    }

    /// simple interest: `self * annual_rate * days / year_basis`
    pub fn simple_interest(&self, annual_rate: Rate, days: u32, year_basis: u32) -> Self {
        if year_basis == 0 {
            return Money::ZERO;
        }
        let interest = self.0 * annual_rate.as_decimal() * Decimal::from(days)
            / Decimal::from(year_basis);
        Money(interest.round_dp(MONEY_DP))
    }

    /// apply a proportion (e.g. a loan percentage of 0.8)
    pub fn portion(&self, ratio: Rate) -> Self {
        Money((self.0 * ratio.as_decimal()).round_dp(MONEY_DP))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PHP {}", self.round_currency().0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(MONEY_DP))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(MONEY_DP);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(MONEY_DP))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(MONEY_DP);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(MONEY_DP))
    }
}

/// annualized rate or ratio as a plain decimal (0.015 = 1.5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// create from decimal (e.g., 0.0075 for 0.75%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from whole percentage (e.g., 80 for 80%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from basis points (e.g., 75 for 0.75%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.as_decimal(), dec!(100.12345679));
    }

    #[test]
    fn test_currency_rounding_is_half_up() {
        assert_eq!(Money::from_decimal(dec!(10.125)).round_currency(), Money::from_centavos(1013));
        assert_eq!(Money::from_decimal(dec!(10.124)).round_currency(), Money::from_centavos(1012));
        assert_eq!(Money::from_decimal(dec!(37.19178082)).to_string(), "PHP 37.19");
    }

    #[test]
    fn test_simple_interest() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_bps(75);

        let interest = principal.simple_interest(rate, 181, 365);
        assert_eq!(interest.round_currency(), Money::from_centavos(3719));

        assert_eq!(principal.simple_interest(rate, 181, 0), Money::ZERO);
    }

    #[test]
    fn test_times_units_and_portion() {
        let price = Money::from_major(1_250);
        assert_eq!(price.times_units(12), Money::from_major(15_000));
        assert_eq!(
            Money::from_major(15_000).portion(Rate::from_percentage(80)),
            Money::from_major(12_000)
        );
    }

    #[test]
    fn test_sign_checks() {
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert!(Money::from_major(-1).is_negative());
        assert_eq!(
            Money::from_major(150).clamp(Money::ZERO, Money::from_major(100)),
            Money::from_major(100)
        );
    }

    #[test]
    fn test_rate_constructors() {
        assert_eq!(Rate::from_bps(75).as_decimal(), dec!(0.0075));
        assert_eq!(Rate::from_percentage(5).as_decimal(), dec!(0.05));
        assert_eq!(Rate::from_decimal(dec!(0.0325)).to_string(), "3.25%");
    }
}
