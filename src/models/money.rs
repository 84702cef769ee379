//! Money type for currency amounts
//!
//! Amounts are integer cents. Budget scaling and per-day division go through
//! the rounding helpers here so every view rounds the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted for budgets, transactions, goals and income
    pub const MAX: Money = Money::from_units(1_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finbud::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when the magnitude is above [`Money::MAX`]
    pub const fn exceeds_max(&self) -> bool {
        self.0.unsigned_abs() > Self::MAX.0.unsigned_abs()
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Amount as a floating point number of units, for display and CSV
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by `numerator / denominator`, rounding half away from zero
    ///
    /// A zero denominator yields zero. Results past the `i64` range saturate.
    pub fn scale(&self, numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Self::zero();
        }
        let scaled = div_round(
            i128::from(self.0) * i128::from(numerator),
            i128::from(denominator),
        );
        Self(saturate(scaled))
    }

    /// Round to whole currency units, half away from zero
    pub fn round_to_units(&self) -> Self {
        Self(saturate(div_round(i128::from(self.0), 100) * 100))
    }

    /// Split evenly into `parts`, rounding half away from zero
    pub fn divide(&self, parts: i64) -> Self {
        self.scale(1, parts)
    }

    /// This amount as a percentage of `whole`; zero when `whole` is zero
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64 * 100.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "10" and "10.5".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        let (negative, rest) = match raw.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, raw),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        if rest.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (rest, None),
        };

        if whole.is_empty() && fraction.map_or(true, str::is_empty) {
            return Err(invalid());
        }
        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            if !whole.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            whole.parse().map_err(|_| invalid())?
        };

        let cents = match fraction {
            None | Some("") => 0,
            Some(f) if !f.chars().all(|c| c.is_ascii_digit()) => return Err(invalid()),
            Some(f) if f.len() == 1 => f.parse::<i64>().map_err(|_| invalid())? * 10,
            Some(f) => f[..2].parse::<i64>().map_err(|_| invalid())?,
        };

        let total = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol other than `$`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, self.units().abs(), self.cents_part())
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn div_round(value: i128, divisor: i128) -> i128 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.abs() * 2 >= divisor.abs() {
        if (value < 0) != (divisor < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-5000).to_string(), "-$50.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("12x").is_err());
    }

    #[test]
    fn test_scale_quarter_rounds_half_away_from_zero() {
        assert_eq!(Money::from_units(400).scale(1, 4), Money::from_units(100));
        assert_eq!(Money::from_cents(10).scale(1, 4).cents(), 3); // 2.5 -> 3
        assert_eq!(Money::from_cents(-10).scale(1, 4).cents(), -3);
        assert_eq!(Money::from_cents(9).scale(1, 4).cents(), 2); // 2.25 -> 2
        assert_eq!(Money::from_units(400).scale(4, 1), Money::from_units(1600));
    }

    #[test]
    fn test_scale_by_zero_denominator_is_zero() {
        assert_eq!(Money::from_units(100).scale(1, 0), Money::zero());
    }

    #[test]
    fn test_divide() {
        assert_eq!(Money::from_units(350).divide(7), Money::from_units(50));
        assert_eq!(Money::from_cents(100).divide(3).cents(), 33);
        assert_eq!(Money::from_cents(200).divide(3).cents(), 67);
    }

    #[test]
    fn test_round_to_units() {
        assert_eq!(Money::from_cents(12_350).round_to_units(), Money::from_units(124));
        assert_eq!(Money::from_cents(12_349).round_to_units(), Money::from_units(123));
        assert_eq!(Money::from_cents(-250).round_to_units(), Money::from_units(-3));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(Money::from_units(50).percent_of(Money::from_units(400)), 12.5);
        assert_eq!(Money::from_units(50).percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!((huge + Money::from_cents(10)).cents(), i64::MAX);
        assert_eq!((-huge - Money::from_cents(10)).cents(), i64::MIN);
        assert_eq!(huge.scale(4, 1).cents(), i64::MAX);
        assert_eq!(huge.checked_add(Money::from_cents(10)), None);
        assert_eq!(
            Money::parse("30000000000000000").unwrap().scale(4, 1).cents(),
            i64::MAX
        );
    }

    #[test]
    fn test_exceeds_max() {
        assert!(!Money::MAX.exceeds_max());
        assert!((Money::MAX + Money::from_cents(1)).exceeds_max());
        assert!((-Money::MAX - Money::from_cents(1)).exceeds_max());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "1050");
    }
}
