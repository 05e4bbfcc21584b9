use serde::{Deserialize, Serialize};
use std::fmt;

// Scaling factor for fixed-point arithmetic
// Using 10000 for easy decimal representation (4 decimal places)
pub const SCALE: i64 = 10_000;
pub const HALF_CENT: i64 = SCALE / 200;

/// Signed chip amount with 4 decimal places of precision.
///
/// Bankrolls may go negative only through external adjustment; the table never
/// debits past zero. Ratios are applied with 128-bit intermediates so casino
/// payouts such as 7:6 on $24 or 6:5 on $25 come out exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create from a whole number of dollars
    pub const fn from_int(value: i64) -> Self {
        Money(value.saturating_mul(SCALE))
    }

    /// Create from cents
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(SCALE / 100))
    }

    /// Create from the raw scaled value
    pub const fn from_raw(raw: i64) -> Self {
        Money(raw)
    }

    /// Convert from a float, rounding to the nearest ten-thousandth
    pub fn from_f64(value: f64) -> Self {
        Money((value * SCALE as f64).round() as i64)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Get the raw scaled value
    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by `numerator / denominator`, truncating toward zero.
    pub fn mul_ratio(self, numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Money::ZERO;
        }
        let scaled = (self.0 as i128) * (numerator as i128) / (denominator as i128);
        Money(scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiply by a whole number.
    pub fn times(self, factor: u32) -> Self {
        Money(self.0.saturating_mul(factor as i64))
    }

    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    /// Rounded to the nearest cent (half away from zero).
    fn cents(self) -> i64 {
        let unit = SCALE / 100;
        if self.0 >= 0 {
            self.0.saturating_add(HALF_CENT) / unit
        } else {
            self.0.saturating_sub(HALF_CENT) / unit
        }
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Money::from_f64(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.to_f64()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl std::ops::Sub for Money {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl std::ops::Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, value| acc + value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_int() {
        assert_eq!(Money::from_int(5).raw(), 50_000);
        assert_eq!(Money::from_int(-3).raw(), -30_000);
    }

    #[test]
    fn test_from_cents_and_float() {
        assert_eq!(Money::from_cents(2850), Money::from_f64(28.5));
        assert_eq!(Money::from_f64(0.3333).raw(), 3333);
        assert_eq!(Money::from(12.25).to_f64(), 12.25);
    }

    #[test]
    fn test_mul_ratio_exact() {
        // 7:6 on $24
        assert_eq!(Money::from_int(24).mul_ratio(7, 6), Money::from_int(28));
        // 6:5 on $25
        assert_eq!(Money::from_int(25).mul_ratio(6, 5), Money::from_int(30));
        // 1:2 on $20
        assert_eq!(Money::from_int(20).mul_ratio(1, 2), Money::from_int(10));
        // 5% of $30
        assert_eq!(Money::from_int(30).mul_ratio(500, 10_000), Money::from_cents(150));
    }

    #[test]
    fn test_mul_ratio_truncates() {
        // 2:3 on $10 = 6.6666...
        assert_eq!(Money::from_int(10).mul_ratio(2, 3).raw(), 66_666);
        assert_eq!(Money::from_int(10).mul_ratio(1, 0), Money::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2850).to_string(), "$28.50");
        assert_eq!(Money::from_int(-5).to_string(), "-$5.00");
        assert_eq!(Money::from_raw(66_666).to_string(), "$6.67");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_display_saturated() {
        let huge = Money::from_f64(1e300);
        assert_eq!(huge, Money::from_raw(i64::MAX));
        assert_eq!(huge.to_string(), "$922337203685477.58");
        assert_eq!(
            Money::from_raw(i64::MIN).to_string(),
            "-$922337203685477.58"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_int(10);
        let b = Money::from_int(3);
        assert_eq!(a + b, Money::from_int(13));
        assert_eq!(a - b, Money::from_int(7));
        assert_eq!(-a, Money::from_int(-10));
        assert_eq!(b.times(4), Money::from_int(12));
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_int(16));
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_int(10);
        let b = Money::from_int(5);
        assert!(a > b);
        assert_eq!(a.max(b), a);
        assert!(b.is_positive());
        assert!((-b).is_negative());
    }
}
