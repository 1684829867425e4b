use crate::core::errors::{FieldError, LedgerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Minor units per major unit (cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Fixed-point currency amount stored as integer minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// `major` must lie within `i64::MIN / 100 ..= i64::MAX / 100`; use
    /// [`Money::try_from_major`] for values that are not known to fit.
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    pub fn try_from_major(field: &str, major: i64) -> Result<Money, LedgerError> {
        major
            .checked_mul(MINOR_PER_MAJOR)
            .map(Money)
            .ok_or_else(|| LedgerError::AmountOverflow(field.to_string()))
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Saturates at `i64::MAX` for the most negative amount.
    pub fn abs(self) -> Self {
        Money(self.0.saturating_abs())
    }

    pub fn checked_abs(self) -> Option<Money> {
        self.0.checked_abs().map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Sums amounts, failing with `AmountOverflow` tagged by `context`.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(context: &str, amounts: I) -> Result<Money, LedgerError> {
        amounts.into_iter().try_fold(Money::ZERO, |acc, m| {
            acc.checked_add(m)
                .ok_or_else(|| LedgerError::AmountOverflow(context.to_string()))
        })
    }

    pub fn signum(self) -> i64 {
        self.0.signum()
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Exact division into `parts` shares. Returns `(share, remainder)` where
    /// `share * parts + remainder == self` and `0 <= remainder < parts` for
    /// non-negative amounts. `parts` must be non-zero.
    pub fn split_evenly(self, parts: usize) -> (Money, Money) {
        let parts = parts.max(1) as i64;
        let share = self.0.div_euclid(parts);
        let remainder = self.0.rem_euclid(parts);
        (Money(share), Money(remainder))
    }

    /// Parses a major-unit decimal string such as `"12.34"` or `"-5"`.
    pub fn parse_major(field: &str, input: &str) -> Result<Money, LedgerError> {
        let invalid = |description: &str| {
            LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", description),
            )
        };

        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("Amount must be a decimal number"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("Amount must be a decimal number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("Amount cannot have more than 2 decimal places"));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| invalid("Amount is out of range"))?;
        let mut cents: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| invalid("Amount must be a decimal number"))?
        };
        if fraction.len() == 1 {
            cents *= 10;
        }

        let minor = whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(cents))
            .ok_or_else(|| invalid("Amount is out of range"))?;
        Ok(Money(if negative { -minor } else { minor }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{}{}.{:02}", sign, abs / per, abs % per)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_two_decimals() {
        assert_eq!(Money::from_minor(1205).to_string(), "12.05");
        assert_eq!(Money::from_minor(-7).to_string(), "-0.07");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn split_evenly_keeps_remainder() {
        let (share, rem) = Money::from_minor(100).split_evenly(3);
        assert_eq!(share, Money::from_minor(33));
        assert_eq!(rem, Money::from_minor(1));

        let (share, rem) = Money::from_major(90).split_evenly(3);
        assert_eq!(share, Money::from_major(30));
        assert!(rem.is_zero());
    }

    #[test]
    fn parse_major_accepts_cents() {
        assert_eq!(Money::parse_major("amount", "12.34").unwrap(), Money::from_minor(1234));
        assert_eq!(Money::parse_major("amount", "12.5").unwrap(), Money::from_minor(1250));
        assert_eq!(Money::parse_major("amount", "-3").unwrap(), Money::from_minor(-300));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::from_minor(i64::MAX);
        assert_eq!(max.checked_add(Money::from_minor(1)), None);
        assert_eq!(Money::from_minor(i64::MIN).checked_sub(Money::from_minor(1)), None);
        assert_eq!(Money::from_minor(i64::MIN).checked_abs(), None);
        assert_eq!(Money::from_minor(i64::MIN).abs(), max);
        assert_eq!(
            Money::checked_sum("total", [max, Money::from_minor(1)]),
            Err(LedgerError::AmountOverflow("total".to_string()))
        );
        assert_eq!(
            Money::checked_sum("total", [max, Money::from_minor(-1), Money::from_minor(1)]),
            Ok(max)
        );
    }

    #[test]
    fn try_from_major_checks_range() {
        assert_eq!(Money::try_from_major("amount", 12).unwrap(), Money::from_minor(1200));
        assert!(matches!(
            Money::try_from_major("amount", i64::MAX / 10),
            Err(LedgerError::AmountOverflow(_))
        ));
    }

    #[test]
    fn parse_major_rejects_bad_input() {
        assert!(Money::parse_major("amount", "1.234").is_err());
        assert!(Money::parse_major("amount", "abc").is_err());
        assert!(Money::parse_major("amount", ".5").is_err());
        assert!(Money::parse_major("amount", "1.x").is_err());
    }
}
