//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Using i64 cents keeps sums exact, so grouped totals always add up to the
/// ungrouped total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted from text or decimal input (one trillion)
    pub const MAX: Self = Self(100_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use spendboard::models::Money;
    /// let amount = Money::from_cents(8550); // 85.50
    /// assert_eq!(amount.to_string(), "85.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a decimal value, rounded to the nearest cent
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a decimal value (for charts and exports)
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide into `parts` equal shares, rounded to the nearest cent
    /// (half away from zero). Returns zero when `parts` is zero.
    pub fn divide_rounded(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self::zero();
        }
        let parts = parts as i64;
        let half = parts / 2;
        let rounded = if self.0 >= 0 {
            (self.0 + half) / parts
        } else {
            (self.0 - half) / parts
        };
        Self(rounded)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "€10.50", "$10.50", "10", ".5".
    /// Digits past the cent are allowed only when they are zeros.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let parsed = ParsedAmount::scan(s)?;
        if parsed.sub_cent {
            return Err(MoneyParseError::TooPrecise(s.trim().to_string()));
        }
        Ok(parsed.to_money(Rounding::Down))
    }

    /// Parse a money amount, rounding sub-cent digits in the given direction
    ///
    /// ```
    /// use spendboard::models::{Money, Rounding};
    /// assert_eq!(Money::parse_rounded("85.501", Rounding::Up).unwrap().cents(), 8551);
    /// assert_eq!(Money::parse_rounded("85.509", Rounding::Down).unwrap().cents(), 8550);
    /// ```
    pub fn parse_rounded(s: &str, rounding: Rounding) -> Result<Self, MoneyParseError> {
        Ok(ParsedAmount::scan(s)?.to_money(rounding))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

/// Direction for amounts that fall between two cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward negative infinity
    Down,
    /// Toward positive infinity
    Up,
}

/// Sign, whole cents and whether anything non-zero followed the cents
struct ParsedAmount {
    negative: bool,
    cents: i64,
    sub_cent: bool,
}

impl ParsedAmount {
    fn scan(raw: &str) -> Result<Self, MoneyParseError> {
        let s = raw.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        // Remove currency symbol if present
        let s = s
            .strip_prefix('€')
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(raw.trim().to_string()));
        }

        let (units_str, fraction) = s.split_once('.').unwrap_or((s, ""));
        let units = if units_str.is_empty() {
            0
        } else {
            parse_digits(units_str)?
        };

        if !fraction.is_empty() && !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(raw.trim().to_string()));
        }
        let (cent_digits, rest) = fraction.split_at(fraction.len().min(2));
        let cents = match cent_digits.len() {
            0 => 0,
            1 => parse_digits(cent_digits)? * 10,
            _ => parse_digits(cent_digits)?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|whole| whole.checked_add(cents))
            .filter(|total| *total <= Money::MAX.0)
            .ok_or_else(|| MoneyParseError::OutOfRange(raw.trim().to_string()))?;

        Ok(Self {
            negative,
            cents,
            sub_cent: rest.bytes().any(|b| b != b'0'),
        })
    }

    fn to_money(&self, rounding: Rounding) -> Money {
        // Truncation already moved the magnitude toward zero
        let away_from_zero = self.sub_cent
            && match rounding {
                Rounding::Up => !self.negative,
                Rounding::Down => self.negative,
            };
        let magnitude = if away_from_zero {
            self.cents + 1
        } else {
            self.cents
        };
        Money(if self.negative { -magnitude } else { magnitude })
    }
}

fn parse_digits(s: &str) -> Result<i64, MoneyParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyParseError::InvalidFormat(s.to_string()));
    }
    s.parse()
        .map_err(|_| MoneyParseError::OutOfRange(s.to_string()))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Serde helpers for amounts written as decimal numbers (`85.5`) rather than
/// cents. Used by record files and exports.
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        if value.abs() > Money::MAX.to_decimal() {
            return Err(serde::de::Error::custom(format!(
                "amount {} is out of range (at most {})",
                value,
                Money::MAX
            )));
        }
        Ok(Money::from_decimal(value))
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
    TooPrecise(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
