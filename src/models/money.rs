//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (paise/cents, i64) so that summing
//! thousands of transactions never drifts the way binary floating point does.
//! Provides exact arithmetic, parsing of user input and decimal formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::{GuardError, GuardResult};

/// Number of minor units in one major unit
pub const MINOR_PER_MAJOR: i64 = 100;

/// Largest accepted magnitude in major units
///
/// Ten thousand amounts at this bound still sum well inside `i64`.
pub const MAX_MAJOR_UNITS: i64 = 1_000_000_000_000;

/// Largest accepted magnitude in minor units
pub const MAX_MINOR_UNITS: i64 = MAX_MAJOR_UNITS * MINOR_PER_MAJOR;

/// Currency symbols accepted (and stripped) when parsing user input
const ACCEPTED_SYMBOLS: [char; 2] = ['₹', '$'];

/// Represents a monetary amount stored as minor units (hundredths of the currency unit)
///
/// Equality and ordering are plain integer comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use budget_guard::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole major units
    pub const fn from_major_units(units: i64) -> Self {
        Self(units.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Create a Money amount from a decimal number as sent by the persistence layer
    ///
    /// Rounds half away from zero to the nearest minor unit. Non-finite input
    /// and magnitudes above [`MAX_MAJOR_UNITS`] are rejected.
    pub fn from_major(value: f64) -> GuardResult<Self> {
        if !value.is_finite() {
            return Err(GuardError::InvalidAmount(format!(
                "{} is not a finite number",
                value
            )));
        }

        let scaled = (value * MINOR_PER_MAJOR as f64).round();
        if scaled.abs() > MAX_MINOR_UNITS as f64 {
            return Err(out_of_range(&value.to_string()));
        }

        Ok(Self(scaled as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal number (display and wire use only)
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The amount if positive, otherwise zero
    pub fn positive_part(&self) -> Self {
        (*self).max(Self::zero())
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "₹10.50", "$10", "1,250.5". At most two
    /// fractional digits are allowed and the magnitude may not exceed
    /// [`MAX_MAJOR_UNITS`]; anything else is an `InvalidAmount`.
    pub fn parse(s: &str) -> GuardResult<Self> {
        let original = s.trim();
        let invalid = || GuardError::InvalidAmount(format!("'{}' is not a decimal amount", original));

        let (negative, rest) = match original.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, original.strip_prefix('+').unwrap_or(original)),
        };
        let rest = rest
            .strip_prefix(&ACCEPTED_SYMBOLS[..])
            .unwrap_or(rest)
            .trim_start();
        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(GuardError::InvalidAmount(format!(
                "'{}' has more than two decimal places",
                original
            )));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let minor = whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|w| w.checked_add(frac_minor))
            .filter(|minor| *minor <= MAX_MINOR_UNITS)
            .ok_or_else(|| out_of_range(original))?;

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Format with a currency symbol and Indian digit grouping, e.g. "-₹1,50,000.50"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_digits(magnitude / MINOR_PER_MAJOR as u64),
            magnitude % MINOR_PER_MAJOR as u64
        )
    }
}

fn out_of_range(input: &str) -> GuardError {
    GuardError::InvalidAmount(format!(
        "'{}' exceeds the largest supported amount of {}",
        input, MAX_MAJOR_UNITS
    ))
}

/// en-IN grouping: the last three digits, then pairs ("1,50,000")
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            magnitude / MINOR_PER_MAJOR as u64,
            magnitude % MINOR_PER_MAJOR as u64
        )
    }
}

impl std::str::FromStr for Money {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Arithmetic saturates at the i64 bounds instead of panicking or wrapping.

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
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
        *self = *self - other;
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
