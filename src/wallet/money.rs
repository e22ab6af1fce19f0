//! A fixed-point money type.
//!
//! All ledger arithmetic happens on integer minor units (cents) so that
//! repeated mutations cannot accumulate floating-point rounding drift.
//! Floating point only appears at the display boundary, in
//! [crate::html::format_cents].

use serde::{Deserialize, Serialize};

use crate::Error;

/// A monetary amount in integer minor units (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, Hash,
)]
pub struct Cents(i64);

impl Cents {
    /// Zero dollars and zero cents.
    pub const ZERO: Cents = Cents(0);

    /// Create an amount from a count of minor units, e.g. `Cents::new(1050)`
    /// is $10.50.
    pub const fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Create an amount from a whole number of dollars.
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// The amount as a count of minor units.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Add two amounts, returning `None` on overflow.
    pub const fn checked_add(self, other: Cents) -> Option<Cents> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Cents(sum)),
            None => None,
        }
    }

    /// Subtract `other` from the amount, returning `None` on overflow.
    pub const fn checked_sub(self, other: Cents) -> Option<Cents> {
        match self.0.checked_sub(other.0) {
            Some(difference) => Some(Cents(difference)),
            None => None,
        }
    }

    /// Parse a user-entered decimal amount, e.g. "1250" or "1250.75".
    ///
    /// At most two decimal places are accepted since the smallest unit of
    /// account is one cent.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the input is not a plain decimal
    /// number, has more than two decimal places, or overflows the minor-unit
    /// range.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let input = raw.trim();
        let invalid = || Error::InvalidAmount(raw.to_owned());

        let (whole, fraction) = match input.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (input, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        if fraction.len() > 2 || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            if !whole.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(invalid());
            }

            whole.parse().map_err(|_| invalid())?
        };

        // "1250.7" means $1250.70, not $1250.07.
        let mut cents: i64 = fraction.parse().unwrap_or(0);
        if fraction.len() == 1 {
            cents *= 10;
        }

        dollars
            .checked_mul(100)
            .and_then(|minor| minor.checked_add(cents))
            .map(Cents)
            .ok_or_else(invalid)
    }
}
