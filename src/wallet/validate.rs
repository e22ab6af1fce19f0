//! The validation gate for wallet mutations.
//!
//! Every form input passes through these stateless checks before the wallet
//! is touched, so a rejected request can never leave partial state behind.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, wallet::Cents};

/// Parse a user-entered amount and require it to be positive.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the input is not a decimal number or is
/// not strictly greater than zero.
pub fn parse_amount(raw: &str) -> Result<Cents, Error> {
    let amount = Cents::parse(raw)?;

    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(raw.to_owned()))
    }
}

/// Check that a debit of `amount` can be covered by `balance`.
///
/// # Errors
/// Returns [Error::InsufficientBalance] if `amount` exceeds `balance`.
pub fn validate_sufficient_funds(amount: Cents, balance: Cents) -> Result<(), Error> {
    if amount > balance {
        Err(Error::InsufficientBalance)
    } else {
        Ok(())
    }
}

/// A validated, non-empty counterparty name for transfers and fundings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Recipient(String);

impl Recipient {
    /// Create a recipient name.
    ///
    /// # Errors
    /// Returns [Error::MissingRecipient] if `name` is empty or whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::MissingRecipient)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a recipient name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`,
    /// because if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
