//! Password strength checking and hashing.
//!
//! A raw password is first checked with zxcvbn ([ValidatedPassword]) and only
//! then hashed with bcrypt ([PasswordHash]). Storing the intermediate type is
//! impossible, so a weak password can never reach the hasher by accident.

use bcrypt::{hash, verify};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A password that zxcvbn scored as strong enough, but that has not been
/// hashed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Check a raw password's strength.
    ///
    /// # Errors
    /// Returns [Error::TooWeak] if the password scores below 3 out of 4. The
    /// error message carries zxcvbn's feedback on how to pick a stronger
    /// one.
    pub fn new(raw_password: &str) -> Result<Self, Error> {
        let analysis = zxcvbn(raw_password, &[]);

        match analysis.score() {
            Score::Three | Score::Four => Ok(Self(raw_password.to_string())),
            _ => Err(Error::TooWeak(
                analysis
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }

    /// Skip the strength check.
    ///
    /// The caller should ensure the password is acceptable. This function
    /// has `_unchecked` in the name but is not `unsafe`, because a weak
    /// password causes no memory unsafety, only a weak account.
    pub fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_string())
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default bcrypt cost.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a validated password.
    ///
    /// `cost` sets the bcrypt work factor; pass
    /// [PasswordHash::DEFAULT_COST] outside of tests.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the underlying library fails.
    pub fn new(password: &ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Check whether `raw_password` matches the stored hash.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the stored hash cannot be parsed.
    pub fn matches(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }
}
