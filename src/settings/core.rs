//! The current user's profile and security settings.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    settings::{PasswordHash, ValidatedPassword},
};

/// The account holder's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role on the platform, e.g. "Investor". Display-only.
    pub role: String,
    /// Where the user is based.
    pub location: Option<String>,
    /// A short free-text introduction.
    pub bio: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: "Investor".to_owned(),
            location: None,
            bio: None,
        }
    }
}

/// The fields a profile update may change.
///
/// The role is assigned by the platform and cannot be edited here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    /// The new display name.
    pub name: String,
    /// The new email address.
    pub email: String,
    /// The new location, if any.
    pub location: Option<String>,
    /// The new bio, if any.
    pub bio: Option<String>,
}

/// The in-memory holder of the user's profile and security settings.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    profile: Profile,
    password: PasswordHash,
    two_factor_enabled: bool,
}

impl UserSettings {
    /// Create settings with `raw_password` hashed at `cost`.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the password cannot be hashed.
    pub fn with_password(profile: Profile, raw_password: &str) -> Result<Self, Error> {
        Self::with_password_cost(profile, raw_password, PasswordHash::DEFAULT_COST)
    }

    /// Like [UserSettings::with_password] but with an explicit bcrypt cost.
    /// Tests use a low cost to stay fast.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the password cannot be hashed.
    pub fn with_password_cost(
        profile: Profile,
        raw_password: &str,
        cost: u32,
    ) -> Result<Self, Error> {
        let password = PasswordHash::new(&ValidatedPassword::new_unchecked(raw_password), cost)?;

        Ok(Self {
            profile,
            password,
            two_factor_enabled: false,
        })
    }

    /// The account holder's profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Whether two-factor authentication is switched on.
    pub fn two_factor_enabled(&self) -> bool {
        self.two_factor_enabled
    }

    /// Update the profile.
    ///
    /// # Errors
    /// Returns [Error::MissingProfileField] if the name or email is empty.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), Error> {
        let name = update.name.trim();
        let email = update.email.trim();

        if name.is_empty() {
            return Err(Error::MissingProfileField("name"));
        }

        if email.is_empty() {
            return Err(Error::MissingProfileField("email"));
        }

        self.profile.name = name.to_owned();
        self.profile.email = email.to_owned();
        self.profile.location = normalized(update.location);
        self.profile.bio = normalized(update.bio);

        Ok(())
    }

    /// Change the account password.
    ///
    /// `cost` sets the bcrypt work factor for the new hash; pass
    /// [PasswordHash::DEFAULT_COST] outside of tests.
    ///
    /// # Errors
    /// Returns an:
    /// - [Error::InvalidCredentials] if `current` does not match the stored
    ///   password,
    /// - or [Error::PasswordMismatch] if `new` and `confirm` differ,
    /// - or [Error::TooWeak] if the new password scores below 3 out of 4,
    /// - or [Error::HashingError] if hashing fails.
    pub fn change_password(
        &mut self,
        current: &str,
        new: &str,
        confirm: &str,
        cost: u32,
    ) -> Result<(), Error> {
        if !self.password.matches(current)? {
            return Err(Error::InvalidCredentials);
        }

        if new != confirm {
            return Err(Error::PasswordMismatch);
        }

        let validated = ValidatedPassword::new(new)?;
        self.password = PasswordHash::new(&validated, cost)?;

        Ok(())
    }

    /// Switch on two-factor authentication.
    ///
    /// The code is only checked for shape; there is no authenticator backend
    /// behind this screen.
    ///
    /// # Errors
    /// Returns [Error::InvalidOtp] if `code` is not six digits.
    pub fn enable_two_factor(&mut self, code: &str) -> Result<(), Error> {
        let code = code.trim();

        if code.len() != 6 || !code.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Error::InvalidOtp);
        }

        self.two_factor_enabled = true;

        Ok(())
    }

    /// Switch off two-factor authentication.
    pub fn disable_two_factor(&mut self) {
        self.two_factor_enabled = false;
    }
}

fn normalized(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod user_settings_tests {
    use crate::{
        Error,
        settings::{Profile, ProfileUpdate, UserSettings},
    };

    const TEST_COST: u32 = 4;
    const CURRENT_PASSWORD: &str = "okra and ostriches at dawn";

    fn get_settings() -> UserSettings {
        let profile = Profile {
            name: "John Investor".to_owned(),
            email: "john@venturedesk.io".to_owned(),
            role: "Investor".to_owned(),
            location: Some("San Francisco, CA".to_owned()),
            bio: None,
        };

        UserSettings::with_password_cost(profile, CURRENT_PASSWORD, TEST_COST).unwrap()
    }

    fn valid_update() -> ProfileUpdate {
        ProfileUpdate {
            name: "John A. Investor".to_owned(),
            email: "john@venturedesk.io".to_owned(),
            location: None,
            bio: Some("Angel investor focused on early-stage fintech.".to_owned()),
        }
    }

    #[test]
    fn update_profile_applies_all_fields() {
        let mut settings = get_settings();

        settings.update_profile(valid_update()).unwrap();

        let profile = settings.profile();
        assert_eq!(profile.name, "John A. Investor");
        assert_eq!(profile.location, None);
        assert_eq!(
            profile.bio.as_deref(),
            Some("Angel investor focused on early-stage fintech.")
        );
        // The role is not editable.
        assert_eq!(profile.role, "Investor");
    }

    #[test]
    fn update_profile_rejects_empty_name() {
        let mut settings = get_settings();

        let result = settings.update_profile(ProfileUpdate {
            name: "  ".to_owned(),
            ..valid_update()
        });

        assert_eq!(result, Err(Error::MissingProfileField("name")));
        assert_eq!(settings.profile().name, "John Investor");
    }

    #[test]
    fn update_profile_rejects_empty_email() {
        let mut settings = get_settings();

        let result = settings.update_profile(ProfileUpdate {
            email: String::new(),
            ..valid_update()
        });

        assert_eq!(result, Err(Error::MissingProfileField("email")));
    }

    #[test]
    fn whitespace_only_optional_fields_become_none() {
        let mut settings = get_settings();

        settings
            .update_profile(ProfileUpdate {
                location: Some("   ".to_owned()),
                ..valid_update()
            })
            .unwrap();

        assert_eq!(settings.profile().location, None);
    }

    #[test]
    fn change_password_accepts_the_correct_flow() {
        let mut settings = get_settings();
        let new_password = "galloping gherkins guard the gate";

        settings
            .change_password(CURRENT_PASSWORD, new_password, new_password, TEST_COST)
            .unwrap();

        // The old password no longer works.
        assert_eq!(
            settings.change_password(CURRENT_PASSWORD, new_password, new_password, TEST_COST),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn change_password_rejects_a_wrong_current_password() {
        let mut settings = get_settings();

        let result = settings.change_password(
            "not the password",
            "galloping gherkins guard the gate",
            "galloping gherkins guard the gate",
            TEST_COST,
        );

        assert_eq!(result, Err(Error::InvalidCredentials));
    }

    #[test]
    fn change_password_rejects_mismatched_confirmation() {
        let mut settings = get_settings();

        let result = settings.change_password(
            CURRENT_PASSWORD,
            "galloping gherkins guard the gate",
            "galloping gherkins guard the fence",
            TEST_COST,
        );

        assert_eq!(result, Err(Error::PasswordMismatch));
    }

    #[test]
    fn change_password_rejects_a_weak_replacement() {
        let mut settings = get_settings();

        let result =
            settings.change_password(CURRENT_PASSWORD, "hunter2", "hunter2", TEST_COST);

        assert!(matches!(result, Err(Error::TooWeak(_))));

        // The old password still works.
        assert_eq!(
            settings.change_password(
                CURRENT_PASSWORD,
                "galloping gherkins guard the gate",
                "galloping gherkins guard the gate",
                TEST_COST,
            ),
            Ok(())
        );
    }

    #[test]
    fn enable_two_factor_requires_six_digits() {
        let mut settings = get_settings();

        for code in ["", "12345", "1234567", "12345a", "12 456"] {
            assert_eq!(
                settings.enable_two_factor(code),
                Err(Error::InvalidOtp),
                "want {code:?} to be rejected"
            );
            assert!(!settings.two_factor_enabled());
        }

        settings.enable_two_factor("123456").unwrap();
        assert!(settings.two_factor_enabled());
    }

    #[test]
    fn disable_two_factor_clears_the_flag() {
        let mut settings = get_settings();
        settings.enable_two_factor("123456").unwrap();

        settings.disable_two_factor();

        assert!(!settings.two_factor_enabled());
    }
}
