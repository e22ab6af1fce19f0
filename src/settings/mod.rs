//! Account settings: profile, password, and two-factor authentication.

mod core;
mod password;
mod password_endpoint;
mod profile_endpoint;
mod settings_page;
mod two_factor_endpoint;

pub use core::{Profile, ProfileUpdate, UserSettings};
pub use password::{PasswordHash, ValidatedPassword};
pub use password_endpoint::change_password_endpoint;
pub use profile_endpoint::update_profile_endpoint;
pub use settings_page::get_settings_page;
pub use two_factor_endpoint::{disable_two_factor_endpoint, enable_two_factor_endpoint};
