//! Defines the route handler for the account settings page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, BadgeTone, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, loading_spinner, status_badge,
    },
    navigation::NavBar,
    settings::{Profile, UserSettings},
};

/// The minimum number of characters a new password should have on the client
/// side (server-side strength checking is done on top of this).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

/// The state needed for the settings page.
#[derive(Debug, Clone)]
pub struct SettingsViewState {
    /// The user's profile and security settings.
    pub settings: Arc<Mutex<UserSettings>>,
}

impl FromRef<AppState> for SettingsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            settings: state.settings.clone(),
        }
    }
}

/// Render the account settings page.
pub async fn get_settings_page(State(state): State<SettingsViewState>) -> Result<Response, Error> {
    let (profile, two_factor_enabled) = {
        let settings = state
            .settings
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire settings lock: {error}"))
            .map_err(|_| Error::StateLockError)?;

        (settings.profile().clone(), settings.two_factor_enabled())
    };

    Ok(settings_view(&profile, two_factor_enabled).into_response())
}

fn settings_view(profile: &Profile, two_factor_enabled: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Settings" }
                    p class="text-gray-600 dark:text-gray-400"
                    { "Manage your profile and account security" }
                }

                (profile_form(profile))
                (security_overview(two_factor_enabled))
                (password_form())
                (two_factor_section(two_factor_enabled))
            }
        }
    );

    base("Settings", &[], &content)
}

fn profile_form(profile: &Profile) -> Markup {
    let text_input = |name: &str, label: &str, value: &str, disabled: bool| {
        html!(
            div
            {
                label for=(name) class=(FORM_LABEL_STYLE) { (label) }
                input
                    name=(name)
                    id=(name)
                    type="text"
                    value=(value)
                    disabled[disabled]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        )
    };

    html!(
        form
            hx-post=(endpoints::PROFILE_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class=(format!("{CARD_STYLE} space-y-4"))
        {
            h2 class="text-lg font-medium" { "Profile Settings" }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                (text_input("name", "Full Name", &profile.name, false))

                div
                {
                    label for="email" class=(FORM_LABEL_STYLE) { "Email" }
                    input
                        name="email"
                        id="email"
                        type="email"
                        value=(profile.email)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (text_input("role", "Role", &profile.role, true))
                (text_input(
                    "location",
                    "Location",
                    profile.location.as_deref().unwrap_or(""),
                    false,
                ))
            }

            div
            {
                label for="bio" class=(FORM_LABEL_STYLE) { "Bio" }
                textarea
                    name="bio"
                    id="bio"
                    rows="4"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (profile.bio.as_deref().unwrap_or(""))
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }
        }
    )
}

fn security_overview(two_factor_enabled: bool) -> Markup {
    let overview_card = |label: &str, badge: Markup, note: &str| {
        html!(
            div class="p-4 bg-gray-50 dark:bg-gray-700 rounded-lg"
            {
                div class="flex items-center gap-2 mb-2"
                {
                    span class="text-sm font-medium" { (label) }
                    (badge)
                }
                p class="text-xs text-gray-600 dark:text-gray-400" { (note) }
            }
        )
    };

    let two_factor_badge = if two_factor_enabled {
        status_badge("Enabled", BadgeTone::Success)
    } else {
        status_badge("Not Enabled", BadgeTone::Danger)
    };

    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-3" { "Security Overview" }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                (overview_card(
                    "2FA",
                    two_factor_badge,
                    if two_factor_enabled { "Enabled" } else { "Not enabled" },
                ))
                (overview_card(
                    "Password",
                    status_badge("Set", BadgeTone::Success),
                    "Strong password set",
                ))
                (overview_card(
                    "Email",
                    status_badge("Verified", BadgeTone::Success),
                    "Verified",
                ))
            }
        }
    )
}

fn password_form() -> Markup {
    let password_input = |name: &str, label: &str| {
        html!(
            div
            {
                label for=(name) class=(FORM_LABEL_STYLE) { (label) }
                input
                    name=(name)
                    id=(name)
                    type="password"
                    placeholder="••••••••"
                    required
                    minlength=(PASSWORD_INPUT_MIN_LENGTH)
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        )
    };

    html!(
        form
            hx-post=(endpoints::PASSWORD_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#password-submit-button"
            class=(format!("{CARD_STYLE} space-y-4"))
        {
            h2 class="text-lg font-medium" { "Change Password" }

            div
            {
                label for="current_password" class=(FORM_LABEL_STYLE) { "Current Password" }
                input
                    name="current_password"
                    id="current_password"
                    type="password"
                    placeholder="••••••••"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (password_input("new_password", "New Password"))
            (password_input("confirm_password", "Confirm New Password"))

            button
                type="submit"
                id="password-submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Update Password"
            }
        }
    )
}

fn two_factor_section(two_factor_enabled: bool) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-2" { "Two-Factor Authentication" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
            { "Use an authentication app to generate one-time codes" }

            @if two_factor_enabled {
                form
                    hx-delete=(endpoints::TWO_FACTOR_API)
                    hx-target-error="#alert-container"
                {
                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Disable" }
                }
            } @else {
                form
                    hx-post=(endpoints::TWO_FACTOR_API)
                    hx-target-error="#alert-container"
                    class="space-y-3"
                {
                    div
                    {
                        label for="code" class=(FORM_LABEL_STYLE)
                        { "Enter the 6-digit code from your authenticator app" }
                        input
                            name="code"
                            id="code"
                            type="text"
                            inputmode="numeric"
                            maxlength="6"
                            placeholder="123456"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Enable" }
                }
            }
        }
    )
}
