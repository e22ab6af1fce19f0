//! Defines the endpoint for changing the account password.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    settings::{PasswordHash, UserSettings},
};

/// The state needed to change the password.
#[derive(Debug, Clone)]
pub struct ChangePasswordState {
    /// The user's profile and security settings.
    pub settings: Arc<Mutex<UserSettings>>,
    /// The bcrypt work factor used for the new hash.
    pub hash_cost: u32,
}

impl FromRef<AppState> for ChangePasswordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            settings: state.settings.clone(),
            hash_cost: PasswordHash::DEFAULT_COST,
        }
    }
}

/// The form data for changing the password.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    /// The password currently on the account.
    pub current_password: String,
    /// The replacement password.
    pub new_password: String,
    /// The replacement password, typed again.
    pub confirm_password: String,
}

/// A route handler for changing the account password.
///
/// Responds with an alert either way so the user stays on the settings page.
pub async fn change_password_endpoint(
    State(state): State<ChangePasswordState>,
    Form(form): Form<ChangePasswordForm>,
) -> Response {
    let mut settings = match state.settings.lock() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!("could not acquire settings lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    match settings.change_password(
        &form.current_password,
        &form.new_password,
        &form.confirm_password,
        state.hash_cost,
    ) {
        Ok(()) => Alert::Success {
            message: "Password updated".to_owned(),
            details: "Use the new password next time you log in.".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod change_password_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        settings::{
            Profile, UserSettings,
            password_endpoint::{
                ChangePasswordForm, ChangePasswordState, change_password_endpoint,
            },
        },
        test_utils::parse_html_fragment,
    };

    const CURRENT_PASSWORD: &str = "okra and ostriches at dawn";

    fn get_state() -> ChangePasswordState {
        let settings =
            UserSettings::with_password_cost(Profile::default(), CURRENT_PASSWORD, 4).unwrap();

        ChangePasswordState {
            settings: Arc::new(Mutex::new(settings)),
            hash_cost: 4,
        }
    }

    fn form(current: &str, new: &str, confirm: &str) -> Form<ChangePasswordForm> {
        Form(ChangePasswordForm {
            current_password: current.to_owned(),
            new_password: new.to_owned(),
            confirm_password: confirm.to_owned(),
        })
    }

    #[tokio::test]
    async fn changes_the_password_and_renders_a_success_alert() {
        let state = get_state();
        let new_password = "galloping gherkins guard the gate";

        let response = change_password_endpoint(
            State(state.clone()),
            form(CURRENT_PASSWORD, new_password, new_password),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Password updated"));
    }

    #[tokio::test]
    async fn rejects_a_wrong_current_password() {
        let state = get_state();

        let response = change_password_endpoint(
            State(state),
            form(
                "not the password",
                "galloping gherkins guard the gate",
                "galloping gherkins guard the gate",
            ),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_mismatched_confirmation() {
        let state = get_state();

        let response = change_password_endpoint(
            State(state),
            form(
                CURRENT_PASSWORD,
                "galloping gherkins guard the gate",
                "galloping gherkins guard the fence",
            ),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_a_weak_new_password() {
        let state = get_state();

        let response = change_password_endpoint(
            State(state),
            form(CURRENT_PASSWORD, "hunter2", "hunter2"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
