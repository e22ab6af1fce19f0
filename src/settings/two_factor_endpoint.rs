//! Defines the endpoints for enabling and disabling two-factor
//! authentication.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{AppState, Error, endpoints, settings::UserSettings};

/// The state needed to toggle two-factor authentication.
#[derive(Debug, Clone)]
pub struct TwoFactorState {
    /// The user's profile and security settings.
    pub settings: Arc<Mutex<UserSettings>>,
}

impl FromRef<AppState> for TwoFactorState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            settings: state.settings.clone(),
        }
    }
}

/// The form data for enabling two-factor authentication.
#[derive(Debug, Deserialize)]
pub struct TwoFactorForm {
    /// The six-digit code from the authenticator app.
    pub code: String,
}

/// A route handler for enabling two-factor authentication, redirects to the
/// settings view on success so the security overview refreshes.
pub async fn enable_two_factor_endpoint(
    State(state): State<TwoFactorState>,
    Form(form): Form<TwoFactorForm>,
) -> Response {
    let mut settings = match state.settings.lock() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!("could not acquire settings lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    match settings.enable_two_factor(&form.code) {
        Ok(()) => redirect_to_settings(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for disabling two-factor authentication, redirects to the
/// settings view.
pub async fn disable_two_factor_endpoint(State(state): State<TwoFactorState>) -> Response {
    let mut settings = match state.settings.lock() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!("could not acquire settings lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    settings.disable_two_factor();

    redirect_to_settings()
}

fn redirect_to_settings() -> Response {
    (
        HxRedirect(endpoints::SETTINGS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod two_factor_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        endpoints,
        settings::{
            Profile, UserSettings,
            two_factor_endpoint::{
                TwoFactorForm, TwoFactorState, disable_two_factor_endpoint,
                enable_two_factor_endpoint,
            },
        },
        test_utils::assert_hx_redirect,
    };

    fn get_state() -> TwoFactorState {
        let settings =
            UserSettings::with_password_cost(Profile::default(), "okra and ostriches at dawn", 4)
                .unwrap();

        TwoFactorState {
            settings: Arc::new(Mutex::new(settings)),
        }
    }

    fn code_form(code: &str) -> Form<TwoFactorForm> {
        Form(TwoFactorForm {
            code: code.to_owned(),
        })
    }

    #[tokio::test]
    async fn a_well_formed_code_enables_two_factor() {
        let state = get_state();

        let response = enable_two_factor_endpoint(State(state.clone()), code_form("123456"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::SETTINGS_VIEW);
        assert!(state.settings.lock().unwrap().two_factor_enabled());
    }

    #[tokio::test]
    async fn a_short_code_is_rejected() {
        let state = get_state();

        let response = enable_two_factor_endpoint(State(state.clone()), code_form("123"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!state.settings.lock().unwrap().two_factor_enabled());
    }

    #[tokio::test]
    async fn disable_clears_the_flag() {
        let state = get_state();
        enable_two_factor_endpoint(State(state.clone()), code_form("123456")).await;

        let response = disable_two_factor_endpoint(State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(!state.settings.lock().unwrap().two_factor_enabled());
    }
}
