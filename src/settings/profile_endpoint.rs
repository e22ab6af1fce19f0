//! Defines the endpoint for updating the user's profile.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;

use crate::{
    AppState, Error,
    alert::Alert,
    settings::{ProfileUpdate, UserSettings},
};

/// The state needed to update the profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileState {
    /// The user's profile and security settings.
    pub settings: Arc<Mutex<UserSettings>>,
}

impl FromRef<AppState> for UpdateProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            settings: state.settings.clone(),
        }
    }
}

/// A route handler for updating the profile.
///
/// Responds with an alert either way; the submitted values are already in
/// the form, so there is nothing to re-render on success.
pub async fn update_profile_endpoint(
    State(state): State<UpdateProfileState>,
    Form(update): Form<ProfileUpdate>,
) -> Response {
    let mut settings = match state.settings.lock() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!("could not acquire settings lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    match settings.update_profile(update) {
        Ok(()) => Alert::Success {
            message: "Profile updated".to_owned(),
            details: "Your changes have been saved.".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod update_profile_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;

    use crate::{
        settings::{
            Profile, ProfileUpdate, UserSettings,
            profile_endpoint::{UpdateProfileState, update_profile_endpoint},
        },
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    fn get_state() -> UpdateProfileState {
        let settings =
            UserSettings::with_password_cost(Profile::default(), "okra and ostriches at dawn", 4)
                .unwrap();

        UpdateProfileState {
            settings: Arc::new(Mutex::new(settings)),
        }
    }

    #[tokio::test]
    async fn updates_the_profile_and_renders_a_success_alert() {
        let state = get_state();
        let update = ProfileUpdate {
            name: "Sarah Entrepreneur".to_owned(),
            email: "sarah@venturedesk.io".to_owned(),
            location: Some("Austin, TX".to_owned()),
            bio: None,
        };

        let response = update_profile_endpoint(State(state.clone()), Form(update))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Profile updated"));

        let settings = state.settings.lock().unwrap();
        assert_eq!(settings.profile().name, "Sarah Entrepreneur");
        assert_eq!(settings.profile().location.as_deref(), Some("Austin, TX"));
    }

    #[tokio::test]
    async fn rejects_an_empty_name() {
        let state = get_state();
        let update = ProfileUpdate {
            name: String::new(),
            email: "sarah@venturedesk.io".to_owned(),
            location: None,
            bio: None,
        };

        let response = update_profile_endpoint(State(state.clone()), Form(update))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.settings.lock().unwrap().profile().name, "");
    }
}
