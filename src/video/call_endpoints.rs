//! Defines the endpoints for starting, ending, and controlling a call.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    video::{CallSession, video_page::ToggleMediaForm},
};

/// The state needed to control the call session.
#[derive(Debug, Clone)]
pub struct CallControlState {
    /// The video call session.
    pub call: Arc<Mutex<CallSession>>,
}

impl FromRef<AppState> for CallControlState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            call: state.call.clone(),
        }
    }
}

/// A route handler for joining a call, redirects to the video view.
pub async fn start_call_endpoint(State(state): State<CallControlState>) -> Response {
    let mut session = match lock_session(&state) {
        Ok(session) => session,
        Err(response) => return response,
    };

    session.start_call();

    redirect_to_video()
}

/// A route handler for leaving the call, redirects to the video view.
pub async fn end_call_endpoint(State(state): State<CallControlState>) -> Response {
    let mut session = match lock_session(&state) {
        Ok(session) => session,
        Err(response) => return response,
    };

    session.end_call();

    redirect_to_video()
}

/// A route handler for flipping a media control, redirects to the video view
/// on success.
pub async fn toggle_media_endpoint(
    State(state): State<CallControlState>,
    Form(form): Form<ToggleMediaForm>,
) -> Response {
    let mut session = match lock_session(&state) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match session.toggle(form.control) {
        Ok(_) => redirect_to_video(),
        Err(error) => error.into_alert_response(),
    }
}

fn lock_session(state: &CallControlState) -> Result<MutexGuard<'_, CallSession>, Response> {
    state.call.lock().map_err(|error| {
        tracing::error!("could not acquire call lock: {error}");
        Error::StateLockError.into_alert_response()
    })
}

fn redirect_to_video() -> Response {
    (
        HxRedirect(endpoints::VIDEO_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
