//! Defines the endpoints for answering meeting requests.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    calendar::{RequestId, RequestStatus, Schedule},
    endpoints,
};

/// The state needed to answer a meeting request.
#[derive(Debug, Clone)]
pub struct RespondRequestState {
    /// The meeting schedule.
    pub schedule: Arc<Mutex<Schedule>>,
}

impl FromRef<AppState> for RespondRequestState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            schedule: state.schedule.clone(),
        }
    }
}

/// A route handler for accepting a meeting request, redirects to the
/// calendar view on success.
pub async fn accept_request_endpoint(
    State(state): State<RespondRequestState>,
    Path(request_id): Path<RequestId>,
) -> Response {
    answer_request(&state, request_id, RequestStatus::Accepted)
}

/// A route handler for declining a meeting request, redirects to the
/// calendar view on success.
pub async fn decline_request_endpoint(
    State(state): State<RespondRequestState>,
    Path(request_id): Path<RequestId>,
) -> Response {
    answer_request(&state, request_id, RequestStatus::Declined)
}

fn answer_request(state: &RespondRequestState, request_id: RequestId, answer: RequestStatus) -> Response {
    let mut schedule = match state.schedule.lock() {
        Ok(schedule) => schedule,
        Err(error) => {
            tracing::error!("could not acquire schedule lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    let result = match answer {
        RequestStatus::Accepted => schedule.accept_request(request_id),
        RequestStatus::Declined => schedule.decline_request(request_id),
        // Requests cannot be answered back to pending.
        RequestStatus::Pending => unreachable!(),
    };

    match result {
        Ok(()) => (
            HxRedirect(endpoints::CALENDAR_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
