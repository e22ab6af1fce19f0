//! Defines the endpoint for adding an availability slot.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    calendar::{Schedule, parse_time_of_day},
    endpoints,
};

/// The state needed to add an availability slot.
#[derive(Debug, Clone)]
pub struct AddSlotState {
    /// The meeting schedule.
    pub schedule: Arc<Mutex<Schedule>>,
}

impl FromRef<AppState> for AddSlotState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            schedule: state.schedule.clone(),
        }
    }
}

/// The form data for an availability slot.
#[derive(Debug, Deserialize)]
pub struct SlotForm {
    /// The day the slot is on.
    pub date: Date,
    /// The start of the slot as HH:MM.
    pub start: String,
    /// The end of the slot as HH:MM.
    pub end: String,
}

/// A route handler for adding an availability slot, redirects to the
/// calendar view on success.
pub async fn add_slot_endpoint(
    State(state): State<AddSlotState>,
    Form(form): Form<SlotForm>,
) -> Response {
    let start = match parse_time_of_day(&form.start) {
        Ok(start) => start,
        Err(error) => return error.into_alert_response(),
    };
    let end = match parse_time_of_day(&form.end) {
        Ok(end) => end,
        Err(error) => return error.into_alert_response(),
    };

    let mut schedule = match state.schedule.lock() {
        Ok(schedule) => schedule,
        Err(error) => {
            tracing::error!("could not acquire schedule lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    match schedule.add_availability(form.date, start, end) {
        Ok(slot) => {
            tracing::info!("added availability slot {} on {}", slot.id, form.date);

            (
                HxRedirect(endpoints::CALENDAR_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod add_slot_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use time::macros::date;

    use crate::{
        calendar::{
            MeetingKind, Schedule,
            slot_endpoint::{AddSlotState, SlotForm, add_slot_endpoint},
        },
        endpoints,
        test_utils::assert_hx_redirect,
    };

    fn get_state() -> AddSlotState {
        AddSlotState {
            schedule: Arc::new(Mutex::new(Schedule::default())),
        }
    }

    fn slot_form(start: &str, end: &str) -> Form<SlotForm> {
        Form(SlotForm {
            date: date!(2026 - 02 - 13),
            start: start.to_owned(),
            end: end.to_owned(),
        })
    }

    #[tokio::test]
    async fn adds_slot_and_redirects() {
        let state = get_state();

        let response = add_slot_endpoint(State(state.clone()), slot_form("14:00", "15:00"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CALENDAR_VIEW);

        let schedule = state.schedule.lock().unwrap();
        assert_eq!(schedule.meetings().len(), 1);
        assert_eq!(schedule.meetings()[0].kind, MeetingKind::Availability);
    }

    #[tokio::test]
    async fn rejects_backwards_slot() {
        let state = get_state();

        let response = add_slot_endpoint(State(state.clone()), slot_form("15:00", "14:00"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.schedule.lock().unwrap().meetings(), []);
    }

    #[tokio::test]
    async fn rejects_malformed_time() {
        let state = get_state();

        let response = add_slot_endpoint(State(state.clone()), slot_form("2pm", "3pm"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.schedule.lock().unwrap().meetings(), []);
    }
}
