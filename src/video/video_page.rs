//! Defines the route handler for the video call page: a lobby when idle, the
//! in-call view while a call is running.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    calendar::{Meeting, Schedule, fmt_time},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    timezone::current_local_datetime,
    video::{CallRecord, CallSession, MediaControl},
};

/// The state needed for the video page.
#[derive(Debug, Clone)]
pub struct VideoViewState {
    /// The video call session.
    pub call: Arc<Mutex<CallSession>>,
    /// The meeting schedule, for the upcoming meetings card.
    pub schedule: Arc<Mutex<Schedule>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for VideoViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            call: state.call.clone(),
            schedule: state.schedule.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the video call page.
pub async fn get_video_page(State(state): State<VideoViewState>) -> Result<Response, Error> {
    let now = current_local_datetime(&state.local_timezone)?;

    let session = state
        .call
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire call lock: {error}"))
        .map_err(|_| Error::StateLockError)?
        .clone();

    let upcoming: Vec<Meeting> = {
        let schedule = state
            .schedule
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire schedule lock: {error}"))
            .map_err(|_| Error::StateLockError)?;

        schedule.upcoming_meetings(now).into_iter().cloned().collect()
    };

    let view = if session.is_active() {
        in_call_view(&session)
    } else {
        lobby_view(&session, &upcoming)
    };

    Ok(view.into_response())
}

fn lobby_view(session: &CallSession, upcoming: &[Meeting]) -> Markup {
    let nav_bar = NavBar::new(endpoints::VIDEO_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Video Calls" }
                    p class="text-gray-600 dark:text-gray-400"
                    { "Connect with investors and entrepreneurs" }
                }

                div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
                {
                    (start_call_card())
                    (upcoming_card(upcoming))
                }

                (recent_calls_card(session.recent_calls()))
            }
        }
    );

    base("Video Calls", &[], &content)
}

fn start_call_card() -> Markup {
    html!(
        section class=(format!("{CARD_STYLE} text-center py-12"))
        {
            h2 class="text-xl font-semibold mb-2" { "Start a New Call" }
            p class="text-gray-600 dark:text-gray-400 mb-6"
            { "Begin a video meeting with your connections" }

            form hx-post=(endpoints::START_CALL_API) hx-target-error="#alert-container"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Start Call" }
            }
        }
    )
}

fn upcoming_card(upcoming: &[Meeting]) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4" { "Upcoming Meetings" }

            @if upcoming.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400 text-center py-4"
                { "No upcoming meetings" }
            }

            div class="space-y-3"
            {
                @for meeting in upcoming {
                    div class="p-4 bg-gray-50 dark:bg-gray-700 rounded-lg"
                    {
                        h3 class="text-sm font-medium" { (meeting.title) }

                        @if !meeting.attendees.is_empty() {
                            p class="text-xs text-gray-600 dark:text-gray-400 mt-1"
                            { "with " (meeting.attendees.join(", ")) }
                        }

                        p class="text-xs text-gray-500 dark:text-gray-400 mt-1"
                        {
                            time datetime=(meeting.start.date()) { (meeting.start.date()) }
                            " at " (fmt_time(meeting.start.time()))
                        }
                    }
                }
            }
        }
    )
}

fn recent_calls_card(recent_calls: &[CallRecord]) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4" { "Recent Calls" }

            @if recent_calls.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400 text-center py-4"
                { "No recent calls" }
            }

            ul class="space-y-3"
            {
                @for call in recent_calls {
                    li class="flex items-center justify-between p-3 rounded-lg bg-gray-50 dark:bg-gray-700"
                    {
                        div
                        {
                            p class="text-sm font-medium" { (call.name) }
                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (call.direction.label())
                                " · "
                                (format_duration(call.duration_minutes))
                            }
                        }

                        time
                            class="text-xs text-gray-500 dark:text-gray-400"
                            datetime=(call.date)
                        {
                            (call.date)
                        }
                    }
                }
            }
        }
    )
}

fn in_call_view(session: &CallSession) -> Markup {
    let nav_bar = NavBar::new(endpoints::VIDEO_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "In Call" }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        (session.participants().len() + 1) " participants"
                    }
                }

                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    (participant_tile("You", !session.microphone_on(), !session.camera_on()))

                    @for participant in session.participants() {
                        (participant_tile(
                            &participant.name,
                            participant.muted,
                            participant.camera_off,
                        ))
                    }
                }

                (control_bar(session))
            }
        }
    );

    base("In Call", &[], &content)
}

fn participant_tile(name: &str, muted: bool, camera_off: bool) -> Markup {
    html!(
        div class="rounded-lg bg-gray-900 text-white aspect-video flex flex-col items-center justify-center gap-2 p-4"
        {
            p class="text-lg font-semibold" { (name) }

            div class="flex gap-2 text-xs text-gray-300"
            {
                @if muted { span { "muted" } }
                @if camera_off { span { "camera off" } }
            }
        }
    )
}

fn control_bar(session: &CallSession) -> Markup {
    let control_form = |control: &str, label: String| {
        html!(
            form
                hx-post=(endpoints::TOGGLE_MEDIA_API)
                hx-target-error="#alert-container"
            {
                input type="hidden" name="control" value=(control);
                button type="submit" class=(BUTTON_SECONDARY_STYLE) { (label) }
            }
        )
    };

    let toggle_label = |name: &str, on: bool| {
        if on {
            format!("Turn {name} off")
        } else {
            format!("Turn {name} on")
        }
    };

    html!(
        section class="flex flex-wrap justify-center gap-3"
        {
            (control_form("camera", toggle_label("camera", session.camera_on())))
            (control_form("microphone", toggle_label("microphone", session.microphone_on())))
            (control_form(
                "screen",
                if session.screen_sharing() {
                    "Stop sharing".to_owned()
                } else {
                    "Share screen".to_owned()
                },
            ))

            form hx-post=(endpoints::END_CALL_API) hx-target-error="#alert-container"
            {
                button
                    type="submit"
                    class="w-full py-2.5 px-5 text-sm font-medium text-white bg-red-600 rounded hover:bg-red-700"
                {
                    "End Call"
                }
            }
        }
    )
}

/// Render a call duration the way the call log shows it, e.g. "1 hr 15 min".
fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let remainder = minutes % 60;

    match (hours, remainder) {
        (0, minutes) => format!("{minutes} min"),
        (hours, 0) => format!("{hours} hr"),
        (hours, minutes) => format!("{hours} hr {minutes} min"),
    }
}

/// The media control a toggle form names, as posted by the in-call buttons.
#[derive(Debug, serde::Deserialize)]
pub struct ToggleMediaForm {
    /// Which control to flip.
    pub control: MediaControl,
}
