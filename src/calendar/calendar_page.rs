//! Defines the route handler for the calendar page: the weekly agenda,
//! pending meeting requests, and upcoming meetings.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, Time};

use crate::{
    AppState, Error,
    calendar::{Meeting, MeetingKind, MeetingRequest, Schedule},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, BadgeTone, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, status_badge,
    },
    navigation::NavBar,
    timezone::current_local_datetime,
};

/// The state needed for the calendar page.
#[derive(Debug, Clone)]
pub struct CalendarViewState {
    /// The meeting schedule.
    pub schedule: Arc<Mutex<Schedule>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CalendarViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            schedule: state.schedule.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the meeting calendar.
pub async fn get_calendar_page(State(state): State<CalendarViewState>) -> Result<Response, Error> {
    let now = current_local_datetime(&state.local_timezone)?;

    let (agenda, pending, upcoming) = {
        let schedule = state
            .schedule
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire schedule lock: {error}"))
            .map_err(|_| Error::StateLockError)?;

        let mut agenda: Vec<Meeting> = schedule.meetings().to_vec();
        agenda.sort_by_key(|meeting| meeting.start);

        let pending: Vec<MeetingRequest> =
            schedule.pending_requests().into_iter().cloned().collect();
        let upcoming: Vec<Meeting> = schedule
            .upcoming_meetings(now)
            .into_iter()
            .cloned()
            .collect();

        (agenda, pending, upcoming)
    };

    Ok(calendar_view(&agenda, &pending, &upcoming).into_response())
}

fn calendar_view(agenda: &[Meeting], pending: &[MeetingRequest], upcoming: &[Meeting]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CALENDAR_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Meeting Calendar" }
                    p class="text-gray-600 dark:text-gray-400"
                    { "Manage your schedule and availability" }
                }

                div class="grid grid-cols-1 lg:grid-cols-3 gap-6"
                {
                    div class="lg:col-span-2 space-y-6"
                    {
                        (agenda_view(agenda))
                        (add_slot_form())
                    }

                    div class="space-y-6"
                    {
                        (legend_card())
                        (requests_card(pending))
                        (upcoming_card(upcoming))
                    }
                }
            }
        }
    );

    base("Calendar", &[], &content)
}

fn agenda_view(agenda: &[Meeting]) -> Markup {
    // Group consecutive entries that fall on the same day; the caller sorts
    // by start time.
    let mut days: Vec<(Date, Vec<&Meeting>)> = Vec::new();
    for meeting in agenda {
        let date = meeting.start.date();

        match days.last_mut() {
            Some((day, meetings)) if *day == date => meetings.push(meeting),
            _ => days.push((date, vec![meeting])),
        }
    }

    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-4" { "Agenda" }

            @if days.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400 text-center py-4"
                { "Nothing scheduled. Add an availability slot below." }
            }

            div class="space-y-4"
            {
                @for (date, meetings) in &days {
                    div
                    {
                        h3 class="text-sm font-semibold text-gray-500 dark:text-gray-400 mb-2"
                        {
                            time datetime=(date) { (date) }
                        }

                        ul class="space-y-2"
                        {
                            @for meeting in meetings.iter().copied() {
                                (agenda_entry(meeting))
                            }
                        }
                    }
                }
            }
        }
    )
}

fn agenda_entry(meeting: &Meeting) -> Markup {
    let badge_tone = match meeting.kind {
        MeetingKind::Confirmed => BadgeTone::Success,
        MeetingKind::Pending => BadgeTone::Warning,
        MeetingKind::Availability => BadgeTone::Neutral,
    };

    html!(
        li class="p-3 rounded-lg bg-gray-50 dark:bg-gray-700"
        {
            div class="flex items-center justify-between gap-2"
            {
                span class="text-sm font-medium" { (meeting.title) }
                (status_badge(meeting.kind.label(), badge_tone))
            }

            div class="text-xs text-gray-600 dark:text-gray-400 mt-1"
            {
                (fmt_time(meeting.start.time())) " – " (fmt_time(meeting.end.time()))
            }

            @if !meeting.attendees.is_empty() {
                div class="text-xs text-gray-600 dark:text-gray-400 mt-1"
                {
                    "With: " (meeting.attendees.join(", "))
                }
            }

            @if let Some(description) = &meeting.description {
                div class="text-xs text-gray-500 dark:text-gray-400 mt-1" { (description) }
            }
        }
    )
}

fn add_slot_form() -> Markup {
    html!(
        form
            hx-post=(endpoints::NEW_SLOT_API)
            hx-target-error="#alert-container"
            class=(format!("{CARD_STYLE} space-y-3"))
        {
            h2 class="text-lg font-medium" { "Add Availability" }
            p class="text-sm text-gray-600 dark:text-gray-400"
            { "Open a slot that others can book a meeting in" }

            div class="grid grid-cols-1 md:grid-cols-3 gap-3"
            {
                div
                {
                    label for="slot-date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        name="date"
                        id="slot-date"
                        type="date"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="slot-start" class=(FORM_LABEL_STYLE) { "From" }
                    input
                        name="start"
                        id="slot-start"
                        type="time"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="slot-end" class=(FORM_LABEL_STYLE) { "To" }
                    input
                        name="end"
                        id="slot-end"
                        type="time"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Availability" }
        }
    )
}

fn legend_card() -> Markup {
    let legend_row = |swatch_style: &str, label: &str| {
        html!(
            div class="flex items-center gap-3"
            {
                div class=(format!("w-4 h-4 rounded {swatch_style}")) {}
                span class="text-sm" { (label) }
            }
        )
    };

    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-3" { "Legend" }

            div class="space-y-3"
            {
                (legend_row("bg-green-500", "Confirmed Meetings"))
                (legend_row("bg-yellow-500", "Pending Requests"))
                (legend_row("bg-blue-500", "Available Slots"))
            }
        }
    )
}

fn requests_card(pending: &[MeetingRequest]) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-3" { "Meeting Requests" }

            @if pending.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400 text-center py-4"
                { "No pending requests" }
            }

            div class="space-y-4"
            {
                @for request in pending {
                    (request_entry(request))
                }
            }
        }
    )
}

fn request_entry(request: &MeetingRequest) -> Markup {
    let accept_url = format_endpoint(endpoints::ACCEPT_REQUEST_API, request.id);
    let decline_url = format_endpoint(endpoints::DECLINE_REQUEST_API, request.id);

    html!(
        div class="p-3 bg-gray-50 dark:bg-gray-700 rounded-lg space-y-3"
        {
            div
            {
                h3 class="text-sm font-medium" { (request.title) }
                p class="text-xs text-gray-600 dark:text-gray-400 mt-1"
                { "From: " (request.from) }
                p class="text-xs text-gray-500 dark:text-gray-400 mt-1"
                {
                    time datetime=(request.date) { (request.date) }
                    " at " (fmt_time(request.time))
                }
            }

            div class="flex gap-2"
            {
                form
                    hx-post=(accept_url)
                    hx-target-error="#alert-container"
                    class="flex-1"
                {
                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Accept" }
                }

                form
                    hx-post=(decline_url)
                    hx-target-error="#alert-container"
                    class="flex-1"
                {
                    button
                        type="submit"
                        class=(format!("{BUTTON_SECONDARY_STYLE} text-red-600 dark:text-red-400"))
                    {
                        "Decline"
                    }
                }
            }
        }
    )
}

fn upcoming_card(upcoming: &[Meeting]) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-3" { "Upcoming Meetings" }

            @if upcoming.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400 text-center py-4"
                { "No upcoming meetings" }
            }

            div class="space-y-3"
            {
                @for meeting in upcoming {
                    div class="p-3 bg-green-50 dark:bg-green-900/20 rounded-lg"
                    {
                        h3 class="text-sm font-medium" { (meeting.title) }

                        div class="text-xs text-gray-600 dark:text-gray-400 mt-1"
                        {
                            time datetime=(meeting.start.date()) { (meeting.start.date()) }
                            " at " (fmt_time(meeting.start.time()))
                        }

                        @if !meeting.attendees.is_empty() {
                            div class="text-xs text-gray-600 dark:text-gray-400 mt-1"
                            {
                                (meeting.attendees.join(", "))
                            }
                        }
                    }
                }
            }
        }
    )
}

/// Render a time of day as HH:MM.
pub(crate) fn fmt_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[cfg(test)]
mod calendar_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;
    use time::macros::{date, datetime, time};

    use crate::{
        calendar::{
            Meeting, MeetingKind, MeetingRequest, RequestStatus, Schedule,
            calendar_page::{CalendarViewState, fmt_time},
            get_calendar_page,
        },
        endpoints,
        test_utils::{assert_hx_endpoint, assert_valid_html, get_forms, parse_html_document},
    };

    fn get_state(schedule: Schedule) -> CalendarViewState {
        CalendarViewState {
            schedule: Arc::new(Mutex::new(schedule)),
            local_timezone: "UTC".to_owned(),
        }
    }

    fn fixtures() -> Schedule {
        Schedule::with_fixtures(
            vec![Meeting {
                id: 1,
                title: "Pitch Meeting with TechVentures".to_owned(),
                start: datetime!(2026 - 02 - 12 10:00),
                end: datetime!(2026 - 02 - 12 11:00),
                kind: MeetingKind::Confirmed,
                attendees: vec!["John Investor".to_owned()],
                description: Some("Series A funding discussion".to_owned()),
            }],
            vec![MeetingRequest {
                id: 1,
                from: "Alex Johnson".to_owned(),
                title: "Investment Discussion".to_owned(),
                date: date!(2026 - 02 - 15),
                time: time!(14:00),
                status: RequestStatus::Pending,
            }],
        )
    }

    #[tokio::test]
    async fn renders_agenda_requests_and_slot_form() {
        let state = get_state(fixtures());

        let response = get_calendar_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Pitch Meeting with TechVentures"));
        assert!(text.contains("From: Alex Johnson"));

        let forms = get_forms(&html);
        // The slot form plus accept and decline for the one pending request.
        assert_eq!(forms.len(), 3);
        assert_hx_endpoint(&forms[0], endpoints::NEW_SLOT_API, "hx-post");
        assert_hx_endpoint(&forms[1], "/api/calendar/requests/1/accept", "hx-post");
        assert_hx_endpoint(&forms[2], "/api/calendar/requests/1/decline", "hx-post");
    }

    #[tokio::test]
    async fn resolved_requests_are_not_listed() {
        let mut schedule = fixtures();
        schedule.accept_request(1).unwrap();
        let state = get_state(schedule);

        let response = get_calendar_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No pending requests"));
    }

    #[tokio::test]
    async fn empty_schedule_renders_hints() {
        let state = get_state(Schedule::default());

        let response = get_calendar_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Nothing scheduled"));
        assert!(text.contains("No upcoming meetings"));

        let forms = get_forms(&html);
        assert_eq!(forms.len(), 1, "only the slot form should remain");
    }

    #[tokio::test]
    async fn agenda_groups_entries_by_day() {
        let mut schedule = fixtures();
        schedule
            .add_availability(date!(2026 - 02 - 12), time!(14:00), time!(15:00))
            .unwrap();
        let state = get_state(schedule);

        let response = get_calendar_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let day_headers = html
            .select(&Selector::parse("section h3 + ul").unwrap())
            .count();
        assert_eq!(day_headers, 1, "both entries share one day group");
    }

    #[test]
    fn fmt_time_pads_to_two_digits() {
        assert_eq!(fmt_time(time!(9:05)), "09:05");
        assert_eq!(fmt_time(time!(14:30)), "14:30");
    }
}
