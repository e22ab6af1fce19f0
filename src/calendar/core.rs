//! The meeting schedule: calendar entries, availability slots, and incoming
//! meeting requests.

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime, Time};

use crate::Error;

/// The identifier of a calendar entry, unique within a session.
pub type MeetingId = i64;

/// The identifier of a meeting request, unique within a session.
pub type RequestId = i64;

/// How many confirmed meetings the upcoming list shows.
const UPCOMING_MEETING_LIMIT: usize = 3;

/// The kind of a calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum MeetingKind {
    /// Both parties have confirmed the meeting.
    Confirmed,
    /// Waiting on the other party.
    Pending,
    /// An open slot others can book.
    Availability,
}

impl MeetingKind {
    /// The kind as display text, e.g. "Confirmed".
    pub fn label(self) -> &'static str {
        match self {
            MeetingKind::Confirmed => "Confirmed",
            MeetingKind::Pending => "Pending",
            MeetingKind::Availability => "Availability",
        }
    }
}

/// A calendar entry: a meeting or an availability slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// The ID of the entry.
    pub id: MeetingId,
    /// The display title, e.g. "Pitch Meeting with TechVentures".
    pub title: String,
    /// When the entry starts, in the server's local timezone.
    pub start: PrimitiveDateTime,
    /// When the entry ends.
    pub end: PrimitiveDateTime,
    /// Whether this is a confirmed meeting, a pending one, or an open slot.
    pub kind: MeetingKind,
    /// Display names of the other attendees.
    pub attendees: Vec<String>,
    /// An optional free-text note.
    pub description: Option<String>,
}

/// The answer state of a meeting request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum RequestStatus {
    /// Not yet answered.
    Pending,
    /// The request was accepted.
    Accepted,
    /// The request was declined.
    Declined,
}

/// A request from another user to meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// The ID of the request.
    pub id: RequestId,
    /// Who sent the request.
    pub from: String,
    /// The proposed topic, e.g. "Investment Discussion".
    pub title: String,
    /// The proposed date.
    pub date: Date,
    /// The proposed time of day.
    pub time: Time,
    /// Whether the request has been answered.
    pub status: RequestStatus,
}

/// The in-memory holder of calendar entries and meeting requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    meetings: Vec<Meeting>,
    requests: Vec<MeetingRequest>,
    next_meeting_id: MeetingId,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::with_fixtures(Vec::new(), Vec::new())
    }
}

impl Schedule {
    /// Create a schedule from pre-existing entries and requests. Used to
    /// seed fixture data.
    pub fn with_fixtures(meetings: Vec<Meeting>, requests: Vec<MeetingRequest>) -> Self {
        let next_meeting_id = meetings.iter().map(|meeting| meeting.id).max().unwrap_or(0) + 1;

        Self {
            meetings,
            requests,
            next_meeting_id,
        }
    }

    /// All calendar entries, in insertion order.
    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// All meeting requests, in insertion order.
    pub fn requests(&self) -> &[MeetingRequest] {
        &self.requests
    }

    /// Add an open availability slot to the calendar and return it.
    ///
    /// # Errors
    /// Returns [Error::SlotEndsBeforeStart] if `end` is not after `start`.
    pub fn add_availability(&mut self, date: Date, start: Time, end: Time) -> Result<Meeting, Error> {
        if end <= start {
            return Err(Error::SlotEndsBeforeStart);
        }

        let meeting = Meeting {
            id: self.next_meeting_id,
            title: "Available Slot".to_owned(),
            start: PrimitiveDateTime::new(date, start),
            end: PrimitiveDateTime::new(date, end),
            kind: MeetingKind::Availability,
            attendees: Vec::new(),
            description: None,
        };

        self.meetings.push(meeting.clone());
        self.next_meeting_id += 1;

        Ok(meeting)
    }

    /// Accept a pending meeting request.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a request, or
    /// [Error::RequestAlreadyResolved] if the request has already been
    /// answered.
    pub fn accept_request(&mut self, id: RequestId) -> Result<(), Error> {
        self.answer_request(id, RequestStatus::Accepted)
    }

    /// Decline a pending meeting request.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a request, or
    /// [Error::RequestAlreadyResolved] if the request has already been
    /// answered.
    pub fn decline_request(&mut self, id: RequestId) -> Result<(), Error> {
        self.answer_request(id, RequestStatus::Declined)
    }

    fn answer_request(&mut self, id: RequestId, answer: RequestStatus) -> Result<(), Error> {
        let request = self
            .requests
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or(Error::NotFound)?;

        if request.status != RequestStatus::Pending {
            return Err(Error::RequestAlreadyResolved);
        }

        request.status = answer;

        Ok(())
    }

    /// The requests that have not been answered yet.
    pub fn pending_requests(&self) -> Vec<&MeetingRequest> {
        self.requests
            .iter()
            .filter(|request| request.status == RequestStatus::Pending)
            .collect()
    }

    /// The next few confirmed meetings strictly after `now`, soonest first.
    pub fn upcoming_meetings(&self, now: PrimitiveDateTime) -> Vec<&Meeting> {
        let mut upcoming: Vec<&Meeting> = self
            .meetings
            .iter()
            .filter(|meeting| meeting.kind == MeetingKind::Confirmed && meeting.start > now)
            .collect();

        upcoming.sort_by_key(|meeting| meeting.start);
        upcoming.truncate(UPCOMING_MEETING_LIMIT);

        upcoming
    }
}

/// Parse an HH:MM time-of-day as posted by `<input type="time">`.
///
/// # Errors
/// Returns [Error::InvalidTimeOfDay] if the input does not match HH:MM.
pub fn parse_time_of_day(raw: &str) -> Result<Time, Error> {
    let invalid = || Error::InvalidTimeOfDay(raw.to_owned());

    let (hour, minute) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.parse().map_err(|_| invalid())?;
    let minute: u8 = minute.parse().map_err(|_| invalid())?;

    Time::from_hms(hour, minute, 0).map_err(|_| invalid())
}

#[cfg(test)]
mod schedule_tests {
    use time::macros::{date, datetime, time};

    use crate::{
        Error,
        calendar::{
            Meeting, MeetingKind, MeetingRequest, RequestStatus, Schedule, parse_time_of_day,
        },
    };

    fn confirmed_meeting(id: i64, start: time::PrimitiveDateTime) -> Meeting {
        Meeting {
            id,
            title: format!("Meeting {id}"),
            start,
            end: start + time::Duration::hours(1),
            kind: MeetingKind::Confirmed,
            attendees: vec!["John Investor".to_owned()],
            description: None,
        }
    }

    fn pending_request(id: i64) -> MeetingRequest {
        MeetingRequest {
            id,
            from: "Alex Johnson".to_owned(),
            title: "Investment Discussion".to_owned(),
            date: date!(2026 - 02 - 15),
            time: time!(14:00),
            status: RequestStatus::Pending,
        }
    }

    #[test]
    fn add_availability_appends_an_open_slot() {
        let mut schedule = Schedule::default();

        let slot = schedule
            .add_availability(date!(2026 - 02 - 13), time!(14:00), time!(15:00))
            .expect("Could not add slot");

        assert_eq!(slot.kind, MeetingKind::Availability);
        assert_eq!(slot.title, "Available Slot");
        assert_eq!(slot.start, datetime!(2026 - 02 - 13 14:00));
        assert_eq!(schedule.meetings(), [slot]);
    }

    #[test]
    fn add_availability_rejects_backwards_slots() {
        let mut schedule = Schedule::default();

        for end in [time!(13:00), time!(14:00)] {
            let result = schedule.add_availability(date!(2026 - 02 - 13), time!(14:00), end);

            assert_eq!(result, Err(Error::SlotEndsBeforeStart));
        }

        assert_eq!(schedule.meetings(), []);
    }

    #[test]
    fn accept_resolves_a_pending_request() {
        let mut schedule = Schedule::with_fixtures(vec![], vec![pending_request(1)]);

        schedule.accept_request(1).expect("Could not accept");

        assert_eq!(schedule.requests()[0].status, RequestStatus::Accepted);
        assert_eq!(schedule.pending_requests(), Vec::<&MeetingRequest>::new());
    }

    #[test]
    fn decline_resolves_a_pending_request() {
        let mut schedule = Schedule::with_fixtures(vec![], vec![pending_request(1)]);

        schedule.decline_request(1).expect("Could not decline");

        assert_eq!(schedule.requests()[0].status, RequestStatus::Declined);
    }

    #[test]
    fn answering_twice_fails() {
        let mut schedule = Schedule::with_fixtures(vec![], vec![pending_request(1)]);
        schedule.accept_request(1).unwrap();

        assert_eq!(
            schedule.decline_request(1),
            Err(Error::RequestAlreadyResolved)
        );
        assert_eq!(schedule.requests()[0].status, RequestStatus::Accepted);
    }

    #[test]
    fn answering_an_unknown_request_fails() {
        let mut schedule = Schedule::default();

        assert_eq!(schedule.accept_request(42), Err(Error::NotFound));
    }

    #[test]
    fn upcoming_meetings_are_confirmed_future_and_sorted() {
        let meetings = vec![
            confirmed_meeting(1, datetime!(2026 - 02 - 20 10:00)),
            confirmed_meeting(2, datetime!(2026 - 02 - 12 10:00)),
            // Already happened.
            confirmed_meeting(3, datetime!(2026 - 02 - 01 10:00)),
            Meeting {
                kind: MeetingKind::Availability,
                ..confirmed_meeting(4, datetime!(2026 - 02 - 14 10:00))
            },
        ];
        let schedule = Schedule::with_fixtures(meetings, vec![]);

        let upcoming = schedule.upcoming_meetings(datetime!(2026 - 02 - 11 09:00));

        let ids: Vec<i64> = upcoming.iter().map(|meeting| meeting.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn upcoming_meetings_are_capped() {
        let meetings = (1..=5)
            .map(|id| confirmed_meeting(id, datetime!(2026 - 03 - 01 10:00) + time::Duration::days(id)))
            .collect();
        let schedule = Schedule::with_fixtures(meetings, vec![]);

        let upcoming = schedule.upcoming_meetings(datetime!(2026 - 02 - 11 09:00));

        assert_eq!(upcoming.len(), 3);
    }

    #[test]
    fn with_fixtures_continues_the_id_sequences() {
        let mut schedule = Schedule::with_fixtures(
            vec![confirmed_meeting(3, datetime!(2026 - 02 - 12 10:00))],
            vec![pending_request(2)],
        );

        let slot = schedule
            .add_availability(date!(2026 - 02 - 13), time!(9:00), time!(10:00))
            .unwrap();

        assert_eq!(slot.id, 4);
    }

    #[test]
    fn parses_html_time_inputs() {
        assert_eq!(parse_time_of_day("14:30"), Ok(time!(14:30)));
        assert_eq!(parse_time_of_day("09:05"), Ok(time!(9:05)));
    }

    #[test]
    fn rejects_malformed_time_inputs() {
        for raw in ["", "2pm", "25:00", "14:60"] {
            assert_eq!(
                parse_time_of_day(raw),
                Err(Error::InvalidTimeOfDay(raw.to_owned())),
                "want {raw:?} to be rejected"
            );
        }
    }
}
