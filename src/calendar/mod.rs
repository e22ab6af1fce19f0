//! Meeting scheduling: the calendar page, availability slots, and meeting
//! requests.

mod calendar_page;
mod core;
mod request_endpoints;
mod slot_endpoint;

pub use calendar_page::get_calendar_page;
pub use core::{
    Meeting, MeetingKind, MeetingRequest, RequestId, RequestStatus, Schedule, parse_time_of_day,
};
pub use request_endpoints::{accept_request_endpoint, decline_request_endpoint};
pub use slot_endpoint::add_slot_endpoint;

pub(crate) use calendar_page::fmt_time;
