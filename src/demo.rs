//! The demo dataset the server boots with.
//!
//! State lives in memory only, so every start looks like a fresh session of
//! the platform: a funded wallet with some history, a few meetings, contracts
//! in various stages of signing, and a call log.

use time::macros::{date, datetime, time};

use crate::{
    AppState, Error,
    calendar::{Meeting, MeetingKind, MeetingRequest, RequestStatus, Schedule},
    document::{Document, DocumentKind, DocumentStatus, DocumentVault},
    settings::{Profile, UserSettings},
    video::{CallDirection, CallRecord, CallSession, Participant},
    wallet::{Cents, Transaction, TransactionKind, TransactionStatus, Wallet},
};

/// The account password the demo dataset starts with.
pub const DEMO_PASSWORD: &str = "venturedesk";

/// Build an [AppState] populated with the demo dataset.
///
/// # Errors
/// Returns an error if the demo password cannot be hashed.
pub fn demo_app_state(local_timezone: &str) -> Result<AppState, Error> {
    Ok(AppState::new(
        local_timezone,
        demo_wallet(),
        demo_schedule(),
        demo_documents(),
        demo_settings()?,
        demo_call_session(),
    ))
}

fn demo_wallet() -> Wallet {
    let transactions = vec![
        Transaction {
            id: 1,
            kind: TransactionKind::Deposit,
            amount: Cents::from_dollars(50_000),
            sender: None,
            receiver: None,
            status: TransactionStatus::Completed,
            date: date!(2026 - 02 - 10),
            description: "Bank transfer deposit".to_owned(),
        },
        Transaction {
            id: 2,
            kind: TransactionKind::Funding,
            amount: Cents::from_dollars(25_000),
            sender: Some("You".to_owned()),
            receiver: Some("TechWave AI".to_owned()),
            status: TransactionStatus::Completed,
            date: date!(2026 - 02 - 09),
            description: "Series A investment".to_owned(),
        },
        Transaction {
            id: 3,
            kind: TransactionKind::Withdraw,
            amount: Cents::from_dollars(10_000),
            sender: None,
            receiver: None,
            status: TransactionStatus::Completed,
            date: date!(2026 - 02 - 08),
            description: "Bank account withdrawal".to_owned(),
        },
        Transaction {
            id: 4,
            kind: TransactionKind::Transfer,
            amount: Cents::from_dollars(5_000),
            sender: Some("Sarah Johnson".to_owned()),
            receiver: Some("You".to_owned()),
            status: TransactionStatus::Completed,
            date: date!(2026 - 02 - 07),
            description: "Payment received".to_owned(),
        },
        Transaction {
            id: 5,
            kind: TransactionKind::Funding,
            amount: Cents::from_dollars(15_000),
            sender: Some("You".to_owned()),
            receiver: Some("GreenLife Solutions".to_owned()),
            status: TransactionStatus::Pending,
            date: date!(2026 - 02 - 11),
            description: "Seed round investment".to_owned(),
        },
    ];

    Wallet::with_history(Cents::from_dollars(125_000), transactions)
}

fn demo_schedule() -> Schedule {
    let meetings = vec![
        Meeting {
            id: 1,
            title: "Pitch Meeting with TechVentures".to_owned(),
            start: datetime!(2026 - 02 - 12 10:00),
            end: datetime!(2026 - 02 - 12 11:00),
            kind: MeetingKind::Confirmed,
            attendees: vec!["John Investor".to_owned()],
            description: Some("Series A funding discussion".to_owned()),
        },
        Meeting {
            id: 2,
            title: "Available Slot".to_owned(),
            start: datetime!(2026 - 02 - 13 14:00),
            end: datetime!(2026 - 02 - 13 15:00),
            kind: MeetingKind::Availability,
            attendees: Vec::new(),
            description: None,
        },
        Meeting {
            id: 3,
            title: "Q&A Session - GreenTech Startup".to_owned(),
            start: datetime!(2026 - 02 - 14 09:00),
            end: datetime!(2026 - 02 - 14 10:00),
            kind: MeetingKind::Pending,
            attendees: vec!["Sarah Entrepreneur".to_owned()],
            description: None,
        },
    ];

    let requests = vec![
        MeetingRequest {
            id: 1,
            from: "Alex Johnson".to_owned(),
            title: "Investment Discussion".to_owned(),
            date: date!(2026 - 02 - 15),
            time: time!(14:00),
            status: RequestStatus::Pending,
        },
        MeetingRequest {
            id: 2,
            from: "Maria Garcia".to_owned(),
            title: "Partnership Opportunity".to_owned(),
            date: date!(2026 - 02 - 16),
            time: time!(11:00),
            status: RequestStatus::Pending,
        },
    ];

    Schedule::with_fixtures(meetings, requests)
}

fn demo_documents() -> DocumentVault {
    let documents = vec![
        Document {
            id: 1,
            name: "Investment Agreement.pdf".to_owned(),
            kind: DocumentKind::Pdf,
            size_bytes: 2_516_582,
            last_modified: date!(2026 - 02 - 15),
            shared: true,
            status: DocumentStatus::Signed,
            signed_by: Some("John Investor".to_owned()),
        },
        Document {
            id: 2,
            name: "Term Sheet.pdf".to_owned(),
            kind: DocumentKind::Pdf,
            size_bytes: 1_887_437,
            last_modified: date!(2026 - 02 - 10),
            shared: false,
            status: DocumentStatus::InReview,
            signed_by: None,
        },
        Document {
            id: 3,
            name: "NDA Document.pdf".to_owned(),
            kind: DocumentKind::Pdf,
            size_bytes: 3_355_443,
            last_modified: date!(2026 - 02 - 05),
            shared: true,
            status: DocumentStatus::Draft,
            signed_by: None,
        },
    ];

    DocumentVault::with_fixtures(documents)
}

fn demo_settings() -> Result<UserSettings, Error> {
    let profile = Profile {
        name: "John Investor".to_owned(),
        email: "john@venturedesk.io".to_owned(),
        role: "Investor".to_owned(),
        location: Some("San Francisco, CA".to_owned()),
        bio: Some("Angel investor backing early-stage fintech and climate startups.".to_owned()),
    };

    UserSettings::with_password(profile, DEMO_PASSWORD)
}

fn demo_call_session() -> CallSession {
    let participants = vec![
        Participant {
            name: "Sarah Johnson".to_owned(),
            muted: false,
            camera_off: false,
        },
        Participant {
            name: "Michael Chen".to_owned(),
            muted: true,
            camera_off: false,
        },
    ];

    let recent_calls = vec![
        CallRecord {
            name: "Alex Thompson".to_owned(),
            date: date!(2026 - 02 - 10),
            duration_minutes: 45,
            direction: CallDirection::Incoming,
        },
        CallRecord {
            name: "Emma Wilson".to_owned(),
            date: date!(2026 - 02 - 09),
            duration_minutes: 30,
            direction: CallDirection::Outgoing,
        },
        CallRecord {
            name: "David Lee".to_owned(),
            date: date!(2026 - 02 - 08),
            duration_minutes: 75,
            direction: CallDirection::Incoming,
        },
    ];

    CallSession::with_fixtures(participants, recent_calls)
}
