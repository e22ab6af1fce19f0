//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    calendar::Schedule,
    document::DocumentVault,
    settings::UserSettings,
    video::CallSession,
    wallet::{Cents, Wallet},
};

/// The starting password for a server started without demo fixtures.
const EMPTY_STATE_PASSWORD: &str = "venturedesk";

/// The state of the REST server.
///
/// Every store is guarded by its own mutex: `apply`-style mutations are
/// read-modify-write operations on shared state, so each store needs a single
/// mutual-exclusion boundary even though handlers currently run one at a
/// time per request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The wallet ledger: balance and transaction history.
    pub wallet: Arc<Mutex<Wallet>>,

    /// Meetings, availability slots, and meeting requests.
    pub schedule: Arc<Mutex<Schedule>>,

    /// The document chamber.
    pub documents: Arc<Mutex<DocumentVault>>,

    /// The current user's profile and security settings.
    pub settings: Arc<Mutex<UserSettings>>,

    /// The video call session.
    pub call: Arc<Mutex<CallSession>>,
}

impl AppState {
    /// Create a new [AppState] from pre-built stores.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    pub fn new(
        local_timezone: &str,
        wallet: Wallet,
        schedule: Schedule,
        documents: DocumentVault,
        settings: UserSettings,
        call: CallSession,
    ) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            wallet: Arc::new(Mutex::new(wallet)),
            schedule: Arc::new(Mutex::new(schedule)),
            documents: Arc::new(Mutex::new(documents)),
            settings: Arc::new(Mutex::new(settings)),
            call: Arc::new(Mutex::new(call)),
        }
    }

    /// Create a new [AppState] with empty stores and a zero balance.
    ///
    /// The account password starts as "venturedesk".
    ///
    /// # Errors
    /// Returns an error if the starting password cannot be hashed.
    pub fn empty(local_timezone: &str) -> Result<Self, Error> {
        let settings = UserSettings::with_password(Default::default(), EMPTY_STATE_PASSWORD)?;

        Ok(Self::new(
            local_timezone,
            Wallet::new(Cents::ZERO),
            Schedule::default(),
            DocumentVault::default(),
            settings,
            CallSession::default(),
        ))
    }
}
