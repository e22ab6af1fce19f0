//! The video call session: lobby state, in-call media toggles, and the
//! recent call log.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Whether a past call was placed or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum CallDirection {
    /// The other party called.
    Incoming,
    /// This account called.
    Outgoing,
}

impl CallDirection {
    /// The direction as display text, e.g. "Incoming".
    pub fn label(self) -> &'static str {
        match self {
            CallDirection::Incoming => "Incoming",
            CallDirection::Outgoing => "Outgoing",
        }
    }
}

/// An entry in the recent call log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Who the call was with.
    pub name: String,
    /// The day the call happened.
    pub date: Date,
    /// How long the call lasted.
    pub duration_minutes: u32,
    /// Whether the call was placed or received.
    pub direction: CallDirection,
}

/// Someone on the other side of an active call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant's display name.
    pub name: String,
    /// Whether the participant has muted themselves.
    pub muted: bool,
    /// Whether the participant has switched their camera off.
    pub camera_off: bool,
}

/// A media control that can be toggled during a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaControl {
    /// The user's own camera.
    Camera,
    /// The user's own microphone.
    Microphone,
    /// Screen sharing.
    Screen,
}

/// The in-memory holder of the call session.
///
/// There is no media transport behind this screen; the session only tracks
/// which controls the user has switched on.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSession {
    active: bool,
    camera_on: bool,
    microphone_on: bool,
    screen_sharing: bool,
    participants: Vec<Participant>,
    recent_calls: Vec<CallRecord>,
}

impl Default for CallSession {
    fn default() -> Self {
        Self::with_fixtures(Vec::new(), Vec::new())
    }
}

impl CallSession {
    /// Create a session with pre-existing participants and call log. Used to
    /// seed fixture data.
    pub fn with_fixtures(participants: Vec<Participant>, recent_calls: Vec<CallRecord>) -> Self {
        Self {
            active: false,
            camera_on: true,
            microphone_on: true,
            screen_sharing: false,
            participants,
            recent_calls,
        }
    }

    /// Whether a call is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the user's camera is on.
    pub fn camera_on(&self) -> bool {
        self.camera_on
    }

    /// Whether the user's microphone is on.
    pub fn microphone_on(&self) -> bool {
        self.microphone_on
    }

    /// Whether the user is sharing their screen.
    pub fn screen_sharing(&self) -> bool {
        self.screen_sharing
    }

    /// The other people on the call.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Past calls, most recent first.
    pub fn recent_calls(&self) -> &[CallRecord] {
        &self.recent_calls
    }

    /// Join the call.
    pub fn start_call(&mut self) {
        self.active = true;
    }

    /// Leave the call and reset the media toggles for the next one.
    pub fn end_call(&mut self) {
        self.active = false;
        self.camera_on = true;
        self.microphone_on = true;
        self.screen_sharing = false;
    }

    /// Flip a media control, returning its new state.
    ///
    /// # Errors
    /// Returns [Error::NoActiveCall] if no call is running.
    pub fn toggle(&mut self, control: MediaControl) -> Result<bool, Error> {
        if !self.active {
            return Err(Error::NoActiveCall);
        }

        let toggled = match control {
            MediaControl::Camera => {
                self.camera_on = !self.camera_on;
                self.camera_on
            }
            MediaControl::Microphone => {
                self.microphone_on = !self.microphone_on;
                self.microphone_on
            }
            MediaControl::Screen => {
                self.screen_sharing = !self.screen_sharing;
                self.screen_sharing
            }
        };

        Ok(toggled)
    }
}

#[cfg(test)]
mod call_session_tests {
    use crate::{
        Error,
        video::{CallSession, MediaControl},
    };

    #[test]
    fn a_new_session_is_idle_with_media_on() {
        let session = CallSession::default();

        assert!(!session.is_active());
        assert!(session.camera_on());
        assert!(session.microphone_on());
        assert!(!session.screen_sharing());
    }

    #[test]
    fn toggles_require_an_active_call() {
        let mut session = CallSession::default();

        assert_eq!(
            session.toggle(MediaControl::Camera),
            Err(Error::NoActiveCall)
        );
    }

    #[test]
    fn toggles_flip_during_a_call() {
        let mut session = CallSession::default();
        session.start_call();

        assert_eq!(session.toggle(MediaControl::Camera), Ok(false));
        assert_eq!(session.toggle(MediaControl::Camera), Ok(true));
        assert_eq!(session.toggle(MediaControl::Screen), Ok(true));
        assert_eq!(session.toggle(MediaControl::Microphone), Ok(false));
    }

    #[test]
    fn ending_a_call_resets_the_toggles() {
        let mut session = CallSession::default();
        session.start_call();
        session.toggle(MediaControl::Camera).unwrap();
        session.toggle(MediaControl::Screen).unwrap();

        session.end_call();

        assert!(!session.is_active());
        assert!(session.camera_on());
        assert!(session.microphone_on());
        assert!(!session.screen_sharing());
    }
}
