//! VentureDesk is a collaboration platform for investors and entrepreneurs:
//! a wallet with a transaction ledger, meeting scheduling, a document chamber
//! with e-signatures, account settings, and a video call lobby.
//!
//! This library provides a REST API that directly serves HTML pages. All
//! state is held in memory for the lifetime of the server process; nothing is
//! persisted to disk.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod calendar;
mod demo;
mod document;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod settings;
#[cfg(test)]
mod test_utils;
mod timezone;
mod video;
mod wallet;

pub use app_state::AppState;
pub use demo::demo_app_state;
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{alert::Alert, internal_server_error::render_internal_server_error};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then tells the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount entered for a wallet mutation is missing, not a number, has
    /// more than two decimal places, or is not positive.
    ///
    /// Carries the raw input so it can be echoed back to the user.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A withdrawal, transfer, or funding request asked for more money than
    /// the wallet holds.
    #[error("the requested amount exceeds the available balance")]
    InsufficientBalance,

    /// A transfer or funding request was submitted without a counterparty
    /// name.
    #[error("a recipient name is required")]
    MissingRecipient,

    /// An availability slot was submitted whose end time is not after its
    /// start time.
    #[error("the slot must end after it starts")]
    SlotEndsBeforeStart,

    /// A time-of-day field could not be parsed as HH:MM.
    ///
    /// Carries the raw input so it can be echoed back to the user.
    #[error("\"{0}\" is not a valid time of day")]
    InvalidTimeOfDay(String),

    /// The meeting request has already been accepted or declined.
    #[error("the meeting request has already been answered")]
    RequestAlreadyResolved,

    /// An uploaded file is not one of the supported document types.
    ///
    /// Carries the rejected file name.
    #[error("\"{0}\" is not a supported document type")]
    UnsupportedFileType(String),

    /// An uploaded document part had no file name.
    #[error("the uploaded document has no file name")]
    EmptyDocumentName,

    /// The signature field was left empty when signing a document.
    #[error("a signature is required to sign a document")]
    MissingSignature,

    /// Tried to sign a document that has already been signed.
    #[error("the document has already been signed")]
    DocumentAlreadySigned,

    /// A required profile field was submitted empty.
    ///
    /// Carries the name of the offending field.
    #[error("the {0} field cannot be empty")]
    MissingProfileField(&'static str),

    /// The current password entered when changing the password was wrong.
    #[error("invalid password")]
    InvalidCredentials,

    /// The new password and its confirmation do not match.
    #[error("the new password and its confirmation do not match")]
    PasswordMismatch,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server
    /// error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The one-time code entered for two-factor setup is not six digits.
    #[error("the verification code must be six digits")]
    InvalidOtp,

    /// A call control was toggled while no call was active.
    #[error("there is no active call")]
    NoActiveCall,

    /// The multipart form could not be parsed as an uploaded document.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the lock guarding one of the in-memory stores.
    #[error("could not acquire the state lock")]
    StateLockError,

    /// An error occurred while getting the local timezone from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => not_found::get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            Error::StateLockError => render_internal_server_error(
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (message, status_code) = match &self {
            Error::InvalidAmount(_) => ("Invalid amount", StatusCode::BAD_REQUEST),
            Error::InsufficientBalance => ("Insufficient balance", StatusCode::BAD_REQUEST),
            Error::MissingRecipient => ("Missing recipient", StatusCode::BAD_REQUEST),
            Error::SlotEndsBeforeStart => ("Invalid availability slot", StatusCode::BAD_REQUEST),
            Error::InvalidTimeOfDay(_) => ("Invalid time", StatusCode::BAD_REQUEST),
            Error::RequestAlreadyResolved => ("Request already answered", StatusCode::BAD_REQUEST),
            Error::UnsupportedFileType(_) => ("Unsupported file type", StatusCode::BAD_REQUEST),
            Error::EmptyDocumentName => ("Missing file name", StatusCode::BAD_REQUEST),
            Error::MissingSignature => ("Missing signature", StatusCode::BAD_REQUEST),
            Error::DocumentAlreadySigned => ("Already signed", StatusCode::BAD_REQUEST),
            Error::MissingProfileField(_) => ("Incomplete profile", StatusCode::BAD_REQUEST),
            Error::InvalidCredentials => ("Wrong password", StatusCode::BAD_REQUEST),
            Error::PasswordMismatch => ("Passwords do not match", StatusCode::BAD_REQUEST),
            Error::TooWeak(_) => ("Password too weak", StatusCode::BAD_REQUEST),
            Error::InvalidOtp => ("Invalid code", StatusCode::BAD_REQUEST),
            Error::NoActiveCall => ("No active call", StatusCode::BAD_REQUEST),
            Error::NotFound => ("Not found", StatusCode::NOT_FOUND),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    }
                    .into_html(),
                )
                    .into_response();
            }
        };

        (
            status_code,
            Alert::Error {
                message: message.to_owned(),
                details: self.to_string(),
            }
            .into_html(),
        )
            .into_response()
    }
}
