//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/documents/{document_id}',
//! use [format_endpoint].

/// The root route which redirects to the payments page.
pub const ROOT: &str = "/";
/// The page for the wallet: balance, quick actions, and transaction history.
pub const PAYMENTS_VIEW: &str = "/payments";
/// The page for the meeting calendar and availability.
pub const CALENDAR_VIEW: &str = "/calendar";
/// The page for the document chamber.
pub const DOCUMENTS_VIEW: &str = "/documents";
/// The page for account settings.
pub const SETTINGS_VIEW: &str = "/settings";
/// The page for video calls.
pub const VIDEO_VIEW: &str = "/video";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to deposit funds into the wallet.
pub const DEPOSIT_API: &str = "/api/wallet/deposit";
/// The route to withdraw funds from the wallet.
pub const WITHDRAW_API: &str = "/api/wallet/withdraw";
/// The route to transfer funds to another user.
pub const TRANSFER_API: &str = "/api/wallet/transfer";
/// The route to fund a startup's deal.
pub const FUNDING_API: &str = "/api/wallet/funding";

/// The route to add an availability slot to the calendar.
pub const NEW_SLOT_API: &str = "/api/calendar/slots";
/// The route to accept a meeting request.
pub const ACCEPT_REQUEST_API: &str = "/api/calendar/requests/{request_id}/accept";
/// The route to decline a meeting request.
pub const DECLINE_REQUEST_API: &str = "/api/calendar/requests/{request_id}/decline";

/// The route to upload documents.
pub const UPLOAD_DOCUMENT_API: &str = "/api/documents";
/// The route to sign a document.
pub const SIGN_DOCUMENT_API: &str = "/api/documents/{document_id}/sign";
/// The route to toggle sharing of a document.
pub const SHARE_DOCUMENT_API: &str = "/api/documents/{document_id}/share";
/// The route to delete a document.
pub const DELETE_DOCUMENT_API: &str = "/api/documents/{document_id}";

/// The route to update the user's profile.
pub const PROFILE_API: &str = "/api/settings/profile";
/// The route to change the user's password.
pub const PASSWORD_API: &str = "/api/settings/password";
/// The route to enable (POST) or disable (DELETE) two-factor authentication.
pub const TWO_FACTOR_API: &str = "/api/settings/two_factor";

/// The route to start a call.
pub const START_CALL_API: &str = "/api/video/start";
/// The route to end the active call.
pub const END_CALL_API: &str = "/api/video/end";
/// The route to toggle a media control during a call.
pub const TOGGLE_MEDIA_API: &str = "/api/video/toggle";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/api/documents/{document_id}/sign',
/// '{document_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter. If no parameter is found in
/// `endpoint_path`, the original path is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
