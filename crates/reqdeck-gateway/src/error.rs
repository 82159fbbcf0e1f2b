//! Maps transport failures and error bodies into [`AppError`].

use reqdeck_core::error::{AppError, ErrorKind};
use reqdeck_core::types::ApiErrorBody;

/// Message used when the server could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

/// Convert a `reqwest` failure into an application error.
pub fn from_reqwest(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::with_source(ErrorKind::Network, "Request timed out", err)
    } else if err.is_connect() || err.is_request() {
        AppError::with_source(ErrorKind::Network, NETWORK_ERROR_MESSAGE, err)
    } else if err.is_decode() {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Malformed response body: {err}"),
            err,
        )
    } else {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Network, message, err)
    }
}

/// Build the error for a non-success response.
///
/// Uses the body's `message` field verbatim when present, otherwise a
/// generic status message.
pub fn from_error_body(status: u16, body: &[u8]) -> AppError {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {status}"));
    AppError::from_status(status, message)
}
