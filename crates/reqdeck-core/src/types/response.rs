//! Envelopes for remote gateway calls.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Result of a gateway call: an HTTP-style status and the decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse<T> {
    /// HTTP-style status code.
    pub status: u16,
    /// Decoded response payload.
    pub data: T,
}

impl<T> GatewayResponse<T> {
    /// Wrap a payload with its status.
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }

    /// Shorthand for a `200 OK` response.
    pub fn ok(data: T) -> Self {
        Self::new(200, data)
    }

    /// Shorthand for a `201 Created` response.
    pub fn created(data: T) -> Self {
        Self::new(201, data)
    }

    /// Only 200 and 201 count as success for flows that branch on status.
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Return the payload if the status is a success, else an error of the
    /// kind the status maps to.
    pub fn into_result(self) -> AppResult<T> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(AppError::from_status(
                self.status,
                format!("Request failed with status code {}", self.status),
            ))
        }
    }
}

/// Error body returned by the REST API on failure.
///
/// Only `message` is relied on; it is forwarded verbatim to notifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable error code, when the server sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
