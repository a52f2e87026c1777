//! Failure taxonomy shared by every gateway port.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by gateway adapters.
    pub enum GatewayError {
        /// The request never produced a usable response (network down,
        /// connection refused, server-side failure).
        Connectivity { message: String } =>
            "gateway unreachable: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "gateway timed out: {message}",
        /// The server understood the request and refused it. `detail` holds the
        /// server's human-readable message, or is empty when none was sent.
        Rejected { status: u16, detail: String } =>
            "gateway rejected request with status {status}: {detail}",
        /// The requested resource does not exist.
        NotFound { message: String } =>
            "resource not found: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "gateway response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } =>
            "gateway request invalid: {message}",
    }
}

impl GatewayError {
    /// Timeout or transport failure, as opposed to a server verdict.
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. } | Self::Timeout { .. })
    }

    /// Server-provided message suitable for display, when one was sent.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } if !detail.trim().is_empty() => Some(detail.as_str()),
            _ => None,
        }
    }
}
