//! Errors raised by a bulk-check session.

use registrar::CheckResult;
use thiserror::Error;

use crate::SessionState;

/// A failed session operation.
#[derive(Debug, Error)]
pub enum IsProxyError {
    /// TCP connect failed.
    #[error("connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured host is not a valid TLS server name.
    #[error("invalid server name {host:?}")]
    InvalidHost { host: String },

    /// TLS setup or handshake failed.
    #[error("tls: {0}")]
    Tls(#[source] std::io::Error),

    /// The server answered `AUTH` with something other than `OK`.
    #[error("handshake failed: {response}")]
    HandshakeFailed { response: String },

    /// The server sent a line that does not follow the protocol.
    #[error("invalid response line: {line:?}")]
    ProtocolViolation { line: String },

    /// The server closed the connection mid-exchange.
    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    /// Connect, handshake, or an exchange exceeded the configured timeout.
    #[error("timed out waiting for the bulk-check server")]
    Timeout,

    /// An input was not of the form `name.tld`.
    #[error("invalid domain format: {input:?} (expected name.tld)")]
    InvalidDomain { input: String },

    /// The operation is not valid in the current session state.
    #[error("session is {actual}, expected {expected}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },
}

impl IsProxyError {
    /// True when the server refused the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::HandshakeFailed { .. })
    }
}

/// A batch check that stopped early.
///
/// `completed` holds the results obtained before `error`, in input order.
#[derive(Debug, Error)]
#[error("bulk check stopped after {} result(s): {error}", .completed.len())]
pub struct BatchError {
    pub completed: Vec<CheckResult>,
    #[source]
    pub error: IsProxyError,
}
