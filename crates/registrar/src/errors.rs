//! The closed set of failures produced by the transport layer.
//!
//! Every non-2xx response and every transport failure is converted into
//! exactly one [`ClassifiedError`] before it reaches a caller. Consumers
//! switch exhaustively over [`ClassifiedError`] (or over the field-less
//! [`ErrorKind`]) instead of inspecting concrete error types at runtime.
//!
//! Retry semantics are not decided here; see [`crate::retry`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport failure sub-kinds
// ---------------------------------------------------------------------------

/// Why a request failed before (or instead of) producing a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFailure {
    /// Connection refused, reset, DNS failure, or any I/O error mid-exchange.
    Network,
    /// A single attempt exceeded its own timeout.
    Timeout,
    /// The overall per-call deadline elapsed. Never retried.
    DeadlineExceeded,
    /// A 2xx body did not match the expected shape. Never retried.
    Decode,
}

impl TransportFailure {
    /// Returns `true` if a fresh attempt could plausibly succeed.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::DeadlineExceeded => "deadline exceeded",
            Self::Decode => "decode",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Classified errors
// ---------------------------------------------------------------------------

/// A typed failure outcome of one logical API call.
///
/// Exactly one variant is populated per instance. Variants that came from an
/// HTTP response keep the server's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedError {
    /// The server rejected the credential (HTTP 401 or 403).
    #[error("authentication failed: {message}")]
    Auth {
        /// 401 or 403.
        status: u16,
        /// Message from the error body, or `"unknown error"`.
        message: String,
    },

    /// The addressed resource does not exist (HTTP 404).
    #[error("not found: {message}")]
    NotFound {
        /// Message from the error body, or `"unknown error"`.
        message: String,
    },

    /// The server asked the client to slow down (HTTP 429).
    #[error("rate limited: retry after {}s", .retry_after.as_secs())]
    RateLimited {
        /// Server-supplied `retry_after`; zero when absent or non-numeric.
        retry_after: Duration,
        /// Message from the error body, or `"unknown error"`.
        message: String,
    },

    /// Any other non-2xx response.
    #[error("api error ({status}): {message}")]
    Generic {
        /// The HTTP status code.
        status: u16,
        /// Message from the error body, or `"unknown error"`.
        message: String,
        /// `error.code` from the body, when present.
        code: Option<i64>,
    },

    /// The request failed before a status code was obtained, or its success
    /// body could not be decoded.
    #[error("transport failure ({failure}): {message}")]
    Transport {
        /// Sub-kind used by the retry policy.
        failure: TransportFailure,
        /// Human-readable description of the underlying failure.
        message: String,
    },

    /// Malformed input detected locally; nothing was sent.
    #[error("validation: {}", validation_text(.field.as_deref(), .message))]
    Validation {
        /// Name of the offending field, when one can be identified.
        field: Option<String>,
        /// What was wrong.
        message: String,
    },
}

fn validation_text(field: Option<&str>, message: &str) -> String {
    match field {
        Some(field) => format!("{field} {message}"),
        None => message.to_string(),
    }
}

/// Field-less discriminant of [`ClassifiedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    NotFound,
    RateLimited,
    Generic,
    Transport,
    Validation,
}

impl ClassifiedError {
    /// Builds a [`ClassifiedError::Transport`].
    pub fn transport(failure: TransportFailure, message: impl Into<String>) -> Self {
        Self::Transport {
            failure,
            message: message.into(),
        }
    }

    /// Builds a [`ClassifiedError::Validation`] without a field name.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Returns the discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth { .. } => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Generic { .. } => ErrorKind::Generic,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Generic { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Transport { .. } | Self::Validation { .. } => None,
        }
    }

    /// Returns the server (or local) message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Auth { message, .. }
            | Self::NotFound { message }
            | Self::RateLimited { message, .. }
            | Self::Generic { message, .. }
            | Self::Transport { message, .. }
            | Self::Validation { message, .. } => message,
        }
    }
}
