//! Maps a non-2xx HTTP response onto a [`ClassifiedError`].
//!
//! | status | variant |
//! |--------|---------|
//! | 401, 403 | [`ClassifiedError::Auth`] |
//! | 404 | [`ClassifiedError::NotFound`] |
//! | 429 | [`ClassifiedError::RateLimited`] |
//! | anything else | [`ClassifiedError::Generic`] |
//!
//! Classification never fails. A missing or unparsable body degrades to the
//! message [`UNKNOWN_ERROR`].

use std::time::Duration;

use serde::Deserialize;

use crate::ClassifiedError;

/// Message used when the error body is absent, unparsable, or has no message.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Wire shape of a registrar error body:
/// `{ "error": { "code": 400, "message": "Domain not found" } }`.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Classifies a non-2xx response from its status code and raw body.
pub fn classify(status: u16, body: &[u8]) -> ClassifiedError {
    let detail = serde_json::from_slice::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_default();

    let message = detail
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

    match status {
        401 | 403 => ClassifiedError::Auth { status, message },
        404 => ClassifiedError::NotFound { message },
        429 => ClassifiedError::RateLimited {
            retry_after: retry_after(body),
            message,
        },
        _ => ClassifiedError::Generic {
            status,
            message,
            code: detail.code,
        },
    }
}

/// Extracts the top-level numeric `retry_after` field (seconds).
///
/// Returns zero when the body is not a JSON object, the field is missing, or
/// the value is not a non-negative finite number.
fn retry_after(body: &[u8]) -> Duration {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) else {
        return Duration::ZERO;
    };

    map.get("retry_after")
        .and_then(serde_json::Value::as_f64)
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        // Whole seconds.
        .map(|secs| Duration::from_secs(secs.trunc() as u64))
        .unwrap_or(Duration::ZERO)
}
