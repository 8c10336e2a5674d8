//! Maps failures onto user-facing messages and process exit codes.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | any other failure |
//! | 2 | usage or validation |
//! | 3 | authentication |
//! | 4 | API error |
//! | 5 | rate limited |
//! | 6 | not found |
//! | 7 | transport (network, timeout, deadline, decode) |
//! | 8 | bulk-check protocol |

use std::fmt::Write as _;

use isproxy::{BatchError, IsProxyError};
use registrar::ClassifiedError;
use thiserror::Error;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_AUTH: u8 = 3;
pub const EXIT_API: u8 = 4;
pub const EXIT_RATE_LIMITED: u8 = 5;
pub const EXIT_NOT_FOUND: u8 = 6;
pub const EXIT_TRANSPORT: u8 = 7;
pub const EXIT_BULK_PROTOCOL: u8 = 8;

/// Failures raised by the CLI itself, before any request is made.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("not authenticated")]
    MissingApiKey,

    #[error("no customer handle configured")]
    MissingCustomer,

    #[error("{0}")]
    Usage(String),
}

/// Exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<ClassifiedError>() {
        return classified_code(err);
    }
    if let Some(err) = err.downcast_ref::<BatchError>() {
        return isproxy_code(&err.error);
    }
    if let Some(err) = err.downcast_ref::<IsProxyError>() {
        return isproxy_code(err);
    }
    match err.downcast_ref::<CliError>() {
        Some(CliError::MissingApiKey) => EXIT_AUTH,
        Some(CliError::MissingCustomer | CliError::Usage(_)) => EXIT_USAGE,
        None => EXIT_FAILURE,
    }
}

fn classified_code(err: &ClassifiedError) -> u8 {
    match err {
        ClassifiedError::Auth { .. } => EXIT_AUTH,
        ClassifiedError::NotFound { .. } => EXIT_NOT_FOUND,
        ClassifiedError::RateLimited { .. } => EXIT_RATE_LIMITED,
        ClassifiedError::Generic { .. } => EXIT_API,
        ClassifiedError::Transport { .. } => EXIT_TRANSPORT,
        ClassifiedError::Validation { .. } => EXIT_USAGE,
    }
}

fn isproxy_code(err: &IsProxyError) -> u8 {
    match err {
        IsProxyError::HandshakeFailed { .. } => EXIT_AUTH,
        IsProxyError::InvalidDomain { .. } | IsProxyError::InvalidHost { .. } => EXIT_USAGE,
        IsProxyError::Connect { .. }
        | IsProxyError::Tls(_)
        | IsProxyError::Io(_)
        | IsProxyError::Timeout => EXIT_TRANSPORT,
        IsProxyError::ProtocolViolation { .. }
        | IsProxyError::ConnectionClosed
        | IsProxyError::InvalidState { .. } => EXIT_BULK_PROTOCOL,
    }
}

/// Human-readable report for stderr, always newline-terminated.
pub fn render(err: &anyhow::Error) -> String {
    let mut out = String::new();

    if let Some(err) = err.downcast_ref::<ClassifiedError>() {
        render_classified(&mut out, err);
        return out;
    }

    match err.downcast_ref::<CliError>() {
        Some(CliError::MissingApiKey) => {
            out.push_str("Error: Not authenticated.\n\n");
            out.push_str("Set your API key:\n");
            out.push_str("  export RR_API_KEY=your-api-key\n");
        }
        Some(CliError::MissingCustomer) => {
            out.push_str("Error: No customer handle configured.\n\n");
            out.push_str("Pass --customer or set:\n");
            out.push_str("  export RR_CUSTOMER=your-customer-handle\n");
        }
        _ => {
            let _ = writeln!(out, "Error: {err:#}");
        }
    }
    out
}

fn render_classified(out: &mut String, err: &ClassifiedError) {
    match err {
        ClassifiedError::Auth { message, .. } => {
            out.push_str("Error: Authentication failed.\n\n");
            let _ = writeln!(out, "Details: {message}\n");
            out.push_str("Check that RR_API_KEY holds a valid key.\n");
        }
        ClassifiedError::NotFound { message } => {
            let _ = writeln!(out, "Error: {message}");
        }
        ClassifiedError::RateLimited { retry_after, .. } => {
            out.push_str("Error: Rate limited by API.\n\n");
            let _ = writeln!(out, "Retry after: {} seconds", retry_after.as_secs());
        }
        ClassifiedError::Generic {
            status,
            message,
            code,
        } => {
            let _ = writeln!(out, "Error: API error ({status})\n");
            let _ = writeln!(out, "Message: {message}");
            if let Some(code) = code {
                let _ = writeln!(out, "Code: {code}");
            }
        }
        ClassifiedError::Transport { .. } | ClassifiedError::Validation { .. } => {
            let _ = writeln!(out, "Error: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use registrar::{CheckResult, TransportFailure};

    use super::*;

    #[test]
    fn classified_errors_map_to_distinct_codes() {
        let cases = [
            (
                ClassifiedError::Auth {
                    status: 401,
                    message: "x".into(),
                },
                EXIT_AUTH,
            ),
            (
                ClassifiedError::NotFound {
                    message: "x".into(),
                },
                EXIT_NOT_FOUND,
            ),
            (
                ClassifiedError::RateLimited {
                    retry_after: Duration::from_secs(3),
                    message: "x".into(),
                },
                EXIT_RATE_LIMITED,
            ),
            (
                ClassifiedError::Generic {
                    status: 500,
                    message: "x".into(),
                    code: None,
                },
                EXIT_API,
            ),
            (
                ClassifiedError::transport(TransportFailure::Network, "refused"),
                EXIT_TRANSPORT,
            ),
            (ClassifiedError::validation("bad"), EXIT_USAGE),
        ];
        for (err, code) in cases {
            assert_eq!(exit_code(&anyhow::Error::new(err)), code);
        }
    }

    #[test]
    fn batch_error_uses_the_inner_cause() {
        let err = BatchError {
            completed: vec![CheckResult {
                domain: "a".into(),
                tld: "com".into(),
                available: true,
                price: None,
            }],
            error: IsProxyError::ProtocolViolation { line: "?".into() },
        };
        assert_eq!(exit_code(&anyhow::Error::new(err)), EXIT_BULK_PROTOCOL);
    }

    #[test]
    fn cli_errors_and_unknown_errors() {
        assert_eq!(exit_code(&CliError::MissingApiKey.into()), EXIT_AUTH);
        assert_eq!(exit_code(&CliError::Usage("x".into()).into()), EXIT_USAGE);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), EXIT_FAILURE);
    }

    #[test]
    fn rate_limit_report_names_the_wait() {
        let err = anyhow::Error::new(ClassifiedError::RateLimited {
            retry_after: Duration::from_secs(12),
            message: "slow down".into(),
        });
        assert_eq!(
            render(&err),
            "Error: Rate limited by API.\n\nRetry after: 12 seconds\n"
        );
    }

    #[test]
    fn not_found_is_verbatim() {
        let err = anyhow::Error::new(ClassifiedError::NotFound {
            message: "Domain not found".into(),
        });
        assert_eq!(render(&err), "Error: Domain not found\n");
    }

    #[test]
    fn generic_report_includes_status_and_code() {
        let err = anyhow::Error::new(ClassifiedError::Generic {
            status: 400,
            message: "invalid period".into(),
            code: Some(2003),
        });
        assert_eq!(
            render(&err),
            "Error: API error (400)\n\nMessage: invalid period\nCode: 2003\n"
        );
    }

    #[test]
    fn missing_key_report_names_the_variable() {
        assert!(render(&CliError::MissingApiKey.into()).contains("RR_API_KEY"));
    }
}
