//! Realtime Register bulk availability client.
//!
//! Speaks the registrar's line protocol over one long-lived TLS socket so that
//! many domains can be checked without one HTTPS round trip each:
//!
//! ```text
//! > AUTH <api-key>
//! < OK
//! > CHECK example com
//! < example.com AVAILABLE 9.95
//! > QUIT
//! ```
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Socket setup, TLS, line framing, and the session state
//! machine live here. Results are returned as [`registrar::CheckResult`]; this
//! crate never touches the REST executor.
//!
//! ## Session lifecycle
//!
//! ```text
//! Disconnected ──▶ Connecting ──▶ Authenticated ──▶ Closed
//!                      │                               ▲
//!                      └──────── handshake failure ────┘
//! ```
//!
//! Any I/O or protocol error while `Authenticated` closes the socket before
//! the error is returned. A session owns its socket exclusively; run several
//! sessions for concurrent checks.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`client`] | `IsProxyClient`, `SessionState`, `open_tls` |
//! | [`config`] | `IsProxyConfig` |
//! | [`error`] | `IsProxyError`, `BatchError` |
//! | [`protocol`] | Line formatting and response parsing |

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

pub use client::{open_tls, IsProxyClient, SessionState};
pub use config::{IsProxyConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{BatchError, IsProxyError};
pub use protocol::{parse_check_line, split_domain};
