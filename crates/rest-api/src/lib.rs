//! Realtime Register REST transport.
//!
//! Implements the [`registrar::Transport`] port over HTTPS and provides the
//! request executor ([`ApiClient`]) that every resource endpoint calls.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, header injection, per-attempt
//! timeouts, retry sequencing, and JSON encoding/decoding live here. Error
//! classification and retry decisions are delegated to [`registrar`].
//!
//! ## Composition
//!
//! ```text
//! ApiClient ──▶ RetryingTransport<HttpTransport, RetryPolicy> ──▶ reqwest
//!                     │                    │
//!                     └── RetryStrategy    └── registrar::classify
//! ```
//!
//! [`RetryingTransport`] is a decorator: it implements [`registrar::Transport`]
//! itself and can wrap any other implementation, which is how the tests
//! drive it with scripted outcomes.

mod client;
mod http;
mod paths;
mod resources;
mod retrying;

pub use client::ApiClient;
pub use http::HttpTransport;
pub use retrying::RetryingTransport;
