//! Core domain for the Realtime Register client.
//!
//! This crate holds every concept shared by the transport crates: the closed
//! error taxonomy, the status-code classifier, the retry policy, the per-call
//! deadline, the "execute one request" port, newtype identifiers, and the
//! plain value types that travel over the wire.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate performs no network I/O.
//! `rest-api` implements [`Transport`] over HTTP; `isproxy` implements the
//! bulk-check socket protocol and returns [`CheckResult`]s.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`errors`] | `ClassifiedError`, `ErrorKind`, `TransportFailure` |
//! | [`classify`] | status code + body → `ClassifiedError` |
//! | [`retry`] | `RetryPolicy`, `RetryDecision`, `RetryStrategy` |
//! | [`deadline`] | `Deadline` |
//! | [`transport`] | `Transport` port, `ApiRequest`, `ApiResponse` |
//! | [`config`] | `ClientConfig`, `Environment` |
//! | [`identifiers`] | `DomainName`, `ZoneId`, `ApiKey`, etc. |
//! | [`types`] | Resource value types, pagination, `CheckResult` |

pub mod classify;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod identifiers;
pub mod retry;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classify::{classify, UNKNOWN_ERROR};
pub use config::{ClientConfig, Environment, PRODUCTION_URL, SANDBOX_URL};
pub use deadline::Deadline;
pub use errors::{ClassifiedError, ErrorKind, TransportFailure};
pub use identifiers::{
    ApiKey, CallId, ContactHandle, CustomerHandle, DomainName, ProcessId, Tld, ZoneId,
};
pub use retry::{RetryDecision, RetryPolicy, RetryStrategy};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
pub use types::{
    CheckResult, Contact, ContactRequest, CreateZoneResponse, DnsRecord, Domain,
    DomainAvailability, DomainListOptions, ListOptions, ListResponse, Pagination, Pricelist,
    PricelistEntry, Process, ProcessInfo, ProcessListOptions, RegisterRequest, RenewRequest,
    SearchParam, Timestamp, TldInfo, TransferRequest, UpdateRequest, Zone, ZoneRequest,
};
