//! Per-resource request builders.
//!
//! Each module adds inherent methods to [`crate::ApiClient`]. They only build
//! paths and payloads; all transport behaviour lives in the executor.

mod contacts;
mod domains;
mod processes;
mod tlds;
mod zones;
