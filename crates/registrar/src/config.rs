//! Client configuration supplied by the caller before any API call.
//!
//! The core never reads files, the keyring, or the environment itself; the
//! composition root resolves those into a [`ClientConfig`] and hands it over.

use std::time::Duration;

use serde::Deserialize;

use crate::{ApiKey, RetryPolicy};

/// Production REST endpoint.
pub const PRODUCTION_URL: &str = "https://api.yoursrs.com/v2";

/// Sandbox (OT&E) REST endpoint.
pub const SANDBOX_URL: &str = "https://api.yoursrs-ote.com/v2";

/// Which registrar environment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Returns the REST base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Sandbox => SANDBOX_URL,
        }
    }
}

/// Settings for the REST client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Credential sent as `Authorization: ApiKey <key>`. When absent the
    /// header is omitted and the server answers 401.
    pub api_key: Option<ApiKey>,

    /// Base URL all resource paths are appended to.
    pub base_url: String,

    /// Sent as the `User-Agent` header on every attempt.
    pub user_agent: String,

    /// Overall deadline for one logical call, across all attempts.
    pub timeout: Duration,

    /// Timeout for a single attempt (connect + send + full body read).
    pub attempt_timeout: Duration,

    /// Retry behaviour for failed attempts.
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: PRODUCTION_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(30),
            attempt_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a production config carrying `api_key`.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Points the client at an environment's base URL.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    /// Overrides the base URL (e.g. for a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the overall per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

fn default_user_agent() -> String {
    format!("rr/{}", env!("CARGO_PKG_VERSION"))
}
