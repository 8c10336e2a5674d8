//! The "execute one request" port.
//!
//! [`Transport`] is implemented by the reqwest-backed base transport and by
//! the retrying decorator in the `rest-api` crate. Both speak the same
//! contract: a 2xx response comes back as [`ApiResponse`], everything else
//! as exactly one [`ClassifiedError`].

use async_trait::async_trait;

use crate::{ClassifiedError, Deadline};

/// HTTP verbs used by the registrar API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Returns the verb as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request, already serialised, ready to be sent any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Path relative to the configured base URL, including any query string.
    pub path: String,
    /// JSON-encoded body, if any.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request without a body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attaches a JSON-encoded body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A 2xx response with its full body read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// The (2xx) status code.
    pub status: u16,
    /// Raw body bytes; possibly empty.
    pub body: Vec<u8>,
}

/// Executes a single logical request against the registrar API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`, returning the 2xx response or a classified failure.
    ///
    /// Implementations must not start work once `deadline` has expired.
    async fn execute(
        &self,
        request: &ApiRequest,
        deadline: &Deadline,
    ) -> Result<ApiResponse, ClassifiedError>;
}
