//! The request executor every resource endpoint goes through.

use std::sync::Arc;
use std::time::Duration;

use registrar::{
    ApiRequest, ApiResponse, CallId, ClassifiedError, ClientConfig, Deadline, HttpMethod,
    Transport, TransportFailure,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, Instrument};

use crate::{HttpTransport, RetryingTransport};

/// Authenticated client for the registrar REST API.
///
/// Each call serialises its payload once, hands it to the composed
/// [`Transport`] (by default [`HttpTransport`] wrapped in
/// [`RetryingTransport`]) under a fresh [`Deadline`], and decodes the 2xx
/// body into the expected shape. Cloning is cheap; clones share the
/// underlying connection pool.
///
/// Every verb is retried by the default policy, `POST` included. This
/// assumes the registrar treats repeated identical `POST`s as safe.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds the production stack: reqwest transport behind the retry
    /// decorator configured by `config.retry`.
    pub fn new(config: ClientConfig) -> Result<Self, ClassifiedError> {
        let http = HttpTransport::new(&config)?;
        let transport = RetryingTransport::new(http, config.retry.clone());
        Ok(Self::with_transport(Arc::new(transport), config.timeout))
    }

    /// Uses an arbitrary transport stack. `timeout` is the per-call deadline.
    pub fn with_transport(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Returns the per-call deadline budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(self.timeout)
    }

    // -----------------------------------------------------------------------
    // Verbs
    // -----------------------------------------------------------------------

    /// `GET path`, decoding the body into `T`.
    pub async fn get<T>(&self, path: &str) -> Result<T, ClassifiedError>
    where
        T: DeserializeOwned,
    {
        self.execute(HttpMethod::Get, path, None::<&()>, &self.deadline())
            .await
    }

    /// `POST path` with `body`, decoding the response into `T`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(HttpMethod::Post, path, Some(body), &self.deadline())
            .await
    }

    /// `POST path` with an optional body, ignoring any response body.
    pub async fn post_no_content<B>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute_no_content(HttpMethod::Post, path, body, &self.deadline())
            .await
    }

    /// `PUT path` with `body`, decoding the response into `T`.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(HttpMethod::Put, path, Some(body), &self.deadline())
            .await
    }

    /// `PATCH path` with `body`, decoding the response into `T`.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(HttpMethod::Patch, path, Some(body), &self.deadline())
            .await
    }

    /// `DELETE path`, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ClassifiedError> {
        self.execute_no_content(HttpMethod::Delete, path, None::<&()>, &self.deadline())
            .await
    }

    // -----------------------------------------------------------------------
    // Executor
    // -----------------------------------------------------------------------

    /// Performs one logical call and decodes the 2xx body into `T`.
    ///
    /// An empty body decodes as JSON `null`, so `T = ()` or `Option<_>`
    /// succeed trivially while a struct shape fails with a decode error.
    pub async fn execute<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        deadline: &Deadline,
    ) -> Result<T, ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.round_trip(method, path, body, deadline).await?;
        decode(&response)
    }

    /// Performs one logical call and discards the 2xx body.
    pub async fn execute_no_content<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        deadline: &Deadline,
    ) -> Result<(), ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.round_trip(method, path, body, deadline).await.map(drop)
    }

    async fn round_trip<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        deadline: &Deadline,
    ) -> Result<ApiResponse, ClassifiedError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(encode(body)?);
        }

        let span = debug_span!("api_call", call_id = %CallId::new_random(), %method, path);
        async {
            let response = self.transport.execute(&request, deadline).await?;
            debug!(status = response.status, "call completed");
            Ok(response)
        }
        .instrument(span)
        .await
    }
}

fn encode<B>(body: &B) -> Result<Vec<u8>, ClassifiedError>
where
    B: Serialize + ?Sized,
{
    serde_json::to_vec(body).map_err(|err| ClassifiedError::Validation {
        field: None,
        message: format!("marshal request: {err}"),
    })
}

fn decode<T>(response: &ApiResponse) -> Result<T, ClassifiedError>
where
    T: DeserializeOwned,
{
    let body: &[u8] = if response.body.is_empty() {
        b"null"
    } else {
        &response.body
    };
    serde_json::from_slice(body).map_err(|err| {
        ClassifiedError::transport(TransportFailure::Decode, format!("decode response: {err}"))
    })
}
