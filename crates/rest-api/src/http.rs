//! Base transport: one HTTP round trip per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use registrar::{
    classify, ApiKey, ApiRequest, ApiResponse, ClassifiedError, ClientConfig, Deadline,
    HttpMethod, Transport, TransportFailure,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

/// Sends a single attempt with reqwest and classifies the outcome.
///
/// Attaches `Authorization: ApiKey <key>` (when a key is configured) and
/// `User-Agent` (when non-empty) to every request, and
/// `Content-Type: application/json` when a body is present.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<ApiKey>,
    user_agent: String,
    attempt_timeout: Duration,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("user_agent", &self.user_agent)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl HttpTransport {
    /// Builds the transport from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClassifiedError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.attempt_timeout)
            .build()
            .map_err(|err| ClassifiedError::Validation {
                field: None,
                message: format!("build http client: {err}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            user_agent: config.user_agent.clone(),
            attempt_timeout: config.attempt_timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(to_reqwest(request.method), url);

        if let Some(key) = &self.api_key {
            builder = builder.header(AUTHORIZATION, format!("ApiKey {}", key.expose()));
        }
        if !self.user_agent.is_empty() {
            builder = builder.header(USER_AGENT, &self.user_agent);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }
        builder
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &ApiRequest,
        deadline: &Deadline,
    ) -> Result<ApiResponse, ClassifiedError> {
        if deadline.is_expired() {
            return Err(deadline.exceeded_error());
        }

        let builder = self.build(request);
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let budget = deadline.clamp(self.attempt_timeout);
        let (status, body) = match tokio::time::timeout(budget, exchange).await {
            Ok(Ok(exchanged)) => exchanged,
            Ok(Err(err)) => return Err(from_reqwest(&err)),
            Err(_) if deadline.is_expired() => return Err(deadline.exceeded_error()),
            Err(_) => {
                return Err(ClassifiedError::transport(
                    TransportFailure::Timeout,
                    format!("attempt timed out after {budget:?}"),
                ))
            }
        };

        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            bytes = body.len(),
            "received response"
        );

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body: body.to_vec(),
            })
        } else {
            Err(classify(status.as_u16(), &body))
        }
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn from_reqwest(err: &reqwest::Error) -> ClassifiedError {
    if err.is_builder() {
        // Malformed URL or header value: nothing reached the network.
        return ClassifiedError::Validation {
            field: None,
            message: format!("build request: {err}"),
        };
    }
    let failure = if err.is_timeout() {
        TransportFailure::Timeout
    } else {
        TransportFailure::Network
    };
    ClassifiedError::transport(failure, format!("execute request: {err}"))
}
