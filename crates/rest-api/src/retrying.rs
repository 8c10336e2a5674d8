//! Retry decorator around any [`Transport`].
//!
//! [`RetryingTransport`] implements the same capability as the transport it
//! wraps and delegates every attempt to it. Whether and when to repeat a
//! failed attempt is decided by an injected [`RetryStrategy`]; this type only
//! sequences attempts, sleeps, and enforces the call deadline.

use async_trait::async_trait;
use registrar::{
    ApiRequest, ApiResponse, ClassifiedError, Deadline, RetryDecision, RetryPolicy,
    RetryStrategy, Transport,
};
use tracing::{debug, warn};

/// A [`Transport`] that repeats failed attempts according to a strategy.
///
/// Attempts run strictly one after another. If the next backoff would run past
/// the call deadline, no further attempt is made and the last error is
/// returned as is. A deadline that fires during an attempt surfaces as a
/// deadline-exceeded transport error from the wrapped transport.
#[derive(Debug, Clone)]
pub struct RetryingTransport<T, S = RetryPolicy> {
    inner: T,
    strategy: S,
}

impl<T, S> RetryingTransport<T, S> {
    /// Wraps `inner`, consulting `strategy` after every failed attempt.
    pub fn new(inner: T, strategy: S) -> Self {
        Self { inner, strategy }
    }

    /// Returns the wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T, S> Transport for RetryingTransport<T, S>
where
    T: Transport,
    S: RetryStrategy,
{
    async fn execute(
        &self,
        request: &ApiRequest,
        deadline: &Deadline,
    ) -> Result<ApiResponse, ClassifiedError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(attempt, method = %request.method, path = %request.path, "sending request");

            let error = match self.inner.execute(request, deadline).await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!(attempt, "request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(error) => error,
            };

            let after = match self.strategy.decide(attempt, &error) {
                RetryDecision::Stop => {
                    debug!(attempt, error = %error, "giving up on request");
                    return Err(error);
                }
                RetryDecision::Retry { after } => after,
            };

            if after >= deadline.remaining() {
                warn!(
                    attempt,
                    delay = ?after,
                    error = %error,
                    "backoff would overrun the call deadline, giving up"
                );
                return Err(error);
            }

            warn!(attempt, delay = ?after, error = %error, "request failed, retrying");
            if !after.is_zero() {
                tokio::time::sleep(after).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use registrar::{HttpMethod, TransportFailure};

    use super::*;

    /// Replays a fixed script of outcomes, one per attempt.
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<ApiResponse, ClassifiedError>>>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(outcomes: Vec<Result<ApiResponse, ClassifiedError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn execute(
            &self,
            _request: &ApiRequest,
            _deadline: &Deadline,
        ) -> Result<ApiResponse, ClassifiedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn ok() -> Result<ApiResponse, ClassifiedError> {
        Ok(ApiResponse {
            status: 200,
            body: b"{}".to_vec(),
        })
    }

    fn server_error(status: u16) -> ClassifiedError {
        ClassifiedError::Generic {
            status,
            message: format!("server error {status}"),
            code: None,
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(max_attempts)
            .with_delays(Duration::from_millis(5), Duration::from_millis(20))
            .with_jitter(false)
    }

    fn request() -> ApiRequest {
        ApiRequest::new(HttpMethod::Get, "/domains")
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn success_on_first_attempt_is_not_retried() {
        let transport = RetryingTransport::new(Scripted::new(vec![ok()]), fast_policy(3));
        transport.execute(&request(), &deadline()).await.unwrap();
        assert_eq!(transport.inner().calls(), 1);
    }

    #[tokio::test]
    async fn server_errors_are_retried_until_success() {
        let script = vec![Err(server_error(500)), Err(server_error(503)), ok()];
        let transport = RetryingTransport::new(Scripted::new(script), fast_policy(3));

        transport.execute(&request(), &deadline()).await.unwrap();
        assert_eq!(transport.inner().calls(), 3);
    }

    #[tokio::test]
    async fn last_error_is_surfaced_unmodified_at_the_ceiling() {
        let network = ClassifiedError::transport(TransportFailure::Network, "reset");
        let script = vec![
            Err(server_error(500)),
            Err(server_error(502)),
            Err(network.clone()),
        ];
        let transport = RetryingTransport::new(Scripted::new(script), fast_policy(3));

        let err = transport.execute(&request(), &deadline()).await.unwrap_err();
        assert_eq!(err, network);
        assert_eq!(transport.inner().calls(), 3);
    }

    #[tokio::test]
    async fn auth_failures_are_returned_after_one_attempt() {
        let auth = ClassifiedError::Auth {
            status: 401,
            message: "invalid key".into(),
        };
        let transport =
            RetryingTransport::new(Scripted::new(vec![Err(auth.clone())]), fast_policy(5));

        let err = transport.execute(&request(), &deadline()).await.unwrap_err();
        assert_eq!(err, auth);
        assert_eq!(transport.inner().calls(), 1);
    }

    #[tokio::test]
    async fn rate_limit_waits_for_the_server_delay() {
        let limited = ClassifiedError::RateLimited {
            retry_after: Duration::from_millis(15),
            message: "slow down".into(),
        };
        let transport =
            RetryingTransport::new(Scripted::new(vec![Err(limited), ok()]), fast_policy(3));

        let started = Instant::now();
        transport.execute(&request(), &deadline()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(15));
        assert_eq!(transport.inner().calls(), 2);
    }

    #[tokio::test]
    async fn backoff_past_the_deadline_returns_the_last_error() {
        let policy = fast_policy(5).with_delays(Duration::from_secs(5), Duration::from_secs(5));
        let transport = RetryingTransport::new(
            Scripted::new(vec![Err(server_error(500)), ok()]),
            policy,
        );

        let started = Instant::now();
        let err = transport
            .execute(&request(), &Deadline::after(Duration::from_millis(200)))
            .await
            .unwrap_err();

        assert_eq!(err, server_error(500));
        assert_eq!(transport.inner().calls(), 1);
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn long_rate_limit_keeps_the_server_delay() {
        let limited = ClassifiedError::RateLimited {
            retry_after: Duration::from_secs(60),
            message: "slow down".into(),
        };
        let transport = RetryingTransport::new(
            Scripted::new(vec![Err(limited.clone()), ok()]),
            RetryPolicy::default(),
        );

        let err = transport
            .execute(&request(), &Deadline::after(Duration::from_secs(30)))
            .await
            .unwrap_err();

        assert_eq!(err, limited);
        assert_eq!(transport.inner().calls(), 1);
    }

    #[tokio::test]
    async fn custom_strategies_can_be_injected() {
        struct Never;
        impl RetryStrategy for Never {
            fn decide(&self, _attempt: u32, _error: &ClassifiedError) -> RetryDecision {
                RetryDecision::Stop
            }
        }

        let transport =
            RetryingTransport::new(Scripted::new(vec![Err(server_error(500))]), Never);
        transport.execute(&request(), &deadline()).await.unwrap_err();
        assert_eq!(transport.inner().calls(), 1);
    }
}
