//! Retry semantics for the REST transport.
//!
//! [`RetryStrategy`] is the seam the retrying transport is built around: it
//! is handed the attempt number and the failure of that attempt, and answers
//! with a [`RetryDecision`]. [`RetryPolicy`] is the production strategy.
//!
//! ## Rules
//!
//! - `RateLimited`: retried with the server's `retry_after`, or
//!   [`RetryPolicy::rate_limit_floor`] when the server sent zero.
//! - Transient `Transport` failures and 5xx `Generic` errors: retried with
//!   exponential backoff from [`RetryPolicy::base_delay`], capped at
//!   [`RetryPolicy::max_delay`], optionally jittered.
//! - `Auth`, `NotFound`, `Validation`, non-429 4xx, decode failures and an
//!   exhausted deadline are never retried.
//! - No decision ever allows more than [`RetryPolicy::max_attempts`] attempts
//!   in total.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ClassifiedError;

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Whether a failed attempt should be repeated and, if so, after what delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryDecision {
    /// Make another attempt once `after` has elapsed.
    Retry {
        /// Delay before the next attempt.
        after: Duration,
    },
    /// Surface the error to the caller.
    Stop,
}

impl RetryDecision {
    /// Returns `true` for [`RetryDecision::Retry`].
    pub fn should_retry(self) -> bool {
        matches!(self, Self::Retry { .. })
    }

    /// Returns the delay before the next attempt, or zero for [`RetryDecision::Stop`].
    pub fn delay(self) -> Duration {
        match self {
            Self::Retry { after } => after,
            Self::Stop => Duration::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy port
// ---------------------------------------------------------------------------

/// Decides whether to repeat a failed attempt.
///
/// `attempt` is 1-based: it is the number of attempts already made, including
/// the one that produced `error`.
pub trait RetryStrategy: Send + Sync {
    /// Decides what to do after attempt number `attempt` failed with `error`.
    fn decide(&self, attempt: u32, error: &ClassifiedError) -> RetryDecision;
}

// ---------------------------------------------------------------------------
// Production policy
// ---------------------------------------------------------------------------

/// Exponential-backoff retry policy with a hard attempt ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for every subsequent retry.
    pub base_delay: Duration,
    /// Upper bound for any computed delay, rate-limit delays included.
    pub max_delay: Duration,
    /// Delay used for a 429 whose body carried no usable `retry_after`.
    pub rate_limit_floor: Duration,
    /// Randomise backoff delays into `[d/2, d]`.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            rate_limit_floor: Duration::from_secs(1),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Sets the attempt ceiling.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the base and maximum backoff delays.
    pub fn with_delays(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max;
        self
    }

    /// Enables or disables jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Un-jittered backoff before the retry that follows attempt `attempt`.
    ///
    /// `base_delay * 2^(attempt - 1)`, capped at `max_delay`. Deterministic.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.jitter || delay.is_zero() {
            return delay;
        }
        let half = delay / 2;
        let spread = (delay - half).as_nanos().min(u128::from(u64::MAX)) as u64;
        half + Duration::from_nanos(rand::thread_rng().gen_range(0..=spread))
    }

    fn rate_limit_delay(&self, retry_after: Duration) -> Duration {
        let delay = if retry_after.is_zero() {
            self.rate_limit_floor
        } else {
            retry_after
        };
        delay.min(self.max_delay)
    }
}

impl RetryStrategy for RetryPolicy {
    fn decide(&self, attempt: u32, error: &ClassifiedError) -> RetryDecision {
        if attempt >= self.max_attempts.max(1) {
            return RetryDecision::Stop;
        }

        match error {
            ClassifiedError::RateLimited { retry_after, .. } => RetryDecision::Retry {
                after: self.rate_limit_delay(*retry_after),
            },
            ClassifiedError::Transport { failure, .. } if failure.is_transient() => {
                RetryDecision::Retry {
                    after: self.jittered(self.backoff_delay(attempt)),
                }
            }
            ClassifiedError::Generic { status, .. } if (500..=599).contains(status) => {
                RetryDecision::Retry {
                    after: self.jittered(self.backoff_delay(attempt)),
                }
            }
            ClassifiedError::Auth { .. }
            | ClassifiedError::NotFound { .. }
            | ClassifiedError::Generic { .. }
            | ClassifiedError::Transport { .. }
            | ClassifiedError::Validation { .. } => RetryDecision::Stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportFailure;

    fn policy() -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(4)
            .with_delays(Duration::from_millis(100), Duration::from_secs(1))
            .with_jitter(false)
    }

    fn never_retried() -> Vec<ClassifiedError> {
        let mut errors = vec![
            ClassifiedError::Auth {
                status: 401,
                message: "bad key".into(),
            },
            ClassifiedError::Auth {
                status: 403,
                message: "forbidden".into(),
            },
            ClassifiedError::NotFound {
                message: "gone".into(),
            },
            ClassifiedError::validation("bad payload"),
            ClassifiedError::transport(TransportFailure::Decode, "bad json"),
            ClassifiedError::transport(TransportFailure::DeadlineExceeded, "out of time"),
        ];
        for status in (400..=499).filter(|s| *s != 401 && *s != 403 && *s != 404 && *s != 429) {
            errors.push(ClassifiedError::Generic {
                status,
                message: "client error".into(),
                code: None,
            });
        }
        errors
    }

    #[test]
    fn client_errors_are_never_retried_at_any_attempt() {
        let policy = policy().with_max_attempts(100);
        for error in never_retried() {
            for attempt in 0..50 {
                assert_eq!(
                    policy.decide(attempt, &error),
                    RetryDecision::Stop,
                    "{error:?} at attempt {attempt}"
                );
            }
        }
    }

    #[test]
    fn transient_failures_retry_until_the_ceiling() {
        let policy = policy();
        let errors = [
            ClassifiedError::transport(TransportFailure::Network, "reset"),
            ClassifiedError::transport(TransportFailure::Timeout, "slow"),
            ClassifiedError::Generic {
                status: 502,
                message: "bad gateway".into(),
                code: None,
            },
        ];
        for error in &errors {
            for attempt in 1..4 {
                assert!(policy.decide(attempt, error).should_retry());
            }
            assert_eq!(policy.decide(4, error), RetryDecision::Stop);
            assert_eq!(policy.decide(5, error), RetryDecision::Stop);
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = policy();
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_delay(5), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(u32::MAX), Duration::from_secs(1));
    }

    #[test]
    fn unjittered_decisions_are_deterministic() {
        let policy = policy();
        let error = ClassifiedError::transport(TransportFailure::Network, "reset");
        assert_eq!(
            policy.decide(2, &error),
            RetryDecision::Retry {
                after: Duration::from_millis(200)
            }
        );
    }

    #[test]
    fn jitter_stays_within_half_and_full_delay() {
        let policy = policy().with_jitter(true);
        let error = ClassifiedError::transport(TransportFailure::Timeout, "slow");
        for _ in 0..200 {
            let delay = policy.decide(3, &error).delay();
            assert!(delay >= Duration::from_millis(200), "{delay:?}");
            assert!(delay <= Duration::from_millis(400), "{delay:?}");
        }
    }

    #[test]
    fn rate_limit_honours_server_delay_with_floor_and_cap() {
        let policy = policy();
        let limited = |secs| ClassifiedError::RateLimited {
            retry_after: Duration::from_millis(secs),
            message: "slow down".into(),
        };

        assert_eq!(policy.decide(1, &limited(300)).delay(), Duration::from_millis(300));
        assert_eq!(policy.decide(1, &limited(0)).delay(), Duration::from_secs(1));
        assert_eq!(policy.decide(1, &limited(60_000)).delay(), Duration::from_secs(1));
        assert_eq!(policy.decide(4, &limited(300)), RetryDecision::Stop);
    }

    #[test]
    fn zero_ceiling_behaves_as_single_attempt() {
        let policy = policy().with_max_attempts(0);
        let error = ClassifiedError::transport(TransportFailure::Network, "reset");
        assert_eq!(policy.decide(1, &error), RetryDecision::Stop);
        assert_eq!(RetryPolicy::no_retries().decide(1, &error), RetryDecision::Stop);
    }
}
