//! Per-call deadline threaded explicitly through every blocking step.
//!
//! A [`Deadline`] is created once per logical call and passed by reference
//! into each network read/write and each backoff wait. Nothing reads it from
//! ambient or thread-local state.

use std::time::{Duration, Instant};

use crate::{ClassifiedError, TransportFailure};

/// The instant after which no further work may be started for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Creates a deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Returns the time left, or zero once the deadline has passed.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Returns `true` once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Clamps a per-operation timeout to the time left on this deadline.
    pub fn clamp(&self, timeout: Duration) -> Duration {
        timeout.min(self.remaining())
    }

    /// The error reported when this deadline cuts a call short.
    pub fn exceeded_error(&self) -> ClassifiedError {
        ClassifiedError::transport(
            TransportFailure::DeadlineExceeded,
            format!("request deadline of {:?} exceeded", self.budget),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deadline_has_time_left() {
        let deadline = Deadline::after(Duration::from_secs(60));
        assert!(!deadline.is_expired());
        assert!(deadline.remaining() <= Duration::from_secs(60));
        assert_eq!(deadline.clamp(Duration::from_secs(1)), Duration::from_secs(1));
    }

    #[test]
    fn zero_budget_is_already_expired() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_expired());
        assert_eq!(deadline.clamp(Duration::from_secs(5)), Duration::ZERO);
        assert!(matches!(
            deadline.exceeded_error(),
            ClassifiedError::Transport {
                failure: TransportFailure::DeadlineExceeded,
                ..
            }
        ));
    }
}
