//! Minimum spacing between catalog calls.
//!
//! The catalog tolerates a fixed call rate. A single `RateLimiter` is shared
//! (behind an `Arc`) by every call site, and `run` guarantees that the next
//! operation starts no earlier than `1 / rate` after the previous one
//! finished. Time is read through a [`Clock`] so tests can run without
//! sleeping.

use crate::errors::{EtlError, Result};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Time source used by the limiter.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug)]
pub struct RateLimiter<C: Clock = TokioClock> {
    min_interval: Duration,
    clock: C,
    /// End of the most recent call; `None` before the first one.
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter<TokioClock> {
    /// Limiter allowing at most `max_per_second` calls per second.
    pub fn per_second(max_per_second: f64) -> Result<Self> {
        Self::with_clock(max_per_second, TokioClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(max_per_second: f64, clock: C) -> Result<Self> {
        if !max_per_second.is_finite() || max_per_second <= 0.0 {
            return Err(EtlError::configuration(format!(
                "rate limit must be a positive number of calls per second, got {}",
                max_per_second
            )));
        }
        Ok(Self {
            min_interval: Duration::from_secs_f64(1.0 / max_per_second),
            clock,
            last_call: Mutex::new(None),
        })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Waits out the remaining interval, then runs `op`.
    ///
    /// The limiter lock is held for the duration of `op`, so concurrent
    /// callers are serialised and the spacing holds across all of them.
    pub async fn run<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = self.clock.now().saturating_duration_since(previous);
            if elapsed < self.min_interval {
                self.clock.sleep(self.min_interval - elapsed).await;
            }
        }
        let output = op().await;
        *last_call = Some(self.clock.now());
        output
    }
}
