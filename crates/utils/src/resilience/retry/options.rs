//! Layered retry options
//!
//! Options come from three layers: the generic defaults, the defaults bound
//! to a [`Retry`](super::Retry) engine, and the overrides passed with a single
//! call. Each field is taken from the highest-precedence layer that sets it;
//! an unset field never erases a value from a lower layer.

use super::types::{Times, Until};
use crate::resilience::delay::{Delay, DelayStrategy};
use futures::future::BoxFuture;
use reattempt_core::{DEFAULT_DELAY_MS, DEFAULT_TIMES};

/// One layer of retry options; every field is optional
#[derive(Debug)]
pub struct RetryOptions<T> {
    /// Wait between attempts
    pub delay: Option<Delay<T>>,
    /// Retry budget, not counting the first attempt
    pub times: Option<Times>,
    /// Validation predicate over successful results
    pub until: Option<Until<T>>,
}

impl<T> RetryOptions<T> {
    /// An empty layer that sets nothing
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: None,
            times: None,
            until: None,
        }
    }

    /// The lowest-precedence layer: 500ms fixed delay, 3 retries, no predicate
    #[must_use]
    pub fn generic() -> Self {
        Self {
            delay: Some(Delay::Fixed(DEFAULT_DELAY_MS)),
            times: Some(Times::Limited(DEFAULT_TIMES)),
            until: None,
        }
    }

    #[must_use]
    pub fn delay(mut self, delay: Delay<T>) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Wait a fixed number of milliseconds
    #[must_use]
    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Delay::Fixed(ms));
        self
    }

    /// Use a delay strategy
    #[must_use]
    pub fn delay_strategy<S>(mut self, strategy: S) -> Self
    where
        S: DelayStrategy<T> + 'static,
    {
        self.delay = Some(Delay::strategy(strategy));
        self
    }

    /// Retry without waiting
    #[must_use]
    pub fn no_delay(mut self) -> Self {
        self.delay = Some(Delay::None);
        self
    }

    #[must_use]
    pub fn times(mut self, times: u32) -> Self {
        self.times = Some(Times::Limited(times));
        self
    }

    #[must_use]
    pub fn budget(mut self, times: Times) -> Self {
        self.times = Some(times);
        self
    }

    /// Never give up on failures
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.times = Some(Times::Unbounded);
        self
    }

    #[must_use]
    pub fn until<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.until = Some(Until::new(predicate));
        self
    }

    #[must_use]
    pub fn until_async<F>(mut self, predicate: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> BoxFuture<'a, bool> + Send + Sync + 'static,
    {
        self.until = Some(Until::from_async(predicate));
        self
    }

    /// Overlay `higher` on top of this layer, field by field
    #[must_use]
    pub fn merge(self, higher: RetryOptions<T>) -> Self {
        Self {
            delay: higher.delay.or(self.delay),
            times: higher.times.or(self.times),
            until: higher.until.or(self.until),
        }
    }
}

impl<T> Default for RetryOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RetryOptions<T> {
    fn clone(&self) -> Self {
        Self {
            delay: self.delay.clone(),
            times: self.times,
            until: self.until.clone(),
        }
    }
}

/// The finalized options for one retry invocation
#[derive(Debug)]
pub struct ResolvedOptions<T> {
    pub delay: Delay<T>,
    pub times: Times,
    pub until: Option<Until<T>>,
}

impl<T> ResolvedOptions<T> {
    /// Resolve the three layers; `call` wins over `engine`, which wins over `generic`
    pub fn resolve(
        generic: RetryOptions<T>,
        engine: RetryOptions<T>,
        call: RetryOptions<T>,
    ) -> Self {
        let merged = generic.merge(engine).merge(call);
        Self {
            delay: merged.delay.unwrap_or(Delay::Fixed(DEFAULT_DELAY_MS)),
            times: merged.times.unwrap_or(Times::Limited(DEFAULT_TIMES)),
            until: merged.until,
        }
    }
}
