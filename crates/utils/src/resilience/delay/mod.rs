//! Delay strategies
//!
//! A delay strategy maps the current [`RetryContext`] to the number of
//! milliseconds to wait before the next attempt. Strategies are plain values:
//! constructing one never performs I/O or suspends, and every strategy can be
//! shared between tasks.

mod constant;
mod exponential;
mod fibonacci;
mod jitter;
mod linear;

pub use constant::{constant_delay, ConstantDelay};
pub use exponential::{exponential_delay, ExponentialDelay, ExponentialDelayOptions};
pub use fibonacci::{fibonacci_delay, FibonacciDelay, FibonacciDelayOptions};
pub use jitter::{jitter, Jitter, JitterSource};
pub use linear::{linear_delay, LinearDelay, LinearDelayOptions};

use futures::future::BoxFuture;
use reattempt_core::RetryContext;
use std::fmt;
use std::sync::Arc;

/// Computes the wait before the next attempt, in milliseconds
pub trait DelayStrategy<T = ()>: Send + Sync {
    fn next_delay(&self, context: &RetryContext<T>) -> u64;
}

impl<T, F> DelayStrategy<T> for F
where
    F: Fn(&RetryContext<T>) -> u64 + Send + Sync,
{
    fn next_delay(&self, context: &RetryContext<T>) -> u64 {
        self(context)
    }
}

/// Asynchronous delay callback
pub type AsyncDelayFn<T> =
    dyn for<'a> Fn(&'a RetryContext<T>) -> BoxFuture<'a, u64> + Send + Sync;

/// The `delay` option: what the engine waits between attempts
pub enum Delay<T> {
    /// Retry immediately
    None,
    /// Wait the same number of milliseconds every time
    Fixed(u64),
    /// Ask a strategy for every wait
    Strategy(Arc<dyn DelayStrategy<T>>),
    /// Ask an asynchronous callback for every wait
    Async(Arc<AsyncDelayFn<T>>),
}

impl<T> Delay<T> {
    /// Wrap a strategy value
    pub fn strategy<S>(strategy: S) -> Self
    where
        S: DelayStrategy<T> + 'static,
    {
        Delay::Strategy(Arc::new(strategy))
    }

    /// Wrap an asynchronous callback
    pub fn from_async<F>(callback: F) -> Self
    where
        F: for<'a> Fn(&'a RetryContext<T>) -> BoxFuture<'a, u64> + Send + Sync + 'static,
    {
        Delay::Async(Arc::new(callback))
    }

    /// Compute the wait for the given context, `None` when no wait is configured
    pub async fn resolve(&self, context: &RetryContext<T>) -> Option<u64> {
        match self {
            Delay::None => None,
            Delay::Fixed(ms) => Some(*ms),
            Delay::Strategy(strategy) => Some(strategy.next_delay(context)),
            Delay::Async(callback) => Some(callback(context).await),
        }
    }
}

impl<T> Clone for Delay<T> {
    fn clone(&self) -> Self {
        match self {
            Delay::None => Delay::None,
            Delay::Fixed(ms) => Delay::Fixed(*ms),
            Delay::Strategy(strategy) => Delay::Strategy(Arc::clone(strategy)),
            Delay::Async(callback) => Delay::Async(Arc::clone(callback)),
        }
    }
}

impl<T> fmt::Debug for Delay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delay::None => write!(f, "Delay::None"),
            Delay::Fixed(ms) => write!(f, "Delay::Fixed({ms})"),
            Delay::Strategy(_) => write!(f, "Delay::Strategy(<strategy>)"),
            Delay::Async(_) => write!(f, "Delay::Async(<callback>)"),
        }
    }
}

impl<T> From<u64> for Delay<T> {
    fn from(ms: u64) -> Self {
        Delay::Fixed(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[tokio::test]
    async fn test_resolve_variants() {
        let context: RetryContext<()> = RetryContext::at_attempt(3);

        assert_eq!(Delay::<()>::None.resolve(&context).await, None);
        assert_eq!(Delay::<()>::from(250).resolve(&context).await, Some(250));

        let strategy = Delay::strategy(|ctx: &RetryContext<()>| u64::from(ctx.attempt) * 7);
        assert_eq!(strategy.resolve(&context).await, Some(21));

        let deferred = Delay::from_async(|ctx: &RetryContext<()>| {
            let attempt = u64::from(ctx.attempt);
            async move { attempt + 1 }.boxed()
        });
        assert_eq!(deferred.resolve(&context).await, Some(4));
    }

    #[test]
    fn test_closure_strategy_sees_result() {
        let strategy = |ctx: &RetryContext<u64>| ctx.result.unwrap_or(0) * 2;
        let mut context = RetryContext::new();
        context.result = Some(40);
        assert_eq!(strategy.next_delay(&context), 80);
    }

    #[test]
    fn test_clone_shares_strategy() {
        let delay: Delay<()> = Delay::strategy(linear_delay(LinearDelayOptions::default()));
        let copy = delay.clone();
        match (&delay, &copy) {
            (Delay::Strategy(a), Delay::Strategy(b)) => assert!(Arc::ptr_eq(a, b)),
            other => panic!("unexpected variants: {other:?}"),
        }
    }
}
