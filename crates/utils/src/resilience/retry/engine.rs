//! The attempt loop and the reusable retry entry point.

use super::options::{ResolvedOptions, RetryOptions};
use crate::time::sleep;
use reattempt_core::{Classify, Failure, RetryContext, TooManyRetriesError, UntilMismatchError};
use std::fmt;
use std::future::Future;
use tracing::{debug, trace, warn};

/// A retry entry point bound to a set of default options.
///
/// Cloning is cheap and every call owns its own [`RetryContext`], so one
/// engine can serve any number of concurrent calls.
#[derive(Debug)]
pub struct Retry<T> {
    defaults: RetryOptions<T>,
}

/// Create a retry engine with the given defaults
pub fn create_retry<T>(defaults: RetryOptions<T>) -> Retry<T> {
    Retry::new(defaults)
}

/// Retry `operation` using the generic defaults overlaid with `options`
pub async fn retry<T, E, F, Fut>(
    operation: F,
    options: RetryOptions<T>,
) -> Result<T, TooManyRetriesError<T, E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    Retry::default().run_with(operation, options).await
}

impl<T> Retry<T> {
    pub fn new(defaults: RetryOptions<T>) -> Self {
        Self { defaults }
    }

    /// Options bound to this engine
    pub fn defaults(&self) -> &RetryOptions<T> {
        &self.defaults
    }

    /// Run `operation` with this engine's defaults
    pub async fn run<E, F, Fut>(&self, operation: F) -> Result<T, TooManyRetriesError<T, E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Debug,
    {
        self.run_with(operation, RetryOptions::new()).await
    }

    /// Run `operation` with per-call overrides on top of this engine's defaults
    pub async fn run_with<E, F, Fut>(
        &self,
        operation: F,
        options: RetryOptions<T>,
    ) -> Result<T, TooManyRetriesError<T, E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Debug,
    {
        let resolved =
            ResolvedOptions::resolve(RetryOptions::generic(), self.defaults.clone(), options);
        execute(operation, resolved).await
    }

    /// Run a synchronous fallible closure; waits between attempts still suspend
    pub async fn run_sync<E, F>(
        &self,
        mut operation: F,
        options: RetryOptions<T>,
    ) -> Result<T, TooManyRetriesError<T, E>>
    where
        F: FnMut() -> Result<T, E>,
        E: fmt::Debug,
    {
        self.run_with(|| std::future::ready(operation()), options)
            .await
    }
}

impl<T> Default for Retry<T> {
    fn default() -> Self {
        Self::new(RetryOptions::new())
    }
}

impl<T> Clone for Retry<T> {
    fn clone(&self) -> Self {
        Self {
            defaults: self.defaults.clone(),
        }
    }
}

async fn execute<T, E, F, Fut>(
    mut operation: F,
    options: ResolvedOptions<T>,
) -> Result<T, TooManyRetriesError<T, E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    let mut context: RetryContext<T> = RetryContext::new();

    loop {
        let failure = match operation().await {
            Ok(value) => {
                let accepted = match &options.until {
                    Some(until) => until.check(&value).await,
                    None => true,
                };
                if accepted {
                    if context.attempt > 0 {
                        trace!(retries = context.attempt, "operation accepted after retries");
                    }
                    return Ok(value);
                }
                Failure::UntilMismatch(UntilMismatchError::new(value))
            }
            Err(error) => Failure::Operation(error),
        };

        if options.times.is_exhausted(context.attempt) {
            warn!(
                attempts = context.invocations(),
                times = %options.times,
                kind = %failure.kind(),
                "giving up after too many retries"
            );
            return Err(TooManyRetriesError::new(context.invocations(), failure));
        }

        context.advance();
        context.result = match failure {
            Failure::UntilMismatch(mismatch) => {
                debug!(attempt = context.attempt, "until check failed, retrying");
                Some(mismatch.into_result())
            }
            Failure::Operation(error) => {
                debug!(attempt = context.attempt, ?error, "attempt failed, retrying");
                None
            }
        };

        if let Some(delay_ms) = options.delay.resolve(&context).await {
            trace!(attempt = context.attempt, delay_ms, "waiting before next attempt");
            context.previous_delay = delay_ms;
            sleep(delay_ms).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::delay::{Delay, DelayStrategy};
    use crate::resilience::retry::Times;
    use futures::FutureExt;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    fn transient() -> io::Error {
        io::Error::new(io::ErrorKind::Interrupted, "transient")
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt() {
        let result = retry(|| async { Ok::<_, io::Error>(42) }, RetryOptions::new()).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = retry(
            || {
                let count = counter_clone.fetch_add(1, Ordering::SeqCst);
                async move {
                    if count < 2 {
                        Err(transient())
                    } else {
                        Ok(count)
                    }
                }
            },
            RetryOptions::new().delay_ms(10),
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_context_seen_by_strategy() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let strategy = move |ctx: &RetryContext<u32>| {
            seen_clone
                .lock()
                .unwrap()
                .push((ctx.attempt, ctx.result, ctx.previous_delay));
            u64::from(ctx.attempt) * 10
        };

        let counter = AtomicU32::new(0);
        let result = retry(
            || {
                let count = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    match count {
                        0 => Err(transient()),
                        _ => Ok(count),
                    }
                }
            },
            RetryOptions::new()
                .delay_strategy(strategy)
                .until(|value: &u32| *value >= 3),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(1, None, 0), (2, Some(1), 10), (3, Some(2), 20)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_never_consults_strategy() {
        let consulted = Arc::new(AtomicU32::new(0));
        let consulted_clone = consulted.clone();
        let engine = create_retry(RetryOptions::new().delay_strategy(
            move |_: &RetryContext<()>| {
                consulted_clone.fetch_add(1, Ordering::SeqCst);
                1
            },
        ));

        let result = engine
            .run_with(|| async { Err::<(), _>(transient()) }, RetryOptions::new().times(2).no_delay())
            .await;

        assert!(result.is_err());
        assert_eq!(consulted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_delay_is_awaited() {
        let start = tokio::time::Instant::now();
        let delay: Delay<()> = Delay::from_async(|ctx: &RetryContext<()>| {
            let attempt = u64::from(ctx.attempt);
            async move {
                tokio::task::yield_now().await;
                attempt * 1_000
            }
            .boxed()
        });

        let result = retry(
            || async { Err::<(), _>(transient()) },
            RetryOptions::new().times(1).delay(delay),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 3);
        assert!(start.elapsed() >= std::time::Duration::from_millis(3_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_sync() {
        let mut calls = 0;
        let engine = Retry::default();
        let result = engine
            .run_sync(
                || {
                    calls += 1;
                    if calls < 3 {
                        Err("not yet")
                    } else {
                        Ok(calls)
                    }
                },
                RetryOptions::new().delay_ms(1),
            )
            .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[derive(Debug)]
    struct Opaque;

    #[tokio::test(start_paused = true)]
    async fn test_debug_only_errors_are_retried() {
        let calls = AtomicU32::new(0);
        let result = retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Opaque) }
            },
            RetryOptions::new().times(1).no_delay(),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 3);
        assert!(matches!(err.cause, Failure::Operation(Opaque)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_engine_defaults_are_kept() {
        let strategy = |ctx: &RetryContext<u8>| u64::from(ctx.attempt);
        assert_eq!(strategy.next_delay(&RetryContext::at_attempt(2)), 2);

        let engine = create_retry(RetryOptions::<u8>::new().times(9).delay_strategy(strategy));
        let copy = engine.clone();
        assert_eq!(copy.defaults().times, Some(Times::Limited(9)));
        assert!(matches!(copy.defaults().delay, Some(Delay::Strategy(_))));
    }
}
