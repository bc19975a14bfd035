//! Budget and validation types for the retry engine.

use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// How many retries are permitted after the first attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    /// At most this many retries
    Limited(u32),
    /// Keep retrying until an attempt is accepted
    Unbounded,
}

impl Times {
    /// Whether the budget is spent, given the attempt counter before it is
    /// incremented for the failure being handled
    pub fn is_exhausted(self, attempt: u32) -> bool {
        match self {
            Times::Limited(times) => attempt > times,
            Times::Unbounded => false,
        }
    }
}

impl From<u32> for Times {
    fn from(times: u32) -> Self {
        Times::Limited(times)
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Times::Limited(times) => write!(f, "{times}"),
            Times::Unbounded => write!(f, "unbounded"),
        }
    }
}

type SyncPredicate<T> = dyn Fn(&T) -> bool + Send + Sync;
type AsyncPredicate<T> = dyn for<'a> Fn(&'a T) -> BoxFuture<'a, bool> + Send + Sync;

/// Validation predicate over a successful result; `false` forces a retry
pub enum Until<T> {
    Sync(Arc<SyncPredicate<T>>),
    Async(Arc<AsyncPredicate<T>>),
}

impl<T> Until<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Until::Sync(Arc::new(predicate))
    }

    pub fn from_async<F>(predicate: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> BoxFuture<'a, bool> + Send + Sync + 'static,
    {
        Until::Async(Arc::new(predicate))
    }

    /// Evaluate the predicate, awaiting it if it is asynchronous
    pub async fn check(&self, value: &T) -> bool {
        match self {
            Until::Sync(predicate) => predicate(value),
            Until::Async(predicate) => predicate(value).await,
        }
    }
}

impl<T> Clone for Until<T> {
    fn clone(&self) -> Self {
        match self {
            Until::Sync(predicate) => Until::Sync(Arc::clone(predicate)),
            Until::Async(predicate) => Until::Async(Arc::clone(predicate)),
        }
    }
}

impl<T> fmt::Debug for Until<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Until::Sync(_) => write!(f, "Until::Sync(<predicate>)"),
            Until::Async(_) => write!(f, "Until::Async(<predicate>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_times_exhaustion_compares_before_increment() {
        assert!(!Times::Limited(0).is_exhausted(0));
        assert!(Times::Limited(0).is_exhausted(1));
        assert!(!Times::Limited(2).is_exhausted(2));
        assert!(Times::Limited(2).is_exhausted(3));
        assert!(!Times::Unbounded.is_exhausted(u32::MAX));
    }

    #[test]
    fn test_times_display() {
        assert_eq!(Times::from(4).to_string(), "4");
        assert_eq!(Times::Unbounded.to_string(), "unbounded");
    }

    #[tokio::test]
    async fn test_until_sync_and_async() {
        let even = Until::new(|value: &u32| value % 2 == 0);
        assert!(even.check(&4).await);
        assert!(!even.check(&5).await);

        let large = Until::from_async(|value: &u32| {
            let value = *value;
            async move { value > 10 }.boxed()
        });
        assert!(large.check(&11).await);
        assert!(!large.clone().check(&3).await);
    }
}
