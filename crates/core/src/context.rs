//! Mutable state threaded through a single retry sequence.

/// State shared between the retry engine and the delay strategy for one call.
///
/// One context is created per invocation of the retry entry point and lives
/// until that invocation resolves. `attempt` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryContext<T> {
    /// Number of failed attempts so far; 0 during the first try
    pub attempt: u32,
    /// Most recent successful return value, if the last attempt produced one
    pub result: Option<T>,
    /// Delay in milliseconds waited before the current attempt
    pub previous_delay: u64,
}

impl<T> RetryContext<T> {
    /// Create a context for the first attempt
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempt: 0,
            result: None,
            previous_delay: 0,
        }
    }

    /// Create a context positioned at a given attempt, mostly for evaluating
    /// delay strategies outside the engine
    #[must_use]
    pub fn at_attempt(attempt: u32) -> Self {
        Self {
            attempt,
            ..Self::new()
        }
    }

    /// Record one more failed attempt; pins at `u32::MAX` instead of wrapping
    pub fn advance(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }

    /// Total invocations so far, counting the one in flight
    #[must_use]
    pub fn invocations(&self) -> u32 {
        self.attempt.saturating_add(1)
    }
}

impl<T> Default for RetryContext<T> {
    fn default() -> Self {
        Self::new()
    }
}
