use super::DelayStrategy;
use reattempt_core::RetryContext;

/// Waits the same amount before every retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDelay {
    ms: u64,
}

impl ConstantDelay {
    #[must_use]
    pub fn new(ms: u64) -> Self {
        Self { ms }
    }
}

/// Create a strategy that always yields `ms`
#[must_use]
pub fn constant_delay(ms: u64) -> ConstantDelay {
    ConstantDelay::new(ms)
}

impl<T> DelayStrategy<T> for ConstantDelay {
    fn next_delay(&self, _context: &RetryContext<T>) -> u64 {
        self.ms
    }
}
