use super::DelayStrategy;
use parking_lot::Mutex;
use reattempt_core::{RetryContext, FIBONACCI_DEFAULT_SCALE, FIBONACCI_DEFAULT_START};

/// Options for [`fibonacci_delay`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FibonacciDelayOptions {
    /// Number of sequence terms to skip before the first delay (default 0)
    pub start: Option<u32>,
    /// Multiplier applied to each term (default 1000)
    pub scale: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    current: u64,
    previous: u64,
}

impl Step {
    fn seeded(start: u32) -> Self {
        let mut step = Step {
            current: 1,
            previous: 0,
        };
        for _ in 0..start {
            step.advance();
        }
        step
    }

    fn advance(&mut self) {
        let next = self.current.saturating_add(self.previous);
        self.previous = self.current;
        self.current = next;
    }
}

/// Successive Fibonacci terms `1, 2, 3, 5, 8, ...` times `scale`.
///
/// Every call advances the sequence by one term; the attempt number in the
/// context is not consulted. Each value owns its own sequence, so two
/// strategies built from the same options never interfere.
#[derive(Debug)]
pub struct FibonacciDelay {
    start: u32,
    scale: u64,
    step: Mutex<Step>,
}

/// Create a fibonacci delay strategy
#[must_use]
pub fn fibonacci_delay(options: FibonacciDelayOptions) -> FibonacciDelay {
    let start = options.start.unwrap_or(FIBONACCI_DEFAULT_START);
    FibonacciDelay {
        start,
        scale: options.scale.unwrap_or(FIBONACCI_DEFAULT_SCALE),
        step: Mutex::new(Step::seeded(start)),
    }
}

impl FibonacciDelay {
    /// Rewind the sequence to its configured starting point
    pub fn reset(&self) {
        *self.step.lock() = Step::seeded(self.start);
    }
}

impl<T> DelayStrategy<T> for FibonacciDelay {
    fn next_delay(&self, _context: &RetryContext<T>) -> u64 {
        let mut step = self.step.lock();
        step.advance();
        step.current.saturating_mul(self.scale)
    }
}
