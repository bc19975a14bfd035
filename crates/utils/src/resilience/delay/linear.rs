use super::DelayStrategy;
use reattempt_core::{RetryContext, LINEAR_DEFAULT_FROM, LINEAR_DEFAULT_SCALE};

/// Options for [`linear_delay`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearDelayOptions {
    /// Base offset added to every delay (default 0)
    pub from: Option<u64>,
    /// Step added per attempt (default 100)
    pub scale: Option<u64>,
}

/// `from + attempt * scale`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDelay {
    from: u64,
    scale: u64,
}

/// Create a linear delay strategy
#[must_use]
pub fn linear_delay(options: LinearDelayOptions) -> LinearDelay {
    LinearDelay {
        from: options.from.unwrap_or(LINEAR_DEFAULT_FROM),
        scale: options.scale.unwrap_or(LINEAR_DEFAULT_SCALE),
    }
}

impl<T> DelayStrategy<T> for LinearDelay {
    fn next_delay(&self, context: &RetryContext<T>) -> u64 {
        self.from
            .saturating_add(u64::from(context.attempt).saturating_mul(self.scale))
    }
}
