use super::DelayStrategy;
use reattempt_core::{RetryContext, EXPONENTIAL_DEFAULT_FROM, EXPONENTIAL_DEFAULT_SCALE};

/// Options for [`exponential_delay`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExponentialDelayOptions {
    /// Base delay (default 100)
    pub from: Option<u64>,
    /// Growth factor (default 2)
    pub scale: Option<u64>,
}

/// `from` for attempts 0 and 1, `scale^attempt * from` afterwards.
///
/// The first retry waits the base delay rather than `scale * from`; the power
/// law only starts at attempt 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialDelay {
    from: u64,
    scale: u64,
}

/// Create an exponential delay strategy
#[must_use]
pub fn exponential_delay(options: ExponentialDelayOptions) -> ExponentialDelay {
    ExponentialDelay {
        from: options.from.unwrap_or(EXPONENTIAL_DEFAULT_FROM),
        scale: options.scale.unwrap_or(EXPONENTIAL_DEFAULT_SCALE),
    }
}

impl<T> DelayStrategy<T> for ExponentialDelay {
    fn next_delay(&self, context: &RetryContext<T>) -> u64 {
        if context.attempt > 1 {
            self.scale
                .saturating_pow(context.attempt)
                .saturating_mul(self.from)
        } else {
            self.from
        }
    }
}
