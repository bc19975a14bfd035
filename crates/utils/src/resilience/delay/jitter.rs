use super::{ConstantDelay, DelayStrategy};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reattempt_core::RetryContext;

/// What a [`Jitter`] perturbs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JitterSource<S> {
    /// A fixed base amount
    Fixed(u64),
    /// The output of another strategy
    Strategy(S),
}

impl JitterSource<ConstantDelay> {
    /// Jitter around a fixed amount
    #[must_use]
    pub fn fixed(amount: u64) -> Self {
        JitterSource::Fixed(amount)
    }
}

/// Randomly moves a base delay `n` up or down by `1..=n`, clamped at zero.
///
/// Output always lies in `[0, 2n]` and is never `n` itself unless `n` is 0.
#[derive(Debug)]
pub struct Jitter<S> {
    source: JitterSource<S>,
    rng: Mutex<StdRng>,
}

/// Create a jitter combinator around a fixed amount or another strategy
pub fn jitter<S>(source: JitterSource<S>) -> Jitter<S> {
    Jitter::new(source)
}

impl<S> Jitter<S> {
    /// Create a jitter combinator seeded from system entropy
    pub fn new(source: JitterSource<S>) -> Self {
        Self {
            source,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Use a deterministic random sequence
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            source: self.source,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn perturb(&self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        let mut rng = self.rng.lock();
        let upward = rng.gen_bool(0.5);
        let amount = rng.gen_range(1..=n);
        if upward {
            n.saturating_add(amount)
        } else {
            n.saturating_sub(amount)
        }
    }
}

impl<T, S> DelayStrategy<T> for Jitter<S>
where
    S: DelayStrategy<T>,
{
    fn next_delay(&self, context: &RetryContext<T>) -> u64 {
        let base = match &self.source {
            JitterSource::Fixed(amount) => *amount,
            JitterSource::Strategy(strategy) => strategy.next_delay(context),
        };
        self.perturb(base)
    }
}
