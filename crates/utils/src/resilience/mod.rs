//! Delay strategies and the retry engine
//!
//! - [`delay`] - Delay strategy trait, the built-in strategies and jitter
//! - [`retry`] - Retry options, their layered resolution and the engine
//!
//! ## Examples
//!
//! ```rust,no_run
//! use reattempt_utils::resilience::{create_retry, exponential_delay, jitter, JitterSource, RetryOptions};
//!
//! # async fn example() -> Result<u32, Box<dyn std::error::Error>> {
//! let retry = create_retry(
//!     RetryOptions::new()
//!         .times(5)
//!         .delay_strategy(jitter(JitterSource::Strategy(exponential_delay(Default::default())))),
//! );
//!
//! let value = retry
//!     .run(|| async { Ok::<_, std::io::Error>(42) })
//!     .await?;
//! # Ok(value)
//! # }
//! ```

pub mod delay;
pub mod retry;

pub use delay::{
    constant_delay, exponential_delay, fibonacci_delay, jitter, linear_delay, ConstantDelay,
    Delay, DelayStrategy, ExponentialDelay, ExponentialDelayOptions, FibonacciDelay,
    FibonacciDelayOptions, Jitter, JitterSource, LinearDelay, LinearDelayOptions,
};
pub use retry::{create_retry, retry, ResolvedOptions, Retry, RetryOptions, Times, Until};
