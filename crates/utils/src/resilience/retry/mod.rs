//! Retry engine
//!
//! - [`types`] - `Times` budget and `Until` validation predicate
//! - [`options`] - Options layers and their resolution into one record
//! - [`engine`] - The attempt loop and the reusable [`Retry`] entry point

pub mod engine;
pub mod options;
pub mod types;

pub use engine::{create_retry, retry, Retry};
pub use options::{ResolvedOptions, RetryOptions};
pub use types::{Times, Until};
