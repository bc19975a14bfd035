//! Core domain types, errors, and constants for `reattempt`.
//!
//! ## Key Components
//!
//! - **`context`**: The [`RetryContext`] threaded through one retry sequence
//!   and handed to every delay strategy.
//! - **`errors`**: The infrastructure `Error` enum and `Result` alias, plus the
//!   retry error taxonomy ([`UntilMismatchError`], [`TooManyRetriesError`])
//!   that the engine surfaces to callers.
//! - **`constants`**: Default option values shared by the engine, the config
//!   loader and the CLI.

pub mod constants;
pub mod context;
pub mod errors;

pub use self::{
    constants::*,
    context::RetryContext,
    errors::{
        is_too_many_retries_error, is_until_mismatch_error, Classify, Error, ErrorKind, Failure,
        Result, TooManyRetriesError, UntilMismatchError,
    },
};
