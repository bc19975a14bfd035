//! Error types for reattempt operations

mod builders;
mod display;
mod retry;
mod types;

pub use builders::*;
pub use retry::{
    is_too_many_retries_error, is_until_mismatch_error, Classify, ErrorKind, Failure,
    TooManyRetriesError, UntilMismatchError,
};
pub use types::{Error, Result};
