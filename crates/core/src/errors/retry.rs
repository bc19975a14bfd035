//! Failure taxonomy surfaced by the retry engine
//!
//! Every attempt that does not produce an accepted value is recorded as a
//! [`Failure`]: either the operation's own error, or an [`UntilMismatchError`]
//! when the validation predicate rejected a successful result. Only
//! [`TooManyRetriesError`] ever escapes the engine; it carries the failure of
//! the attempt that exhausted the budget as its cause.

use std::error::Error as StdError;
use std::fmt;

/// Classification of the failure shapes the engine deals with.
///
/// Each kind has its own label; a retries-exhausted error is never reported
/// under the validation-mismatch name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation itself returned an error
    Operation,
    /// The `until` predicate rejected a successful result
    UntilMismatch,
    /// The retry budget was exhausted
    TooManyRetries,
}

impl ErrorKind {
    /// Stable label for this kind
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Operation => "OperationError",
            ErrorKind::UntilMismatch => "UntilMismatchError",
            ErrorKind::TooManyRetries => "TooManyRetriesError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can report which failure shape it is
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

/// Returns true only for validation-mismatch failures
pub fn is_until_mismatch_error(error: &impl Classify) -> bool {
    error.kind() == ErrorKind::UntilMismatch
}

/// Returns true only for retries-exhausted failures
pub fn is_too_many_retries_error(error: &impl Classify) -> bool {
    error.kind() == ErrorKind::TooManyRetries
}

/// Raised when the `until` predicate rejects a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntilMismatchError<T> {
    /// The value the predicate rejected
    pub result: T,
}

impl<T> UntilMismatchError<T> {
    #[must_use]
    pub fn new(result: T) -> Self {
        Self { result }
    }

    /// Take back the rejected value
    pub fn into_result(self) -> T {
        self.result
    }
}

impl<T> fmt::Display for UntilMismatchError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("until check failed")
    }
}

impl<T: fmt::Debug> StdError for UntilMismatchError<T> {}

impl<T> Classify for UntilMismatchError<T> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::UntilMismatch
    }
}

/// The outcome of one attempt that has to be retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<T, E> {
    /// The operation returned an error
    Operation(E),
    /// The operation succeeded but the result was rejected
    UntilMismatch(UntilMismatchError<T>),
}

impl<T, E> Failure<T, E> {
    pub fn is_operation(&self) -> bool {
        matches!(self, Failure::Operation(_))
    }

    pub fn is_until_mismatch(&self) -> bool {
        matches!(self, Failure::UntilMismatch(_))
    }

    /// Borrow the operation error, if this failure came from the operation
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Failure::Operation(error) => Some(error),
            Failure::UntilMismatch(_) => None,
        }
    }

    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Failure::Operation(error) => Some(error),
            Failure::UntilMismatch(_) => None,
        }
    }

    /// Borrow the value the predicate rejected
    pub fn rejected_result(&self) -> Option<&T> {
        match self {
            Failure::Operation(_) => None,
            Failure::UntilMismatch(mismatch) => Some(&mismatch.result),
        }
    }
}

impl<T, E: fmt::Display> fmt::Display for Failure<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Operation(error) => write!(f, "operation failed: {error}"),
            Failure::UntilMismatch(mismatch) => mismatch.fmt(f),
        }
    }
}

impl<T, E> StdError for Failure<T, E>
where
    T: fmt::Debug + 'static,
    E: StdError + 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Failure::Operation(error) => Some(error),
            Failure::UntilMismatch(mismatch) => Some(mismatch),
        }
    }
}

impl<T, E> Classify for Failure<T, E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Failure::Operation(_) => ErrorKind::Operation,
            Failure::UntilMismatch(_) => ErrorKind::UntilMismatch,
        }
    }
}

/// Raised when the attempt budget is exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooManyRetriesError<T, E> {
    /// Total number of times the operation was invoked
    pub attempts: u32,
    /// Failure of the final attempt
    pub cause: Failure<T, E>,
}

impl<T, E> TooManyRetriesError<T, E> {
    #[must_use]
    pub fn new(attempts: u32, cause: Failure<T, E>) -> Self {
        Self { attempts, cause }
    }

    pub fn cause(&self) -> &Failure<T, E> {
        &self.cause
    }

    pub fn into_cause(self) -> Failure<T, E> {
        self.cause
    }
}

impl<T, E> fmt::Display for TooManyRetriesError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "too many retries ({} attempts)", self.attempts)
    }
}

impl<T, E> StdError for TooManyRetriesError<T, E>
where
    T: fmt::Debug + 'static,
    E: StdError + 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}

impl<T, E> Classify for TooManyRetriesError<T, E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::TooManyRetries
    }
}
