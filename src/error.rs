//! Error types for the π engine.
//!
//! The engine never recovers internally: the computation is deterministic, so
//! a retry cannot change the outcome. Every failure bubbles to the caller
//! with enough context to diagnose. Keep this surface small and stable —
//! downstream UIs match on it.

use thiserror::Error;

/// Which §-style output check a [`ComputeError::VerificationFailed`] tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyFailure {
    /// The output does not begin with the known `3.14159` prefix.
    #[error("leading digits are not a prefix of pi")]
    Prefix,
    /// The output length is not `digits + 2`.
    #[error("output length does not match the requested precision")]
    Length,
    /// A character after the decimal point is not an ASCII digit.
    #[error("output contains a non-digit character")]
    CharSet,
}

/// Canonical error for the engine.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ComputeError {
    /// Requested digit count is zero or above [`crate::MAX_DIGITS`].
    #[error("invalid precision: {0} digits")]
    InvalidPrecision(u64),
    /// Resource exhaustion the engine could observe (the bignum layer itself
    /// aborts on allocation failure; worker-pool construction does not).
    #[error("out of memory: {0}")]
    OutOfMemory(&'static str),
    /// The assembled output failed a post-computation self-check. This is an
    /// engine bug, not a user error; it is returned rather than asserted so
    /// callers can decide what to do with it.
    #[error("verification failed: {reason}")]
    VerificationFailed { reason: VerifyFailure },
    /// A worker thread panicked; the reduction was abandoned.
    #[error("worker panicked during {0}")]
    WorkerPanicked(&'static str),
}

/// Convenience alias for results that use [`ComputeError`].
pub type ComputeResult<T> = Result<T, ComputeError>;
