//! The Chudnovsky π engine — public API and phase orchestration.
//!
//! This module wires the leaves together:
//!
//! - [`compute_pi`] / [`compute_pi_with`] — digits in, `"3.…"` string out
//! - [`ComputeOptions`] — parallelism override and progress callback
//! - [`split`](crate::chudnovsky::split) — the binary-splitting engine,
//!   public for callers that want raw (P, Q, T) tuples
//!
//! ### Design
//! The computation runs four strictly sequential phases: parallel evaluation
//! of leaf ranges (`split`), ordered pairwise reduction (`merge`), one
//! integer square root at working precision (`sqrt`), and the final division
//! plus decimal rendering (`assemble`). Workers share nothing; each produces
//! an owned tuple that the reducer consumes, so abandoning a computation
//! releases memory deterministically.
//!
//! The result is deterministic across parallelism settings — only
//! intermediate allocation sizes differ — which the test suite asserts.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{ComputeError, ComputeResult};
use crate::progress::{Phase, ProgressFn, Reporter};
use crate::utils::pool;

mod assemble;
mod parallel;
pub mod split;
mod sqrt;
pub mod terms;
pub mod verify;

/// Upper bound on the requested digit count.
///
/// Keeps every per-term coefficient inside fixed-width arithmetic and the
/// decimal shift inside GMP's exponent range; a billion digits is also where
/// the ~15 bytes/digit peak residency stops being a laptop-sized problem.
pub const MAX_DIGITS: u64 = 1_000_000_000;

/// Rough peak memory (bytes) needed to compute `digits` digits.
///
/// The last few merges dominate residency; 15 bytes per requested decimal
/// digit is a serviceable estimator for hosts that want to warn before
/// committing to a long run.
pub fn estimate_peak_memory(digits: u64) -> u64 {
    digits.saturating_mul(15)
}

/// Knobs for [`compute_pi_with`]. The default is "auto parallelism, no
/// progress reporting".
#[derive(Clone, Default)]
pub struct ComputeOptions {
    /// Worker count; `None` resolves to `PI_ENGINE_THREADS` or the hardware
    /// thread count. `Some(0)` is clamped to 1 with a warning.
    pub parallelism: Option<usize>,
    /// Streaming `(phase, fraction)` callback; see [`crate::progress`].
    pub progress: Option<ProgressFn>,
}

impl ComputeOptions {
    /// Fix the worker count instead of resolving it from the environment.
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Attach a progress callback.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(Phase, f64) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for ComputeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeOptions")
            .field("parallelism", &self.parallelism)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Compute π to `digits` fractional digits with default options.
pub fn compute_pi(digits: u64) -> ComputeResult<String> {
    compute_pi_with(digits, &ComputeOptions::default())
}

/// Compute π to `digits` fractional digits.
///
/// Returns `"3."` followed by exactly `digits` decimal digits, truncated —
/// never rounded — so the output is always a character prefix of the true
/// expansion (and of any longer run).
pub fn compute_pi_with(digits: u64, opts: &ComputeOptions) -> ComputeResult<String> {
    if digits == 0 || digits > MAX_DIGITS {
        return Err(ComputeError::InvalidPrecision(digits));
    }

    let threads = pool::resolve_parallelism(opts.parallelism);
    let n_terms = terms::term_count(digits);
    let working = terms::working_digits(digits);
    let reporter = Reporter::new(opts.progress.clone());
    log::debug!(
        "computing {digits} digits: {n_terms} terms, {working} working digits, {threads} thread(s)"
    );

    let step = Instant::now();
    let root = parallel::series_root(n_terms, threads, &reporter)?;
    log::debug!("split+merge done in {:?}", step.elapsed());

    reporter.report(Phase::Sqrt, 0.0);
    let step = Instant::now();
    let sqrt10005 = sqrt::scaled_sqrt(terms::SQRT_RADICAND, working);
    reporter.report(Phase::Sqrt, 1.0);
    log::debug!("scaled sqrt done in {:?}", step.elapsed());

    reporter.report(Phase::Assemble, 0.0);
    let step = Instant::now();
    let out = assemble::to_decimal(&root, &sqrt10005, digits)?;
    reporter.report(Phase::Assemble, 1.0);
    log::debug!("assembly done in {:?}", step.elapsed());

    verify::check(&out, digits)?;
    Ok(out)
}

/* --------------------------------- Tests ---------------------------------- */
