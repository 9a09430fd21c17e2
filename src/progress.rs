//! Streaming progress reporting.
//!
//! Callers may pass a `(phase, fraction)` callback; the engine guarantees:
//! - fractions are clamped to `[0.0, 1.0]` and monotonic within a phase,
//! - each phase is reported at least at start (0.0) and completion (1.0),
//! - invocations are serialized, so the callback itself does not need to be
//!   re-entrant even though workers tick from multiple threads,
//! - a panicking callback is a nonfatal warning; the computation continues.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// The engine's sequential phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Parallel evaluation of leaf ranges of the series.
    Split,
    /// Pairwise reduction of leaf tuples into the root tuple.
    Merge,
    /// Integer square root of 10005 at working precision.
    Sqrt,
    /// Final division and decimal rendering.
    Assemble,
}

impl Phase {
    /// Short lowercase tag, suitable for log lines and progress bars.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Split => "split",
            Phase::Merge => "merge",
            Phase::Sqrt => "sqrt",
            Phase::Assemble => "assemble",
        }
    }
}

/// Shared progress callback. Invoked from worker threads and the reducing
/// thread; the engine serializes calls internally.
pub type ProgressFn = Arc<dyn Fn(Phase, f64) + Send + Sync>;

/// Internal fan-in point for progress ticks.
///
/// The mutex both serializes callback invocations and carries the last
/// reported `(phase, fraction)` pair, which is what makes the per-phase
/// monotonicity guarantee hold under concurrent ticks.
pub(crate) struct Reporter {
    sink: Option<ProgressFn>,
    gate: Mutex<Option<(Phase, f64)>>,
}

impl Reporter {
    pub(crate) fn new(sink: Option<ProgressFn>) -> Self {
        Self {
            sink,
            gate: Mutex::new(None),
        }
    }

    /// Report `fraction` of `phase` if it advances the phase's progress.
    pub(crate) fn report(&self, phase: Phase, fraction: f64) {
        let Some(cb) = &self.sink else { return };
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let mut gate = match self.gate.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((last_phase, last_fraction)) = *gate {
            if last_phase == phase && fraction <= last_fraction {
                return;
            }
        }
        *gate = Some((phase, fraction));

        if catch_unwind(AssertUnwindSafe(|| cb(phase, fraction))).is_err() {
            log::warn!(
                "progress callback panicked in phase {}; continuing",
                phase.name()
            );
        }
    }
}
