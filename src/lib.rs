//! pi_engine — arbitrary-precision π via the Chudnovsky series.
//!
//! The engine evaluates the Chudnovsky hypergeometric series with binary
//! splitting over exact integers (`rug`/GMP), takes one integer square root
//! of 10005 at working precision, and assembles the decimal expansion by a
//! single exact division. Every digit it emits is a true prefix of π.
//!
//! Features:
//! - `rayon` (default): leaf ranges are evaluated on a scoped thread pool;
//!   with the feature off, the same code paths run sequentially.
//!
//! ### What this is (and isn't)
//! This is the numeric core only: a pure function from a digit count to a
//! decimal string, plus a streaming progress callback. Prompting, progress
//! bars, and file output are caller concerns. There is no I/O, no global
//! state, and no persisted state inside the engine.
//!
//! ### Quick start
//! ```
//! let pi = pi_engine::compute_pi(50).unwrap();
//! assert!(pi.starts_with("3.14159265358979323846"));
//! ```
//!
//! Determinism: for a fixed digit count the output is identical across all
//! parallelism settings; only intermediate allocation sizes differ.

#![deny(rust_2018_idioms, unused_must_use)]

pub mod chudnovsky;
pub mod error;
pub mod progress;
pub mod utils;

pub use chudnovsky::{
    compute_pi, compute_pi_with, estimate_peak_memory, ComputeOptions, MAX_DIGITS,
};
pub use error::{ComputeError, ComputeResult, VerifyFailure};
pub use progress::{Phase, ProgressFn};
