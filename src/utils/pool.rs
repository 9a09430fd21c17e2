//! Scoped thread-pool utilities.
//!
//! - Parallelism resolution with env overrides and a cached hardware default
//! - A scoped local pool for parallel regions (no global-pool mutation, so a
//!   host application's own rayon configuration is never disturbed)
//! - Helpers that degrade to sequential execution when the `rayon` feature
//!   is disabled, keeping call sites free of `cfg` peppering
//!
//! Environment variables (explicit options always win):
//! - `PI_ENGINE_THREADS`: integer ≥ 1, overrides the auto worker count
//! - `PI_ENGINE_STACK`:   per-worker stack size in bytes
//! - `PI_ENGINE_NAME`:    worker thread-name prefix (default: "pi-engine-w")

use once_cell::sync::Lazy;

use crate::error::{ComputeError, ComputeResult};

pub const ENV_THREADS: &str = "PI_ENGINE_THREADS";
pub const ENV_STACK: &str = "PI_ENGINE_STACK";
pub const ENV_NAME: &str = "PI_ENGINE_NAME";

static AUTO_PARALLELISM: Lazy<usize> = Lazy::new(|| {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
});

/// Hardware thread count, probed once per process.
#[inline]
pub fn auto_parallelism() -> usize {
    *AUTO_PARALLELISM
}

/// Resolve an effective worker count: explicit request, else
/// `PI_ENGINE_THREADS`, else the hardware thread count. Always ≥ 1.
pub fn resolve_parallelism(requested: Option<usize>) -> usize {
    match requested {
        Some(0) => {
            log::warn!("parallelism 0 requested; clamping to 1");
            1
        }
        Some(n) => n,
        None => env_threads().unwrap_or_else(auto_parallelism),
    }
}

fn env_threads() -> Option<usize> {
    std::env::var(ENV_THREADS)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
}

#[cfg(feature = "rayon")]
fn env_stack_size() -> Option<usize> {
    std::env::var(ENV_STACK)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

#[cfg(feature = "rayon")]
fn thread_name_prefix() -> String {
    std::env::var(ENV_NAME)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "pi-engine-w".to_string())
}

/// Run `f` inside a scoped pool of `num_threads` workers.
///
/// Parallel work spawned inside `f` via rayon combinators uses this pool.
/// Without the `rayon` feature, `f` runs on the calling thread.
pub fn with_pool<F, R>(num_threads: usize, f: F) -> ComputeResult<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    with_pool_impl(num_threads, f)
}

/// Map over `input`, in parallel when rayon is available and the input is at
/// least `threshold` items; sequentially otherwise.
pub fn maybe_par_map<T, U, F>(input: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Send + Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    maybe_par_map_impl(input, threshold, f)
}

/* ------------------ cfg(feature = "rayon") impls ------------------ */

#[cfg(feature = "rayon")]
fn with_pool_impl<F, R>(num_threads: usize, f: F) -> ComputeResult<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    use rayon::ThreadPoolBuilder;

    let name = thread_name_prefix();
    let mut builder = ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .thread_name(move |i| format!("{}-{:02}", name, i + 1));
    if let Some(size) = env_stack_size() {
        builder = builder.stack_size(size);
    }

    let pool = builder
        .build()
        .map_err(|_| ComputeError::OutOfMemory("failed to spawn worker threads"))?;
    Ok(pool.install(f))
}

#[cfg(not(feature = "rayon"))]
fn with_pool_impl<F, R>(_num_threads: usize, f: F) -> ComputeResult<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    Ok(f())
}

#[cfg(feature = "rayon")]
fn maybe_par_map_impl<T, U, F>(input: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Send + Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    use rayon::prelude::*;
    if input.len() >= threshold {
        input.par_iter().map(|t| f(t)).collect()
    } else {
        input.iter().map(|t| f(t)).collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn maybe_par_map_impl<T, U, F>(input: &[T], _threshold: usize, f: F) -> Vec<U>
where
    T: Send + Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    input.iter().map(|t| f(t)).collect()
}

/* ------------------------------ Tests ------------------------------ */
