//! Work partitioning and parallel reduction for the series evaluation.
//!
//! Goals:
//! - **Contiguous**: each worker owns one [a, b) subrange; the concatenation
//!   of all subranges is exactly the full term range.
//! - **Ordered**: reduction always combines adjacent tuples with the lower
//!   index range on the left, because the merge rule is not symmetric.
//! - **Balanced**: with W > 1 workers the range is over-split (8 ranges per
//!   worker) so work stealing can even out the tail; merge associativity
//!   keeps the root tuple identical for every reduction tree.
//!
//! W = 1 uses a single range, i.e. the plain sequential recursion.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ComputeError, ComputeResult};
use crate::progress::{Phase, Reporter};
use crate::utils::pool;

use super::split::{split, SplitTuple};

/// Subranges handed to each worker, per worker, when W > 1.
const OVERSPLIT: usize = 8;

/// Evaluate the whole series (terms [1, n_terms)) across `threads` workers
/// and reduce to the root tuple.
pub(crate) fn series_root(
    n_terms: u64,
    threads: usize,
    reporter: &Reporter,
) -> ComputeResult<SplitTuple> {
    reporter.report(Phase::Split, 0.0);
    if n_terms <= 1 {
        reporter.report(Phase::Split, 1.0);
        return Ok(reduce(vec![SplitTuple::identity()], reporter));
    }

    let ranges = partition(1, n_terms, chunk_count(n_terms, threads));
    let total = ranges.len();
    let done = AtomicUsize::new(0);

    let eval = |&(lo, hi): &(u64, u64)| -> Result<SplitTuple, ()> {
        let tuple = catch_unwind(AssertUnwindSafe(|| split(lo, hi))).map_err(|_| ())?;
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.report(Phase::Split, finished as f64 / total as f64);
        Ok(tuple)
    };

    let outcomes: Vec<Result<SplitTuple, ()>> = if threads <= 1 || ranges.len() == 1 {
        ranges.iter().map(eval).collect()
    } else {
        pool::with_pool(threads, || pool::maybe_par_map(&ranges, 2, eval))?
    };

    let mut tuples = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(tuple) => tuples.push(tuple),
            Err(()) => return Err(ComputeError::WorkerPanicked("binary splitting")),
        }
    }
    reporter.report(Phase::Split, 1.0);
    Ok(reduce(tuples, reporter))
}

/// How many leaf ranges to carve [1, n_terms) into for `threads` workers.
fn chunk_count(n_terms: u64, threads: usize) -> usize {
    let leaves = (n_terms - 1) as usize;
    if threads <= 1 {
        1
    } else {
        threads.saturating_mul(OVERSPLIT).min(leaves).max(1)
    }
}

/// Split [lo, hi) into `parts` contiguous ranges whose sizes differ by at
/// most one, leftover terms going to the earliest ranges.
fn partition(lo: u64, hi: u64, parts: usize) -> Vec<(u64, u64)> {
    debug_assert!(lo < hi);
    debug_assert!(parts >= 1);
    let len = hi - lo;
    let parts = (parts as u64).min(len);
    let base = len / parts;
    let extra = len % parts;

    let mut out = Vec::with_capacity(parts as usize);
    let mut start = lo;
    for index in 0..parts {
        let size = base + u64::from(index < extra);
        out.push((start, start + size));
        start += size;
    }
    debug_assert_eq!(start, hi, "partition must cover [{lo}, {hi}) exactly");
    out
}

/// Merge adjacent tuples, lowest indices leftmost, until one remains.
///
/// Each round halves the list; an odd trailing tuple is carried into the
/// next round unchanged, which preserves the ascending-index ordering.
fn reduce(mut tuples: Vec<SplitTuple>, reporter: &Reporter) -> SplitTuple {
    reporter.report(Phase::Merge, 0.0);
    let total = tuples.len().saturating_sub(1).max(1);
    let mut merged = 0usize;

    while tuples.len() > 1 {
        let mut next = Vec::with_capacity(tuples.len() / 2 + 1);
        let mut iter = tuples.into_iter();
        while let Some(left) = iter.next() {
            match iter.next() {
                Some(right) => {
                    next.push(left.merge(right));
                    merged += 1;
                    reporter.report(Phase::Merge, merged as f64 / total as f64);
                }
                None => next.push(left),
            }
        }
        tuples = next;
    }

    reporter.report(Phase::Merge, 1.0);
    match tuples.pop() {
        Some(root) => root,
        None => unreachable!("reduction always starts with at least one tuple"),
    }
}

/* --------------------------------- Tests ---------------------------------- */
