//! Binary splitting over the Chudnovsky series.
//!
//! A contiguous index range [a, b) of series terms is summarized by three
//! exact integers (P, Q, T) such that the partial sum over the range equals
//! T / Q (with P carrying the running product needed to graft ranges
//! together). Ranges combine by a fixed algebraic rule, so evaluating the
//! whole series reduces to a tree of big-integer multiplications — which is
//! where GMP's sub-quadratic multiplication earns its keep.
//!
//! ### Convention
//! Tuples cover term indices k ≥ 1 only. Term 0 is degenerate (p₀ = q₀ = 1)
//! and its coefficient 13591409 is added directly in the final assembly; an
//! empty range is the merge identity (1, 1, 0).
//!
//! ### Ordering
//! The merge rule `T = T_L·Q_R + P_L·T_R` is not symmetric in L and R. Left
//! operands must always cover the lower index range; violating this silently
//! corrupts digits rather than failing loudly.

use rug::Integer;

use super::terms;

/// Exact partial evaluation of the series over a contiguous index range.
///
/// Invariants: `q` is positive; `p` and `t` are signed (each term index
/// k ≥ 1 contributes one negative factor through p_k).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTuple {
    pub p: Integer,
    pub q: Integer,
    pub t: Integer,
}

impl SplitTuple {
    /// The empty-range tuple: a two-sided identity of [`SplitTuple::merge`].
    pub fn identity() -> Self {
        Self {
            p: Integer::from(1),
            q: Integer::from(1),
            t: Integer::new(),
        }
    }

    /// Single-term tuple for index `k ≥ 1`:
    ///
    /// ```text
    /// p_k = −(6k−5)(2k−1)(6k−1)
    /// q_k = k³ · C³/24
    /// T   = p_k · (545140134·k + 13591409)
    /// ```
    pub fn leaf(k: u64) -> Self {
        debug_assert!(k >= 1, "term 0 enters at assembly, not as a leaf");
        let wide = k as u128;
        let p_magnitude = (6 * wide - 5) * (2 * wide - 1) * (6 * wide - 1);
        let p = -Integer::from(p_magnitude);
        let q = Integer::from(wide * wide * wide) * terms::C3_OVER_24;
        let t = Integer::from(&p * terms::linear_term(k));
        Self { p, q, t }
    }

    /// Combine two adjacent ranges; `self` must cover the lower indices.
    ///
    /// Both operands are consumed, and their allocations reused, so absorbed
    /// leaves free their memory as soon as a parent exists.
    pub fn merge(mut self, rhs: Self) -> Self {
        let mut t = Integer::from(&self.t * &rhs.q);
        t += Integer::from(&self.p * &rhs.t);
        self.p *= rhs.p;
        self.q *= rhs.q;
        Self {
            p: self.p,
            q: self.q,
            t,
        }
    }
}

/// Evaluate the series over [a, b) by recursive halving.
///
/// Requires 1 ≤ a ≤ b; `a == b` yields the identity tuple. This is the
/// sequential engine; the scheduler in [`crate::chudnovsky`] feeds it
/// per-worker subranges and reduces the results with the same merge rule.
pub fn split(a: u64, b: u64) -> SplitTuple {
    assert!(a >= 1, "split range must start at term index 1 or later");
    assert!(a <= b, "split range start {a} exceeds end {b}");
    if a == b {
        return SplitTuple::identity();
    }
    split_range(a, b)
}

fn split_range(a: u64, b: u64) -> SplitTuple {
    if b - a == 1 {
        return SplitTuple::leaf(a);
    }
    let m = (a + b) / 2;
    split_range(a, m).merge(split_range(m, b))
}

/* --------------------------------- Tests ---------------------------------- */
