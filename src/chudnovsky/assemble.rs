//! Final rational-to-decimal assembly.
//!
//! With the root tuple (P, Q, T) over terms [1, N) and S = ⌊√10005·10^D′⌋:
//!
//! ```text
//! π · 10^D′ ≈ (426880 · S · Q) / (13591409·Q + T)
//! ```
//!
//! The 13591409·Q addend is the k = 0 term of the series, which the split
//! tuples deliberately exclude. The integer quotient carries D′ fractional
//! digits of π; the emitted string is truncated — never rounded — to the D
//! requested digits, so every output is a strict prefix of the expansion.

use rug::Integer;

use crate::error::{ComputeError, ComputeResult, VerifyFailure};

use super::split::SplitTuple;
use super::terms;

/// Render `"3."` followed by exactly `digits` fractional digits.
pub(crate) fn to_decimal(
    root: &SplitTuple,
    sqrt10005: &Integer,
    digits: u64,
) -> ComputeResult<String> {
    let numerator = Integer::from(sqrt10005 * &root.q) * terms::SERIES_PREFACTOR;
    let denominator = Integer::from(&root.q * terms::LINEAR_OFFSET) + &root.t;
    let scaled_pi = numerator / denominator;

    let text = scaled_pi.to_string();
    let needed = digits as usize + 1;
    if text.len() < needed {
        return Err(ComputeError::VerificationFailed {
            reason: VerifyFailure::Length,
        });
    }

    let mut out = String::with_capacity(digits as usize + 2);
    out.push_str(&text[..1]);
    out.push('.');
    out.push_str(&text[1..needed]);
    Ok(out)
}

/* --------------------------------- Tests ---------------------------------- */
