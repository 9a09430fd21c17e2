//! Output self-checks and reference digests.
//!
//! The verifier runs after every assembly and asserts three cheap shape
//! properties: the output starts with the known `3.14159` prefix (or its
//! leading slice for very small precisions), has exactly `digits + 2`
//! characters, and contains only ASCII digits after the point. A failure is
//! an engine bug and surfaces as a structured error; nothing is repaired.
//!
//! The digest helpers hash the fractional digits with SHA-256 so callers can
//! compare long runs against published reference hashes instead of shipping
//! megabytes of expected digits.

use sha2::{Digest as _, Sha256};

use crate::error::{ComputeError, ComputeResult, VerifyFailure};

/// Known leading digits every output must reproduce.
const PI_PREFIX: &str = "3.14159";

/// Validate the shape of an assembled decimal string.
pub(crate) fn check(out: &str, digits: u64) -> ComputeResult<()> {
    let fail = |reason| Err(ComputeError::VerificationFailed { reason });

    if out.len() as u64 != digits + 2 {
        return fail(VerifyFailure::Length);
    }
    let head = PI_PREFIX.len().min(out.len());
    if out.as_bytes()[..head] != PI_PREFIX.as_bytes()[..head] {
        return fail(VerifyFailure::Prefix);
    }
    if !out.as_bytes()[2..].iter().all(u8::is_ascii_digit) {
        return fail(VerifyFailure::CharSet);
    }
    Ok(())
}

/// SHA-256 over the fractional digits of a `"3.…"` decimal string.
///
/// Returns `None` when the input is not a well-formed engine output (so a
/// mangled string cannot masquerade as a matching reference digest).
pub fn fractional_sha256(decimal: &str) -> Option<[u8; 32]> {
    let fraction = decimal.strip_prefix("3.")?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut hasher = Sha256::new();
    hasher.update(fraction.as_bytes());
    Some(hasher.finalize().into())
}

/// Lowercase-hex form of [`fractional_sha256`].
pub fn fractional_sha256_hex(decimal: &str) -> Option<String> {
    fractional_sha256(decimal).map(|digest| to_lower_hex(&digest))
}

#[inline]
fn to_lower_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut s = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        s.push(HEX[(b >> 4) as usize] as char);
        s.push(HEX[(b & 0x0f) as usize] as char);
    }
    s
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reference_outputs_at_every_scale() {
        check("3.1", 1).unwrap();
        check("3.14", 2).unwrap();
        check("3.1415926535", 10).unwrap();
        check(
            "3.14159265358979323846264338327950288419716939937510",
            50,
        )
        .unwrap();
    }

    #[test]
    fn rejects_a_wrong_leading_digit() {
        let err = check("3.24159265", 8).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::VerificationFailed {
                reason: VerifyFailure::Prefix
            }
        ));
    }

    #[test]
    fn rejects_a_length_mismatch() {
        let err = check("3.14159", 10).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::VerificationFailed {
                reason: VerifyFailure::Length
            }
        ));
    }

    #[test]
    fn rejects_non_digit_characters_after_the_point() {
        let err = check("3.141592x5", 8).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::VerificationFailed {
                reason: VerifyFailure::CharSet
            }
        ));
    }

    #[test]
    fn digest_requires_a_well_formed_decimal() {
        assert!(fractional_sha256("3.").is_none());
        assert!(fractional_sha256("2.71828").is_none());
        assert!(fractional_sha256("3.14x59").is_none());
        assert!(fractional_sha256("3.1415").is_some());
    }

    #[test]
    fn digest_matches_hashing_the_fraction_directly() {
        let mut hasher = Sha256::new();
        hasher.update(b"1415926535");
        let want: [u8; 32] = hasher.finalize().into();
        assert_eq!(fractional_sha256("3.1415926535"), Some(want));
    }

    #[test]
    fn hex_digest_is_lowercase_and_64_chars() {
        let hex = fractional_sha256_hex("3.14159").unwrap();
        assert_eq!(hex.len(), 64);
        assert!(hex.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[test]
    fn different_digit_runs_give_different_digests() {
        let a = fractional_sha256_hex("3.1415").unwrap();
        let b = fractional_sha256_hex("3.14159").unwrap();
        assert_ne!(a, b);
    }
}
