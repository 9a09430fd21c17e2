//! Shared helpers for the `pi_engine` integration tests.
//!
//! Usage:
//! ```ignore
//! mod common;
//! use common::*;
//!
//! #[test]
//! fn my_test() {
//!     init_logs();
//!     assert_eq!(pi_engine::compute_pi(50).unwrap(), PI_50);
//! }
//! ```

/// First 50 fractional digits of π, as the engine renders them.
#[allow(dead_code)]
pub const PI_50: &str = "3.14159265358979323846264338327950288419716939937510";

/// Route `log` output through env_logger once per test binary; repeated calls
/// are no-ops. Run with `RUST_LOG=debug` to see per-phase timings.
#[allow(dead_code)]
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The fractional digits of an engine output (everything after `"3."`).
#[allow(dead_code)]
pub fn fraction(decimal: &str) -> &str {
    decimal
        .strip_prefix("3.")
        .expect("engine output must start with \"3.\"")
}
