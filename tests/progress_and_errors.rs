//! Progress-callback contract and error surfaces.

mod common;
use common::*;

use std::sync::{Arc, Mutex};

use pi_engine::{compute_pi, compute_pi_with, ComputeError, ComputeOptions, Phase};

type Trace = Arc<Mutex<Vec<(Phase, f64)>>>;

fn traced_options() -> (ComputeOptions, Trace) {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));
    let sink = trace.clone();
    let opts = ComputeOptions::default().with_progress(move |phase, fraction| {
        sink.lock().unwrap().push((phase, fraction));
    });
    (opts, trace)
}

#[test]
fn every_phase_reports_start_and_completion() {
    init_logs();
    let (opts, trace) = traced_options();
    compute_pi_with(100, &opts).unwrap();

    let events = trace.lock().unwrap();
    for phase in [Phase::Split, Phase::Merge, Phase::Sqrt, Phase::Assemble] {
        assert!(
            events.contains(&(phase, 0.0)),
            "missing start event for {}",
            phase.name()
        );
        assert!(
            events.contains(&(phase, 1.0)),
            "missing completion event for {}",
            phase.name()
        );
    }
}

#[test]
fn fractions_are_monotonic_within_each_phase_and_in_range() {
    let (opts, trace) = traced_options();
    compute_pi_with(500, &opts.with_parallelism(4)).unwrap();

    let events = trace.lock().unwrap();
    let mut last: Option<(Phase, f64)> = None;
    for &(phase, fraction) in events.iter() {
        assert!((0.0..=1.0).contains(&fraction));
        if let Some((previous_phase, previous_fraction)) = last {
            if previous_phase == phase {
                assert!(
                    fraction > previous_fraction,
                    "{} went from {previous_fraction} to {fraction}",
                    phase.name()
                );
            }
        }
        last = Some((phase, fraction));
    }
}

#[test]
fn phases_arrive_in_execution_order() {
    let (opts, trace) = traced_options();
    compute_pi_with(60, &opts).unwrap();

    let events = trace.lock().unwrap();
    let order: Vec<Phase> = {
        let mut seen = Vec::new();
        for &(phase, _) in events.iter() {
            if seen.last() != Some(&phase) {
                seen.push(phase);
            }
        }
        seen
    };
    assert_eq!(
        order,
        vec![Phase::Split, Phase::Merge, Phase::Sqrt, Phase::Assemble]
    );
}

#[test]
fn a_panicking_callback_does_not_fail_the_computation() {
    let opts = ComputeOptions::default().with_progress(|_, _| panic!("host bug"));
    let pi = compute_pi_with(25, &opts).expect("engine must survive callback panics");
    assert!(pi.starts_with("3.14159"));
}

#[test]
fn zero_digits_is_rejected() {
    assert!(matches!(
        compute_pi(0),
        Err(ComputeError::InvalidPrecision(0))
    ));
}

#[test]
fn absurd_digit_counts_are_rejected_before_any_allocation() {
    assert!(matches!(
        compute_pi(u64::MAX),
        Err(ComputeError::InvalidPrecision(_))
    ));
}

#[test]
fn errors_render_human_readable_messages() {
    let message = compute_pi(0).unwrap_err().to_string();
    assert!(message.contains("invalid precision"));
}
