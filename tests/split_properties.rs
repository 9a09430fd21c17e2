//! Algebraic properties of the split tuples, exercised through the public
//! `chudnovsky::split` API.

use pi_engine::chudnovsky::split::{split, SplitTuple};
use pi_engine::chudnovsky::terms;

#[test]
fn merge_is_associative_across_contiguous_partitions() {
    // Every 2-cut and 3-cut of [1, 12) must agree with the direct evaluation.
    let whole = split(1, 12);
    for first_cut in 2..12 {
        let two = split(1, first_cut).merge(split(first_cut, 12));
        assert_eq!(two, whole, "cut at {first_cut}");
        for second_cut in (first_cut + 1)..12 {
            let three = split(1, first_cut)
                .merge(split(first_cut, second_cut))
                .merge(split(second_cut, 12));
            assert_eq!(three, whole, "cuts at {first_cut}, {second_cut}");
        }
    }
}

#[test]
fn grouping_direction_does_not_matter() {
    let (a, b, c) = (split(1, 5), split(5, 9), split(9, 14));
    assert_eq!(
        a.clone().merge(b.clone()).merge(c.clone()),
        a.merge(b.merge(c))
    );
}

#[test]
fn identity_absorbs_into_any_range() {
    let range = split(3, 9);
    assert_eq!(SplitTuple::identity().merge(range.clone()), range);
    assert_eq!(range.clone().merge(SplitTuple::identity()), range);
}

#[test]
fn tuple_growth_tracks_the_range_length() {
    // |Q| grows with (b−a)·avg_term_bits: a strict increase per extra term.
    let mut previous_bits = 0u32;
    for end in 2u64..10 {
        let bits = split(1, end).q.significant_bits();
        assert!(
            bits > previous_bits,
            "Q bits did not grow at range end {end}"
        );
        previous_bits = bits;
    }
}

#[test]
fn root_tuples_for_common_digit_counts_are_well_formed() {
    // End-to-end digit checks live in known_digits.rs; here only the tuple
    // invariants: at least two terms, and a positive Q.
    for digits in [1u64, 2, 10, 15, 50, 100, 1_000] {
        let n = terms::term_count(digits);
        assert!(n >= 2, "term count for {digits} digits");
        let root = split(1, n);
        assert_eq!(root.q.cmp0(), std::cmp::Ordering::Greater);
    }
}
