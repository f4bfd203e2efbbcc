//! Statistical assertions shared by the sampling tests.

#![allow(dead_code)]

use nonet_hal::Counts;

/// Tolerance for rates estimated from a few thousand shots.
pub const TOLERANCE_LOW_SAMPLES: f64 = 0.10;

/// Tolerance for per-outcome rates of an eight-way distribution.
pub const TOLERANCE_PER_OUTCOME: f64 = 0.20;

/// Assert that `observed / total` is within `relative_tolerance` of `expected_probability`.
#[allow(clippy::cast_precision_loss)]
pub fn assert_rate_within_tolerance(
    observed: u64,
    total: u64,
    expected_probability: f64,
    relative_tolerance: f64,
    context: &str,
) {
    let observed_rate = observed as f64 / total as f64;
    let lower = expected_probability * (1.0 - relative_tolerance);
    let upper = expected_probability * (1.0 + relative_tolerance);
    assert!(
        (lower..upper).contains(&observed_rate),
        "{context}: observed rate {observed_rate:.4} deviates from expected \
         {expected_probability:.4} by more than {:.0}%",
        relative_tolerance * 100.0
    );
}

/// Assert that `counts` holds exactly `outcomes`, each at rate `1 / outcomes.len()`.
pub fn assert_uniform_over(counts: &Counts, outcomes: &[String], relative_tolerance: f64, context: &str) {
    let total = counts.total_shots();
    let expected = 1.0 / outcomes.len() as f64;

    assert_eq!(counts.len(), outcomes.len(), "{context}: unexpected outcome set {counts:?}");
    for outcome in outcomes {
        assert_rate_within_tolerance(
            counts.get(outcome),
            total,
            expected,
            relative_tolerance,
            &format!("{context} [{outcome}]"),
        );
    }
}

/// The eight strings whose three triplets are each `000` or `111`.
pub fn triplet_constant_strings() -> Vec<String> {
    (0..8u32)
        .map(|n| {
            (0..3)
                .map(|t| if n >> t & 1 == 1 { "111" } else { "000" })
                .collect()
        })
        .collect()
}

/// The eight strings `xyzxyzxyz`.
pub fn repeated_triplet_strings() -> Vec<String> {
    (0..8u32)
        .map(|n| {
            let triplet: String = (0..3)
                .map(|i| if n >> i & 1 == 1 { '1' } else { '0' })
                .collect();
            triplet.repeat(3)
        })
        .collect()
}
