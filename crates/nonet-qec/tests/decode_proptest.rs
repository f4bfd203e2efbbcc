//! Property-based tests for decoding and register contracts.

use nonet_hal::Counts;
use nonet_ir::{Circuit, QubitId};
use nonet_qec::{
    LogicalValue, QecError, RegisterRole, decode, encode, extract_syndromes, majority_vote,
};
use proptest::prelude::*;

fn arb_bitstring(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::bool::ANY, len)
        .prop_map(|bits| bits.into_iter().map(|b| if b { '1' } else { '0' }).collect())
}

fn arb_table() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec((arb_bitstring(9), 0u64..10_000), 1..40)
}

proptest! {
    #[test]
    fn probabilities_sum_to_one(pairs in arb_table()) {
        let counts = Counts::from_pairs(pairs);
        match decode(&counts) {
            Ok(dist) => {
                prop_assert!((dist.sum() - 1.0).abs() < 1e-9);
                prop_assert_eq!(dist.zero_count + dist.one_count, counts.total_shots());
            }
            Err(QecError::EmptyOutcomeTable) => prop_assert_eq!(counts.total_shots(), 0),
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    #[test]
    fn decode_is_pure(pairs in arb_table()) {
        let counts = Counts::from_pairs(pairs);
        let snapshot = counts.clone();
        let first = decode(&counts).ok();
        let second = decode(&counts).ok();
        prop_assert_eq!(first, second);
        prop_assert_eq!(counts, snapshot);
    }

    #[test]
    fn vote_follows_strict_majority(len in 0usize..16, seed in arb_bitstring(16)) {
        let s = &seed[..len];
        let zeros = s.chars().filter(|&c| c == '0').count();
        let expected = if 2 * zeros > len { LogicalValue::Zero } else { LogicalValue::One };
        prop_assert_eq!(majority_vote(s).unwrap(), expected);
    }

    #[test]
    fn complement_flips_nine_bit_vote(s in arb_bitstring(9)) {
        let flipped: String = s.chars().map(|c| if c == '0' { '1' } else { '0' }).collect();
        prop_assert_ne!(majority_vote(&s).unwrap(), majority_vote(&flipped).unwrap());
    }

    #[test]
    fn encode_requires_nine_data_qubits(size in 0u32..20) {
        prop_assume!(size != 9);
        let mut circuit = Circuit::with_size("sizes", 20, 0);
        let data: Vec<QubitId> = (0..size).map(QubitId).collect();

        let err = encode(&mut circuit, &data).unwrap_err();
        let is_data_size_error = matches!(
            err,
            QecError::InvalidRegisterSize { role: RegisterRole::Data, expected: 9, got }
                if got == size as usize
        );
        prop_assert!(is_data_size_error);
        prop_assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn extraction_requires_six_ancillas(size in 0u32..12) {
        prop_assume!(size != 6);
        let mut circuit = Circuit::with_size("sizes", 21, 0);
        let data: Vec<QubitId> = (0..9).map(QubitId).collect();
        let ancillas: Vec<QubitId> = (9..9 + size).map(QubitId).collect();

        let err = extract_syndromes(&mut circuit, &data, &ancillas).unwrap_err();
        let is_ancilla_size_error = matches!(
            err,
            QecError::InvalidRegisterSize { role: RegisterRole::Ancilla, expected: 6, .. }
        );
        prop_assert!(is_ancilla_size_error);
    }
}
