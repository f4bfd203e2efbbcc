//! Property-based tests for circuit validation and layering.

use nonet_ir::{Circuit, ClbitId, QubitId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    H(u32),
    CX(u32, u32),
    Measure(u32, u32),
}

fn arb_op(max_index: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..max_index).prop_map(Op::H),
        (0..max_index, 0..max_index).prop_map(|(c, t)| Op::CX(c, t)),
        (0..max_index, 0..max_index).prop_map(|(q, c)| Op::Measure(q, c)),
    ]
}

/// Apply ops to a 4-qubit, 4-clbit circuit, returning how many were accepted.
/// Operand indices go up to 5 so some ops are deliberately out of range.
fn build(ops: &[Op]) -> (Circuit, usize) {
    let mut circuit = Circuit::with_size("prop", 4, 4);
    let mut accepted = 0;
    for op in ops {
        let ok = match *op {
            Op::H(q) => circuit.h(QubitId(q)).is_ok(),
            Op::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)).is_ok(),
            Op::Measure(q, c) => circuit.measure(QubitId(q), ClbitId(c)).is_ok(),
        };
        if ok {
            accepted += 1;
        }
    }
    (circuit, accepted)
}

proptest! {
    #[test]
    fn rejected_ops_leave_no_trace(ops in prop::collection::vec(arb_op(6), 0..40)) {
        let (circuit, accepted) = build(&ops);
        prop_assert_eq!(circuit.num_ops(), accepted);
        prop_assert!(circuit.depth() <= circuit.num_ops());
    }

    #[test]
    fn every_clbit_measured_at_most_once(ops in prop::collection::vec(arb_op(6), 0..40)) {
        let (circuit, _) = build(&ops);
        let mut writes = [0usize; 4];
        for inst in circuit.instructions() {
            for c in &inst.clbits {
                writes[c.0 as usize] += 1;
            }
        }
        prop_assert!(writes.iter().all(|&w| w <= 1));
    }

    #[test]
    fn json_export_reimports_identically(ops in prop::collection::vec(arb_op(4), 0..30)) {
        let (circuit, _) = build(&ops);
        let back = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        prop_assert_eq!(back.instructions(), circuit.instructions());
        prop_assert_eq!(back.depth(), circuit.depth());
    }
}
