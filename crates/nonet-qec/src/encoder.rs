//! Logical-to-physical encoding.

use nonet_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::QecResult;
use crate::register::{self, column, triplet};

/// Encodes the state of `data[0]` into the whole data register.
pub trait Encoder: Send + Sync {
    /// Stage name used in logs.
    fn name(&self) -> &str;

    /// Append the encoding gates.
    fn apply(&self, circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()>;
}

/// The nine-qubit Shor encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShorEncoder;

impl Encoder for ShorEncoder {
    fn name(&self) -> &str {
        "shor"
    }

    fn apply(&self, circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()> {
        register::check_data(circuit, data)?;

        // Bit-flip repetition inside each triplet.
        for i in 0..3 {
            let [lead, a, b] = triplet(i).map(|p| data[p]);
            circuit.h(lead)?.cx(lead, a)?.cx(lead, b)?;
        }

        // Phase layer across triplets: 0->3, 0->6, 1->4, 1->7, 2->5, 2->8.
        for i in 0..3 {
            let [lead, a, b] = column(i).map(|p| data[p]);
            circuit.cx(lead, a)?.cx(lead, b)?;
        }

        debug!("encoded logical qubit {} into {} data qubits", data[0], data.len());
        Ok(())
    }
}

/// Append the Shor encoding of `data[0]` to `circuit`.
pub fn encode(circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()> {
    ShorEncoder.apply(circuit, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QecError;
    use crate::register::{CodeRegister, RegisterRole};
    use nonet_ir::{GateKind, InstructionKind};

    #[test]
    fn test_encode_gate_sequence() {
        let mut circuit = Circuit::new("encode");
        let reg = CodeRegister::allocate(&mut circuit);
        encode(&mut circuit, &reg.data).unwrap();

        let ops: Vec<(InstructionKind, Vec<u32>)> = circuit
            .instructions()
            .iter()
            .map(|inst| (inst.kind, inst.qubits.iter().map(|q| q.0).collect()))
            .collect();

        let h = InstructionKind::Gate(GateKind::H);
        let cx = InstructionKind::Gate(GateKind::CX);
        let expected = vec![
            (h, vec![0]),
            (cx, vec![0, 1]),
            (cx, vec![0, 2]),
            (h, vec![3]),
            (cx, vec![3, 4]),
            (cx, vec![3, 5]),
            (h, vec![6]),
            (cx, vec![6, 7]),
            (cx, vec![6, 8]),
            (cx, vec![0, 3]),
            (cx, vec![0, 6]),
            (cx, vec![1, 4]),
            (cx, vec![1, 7]),
            (cx, vec![2, 5]),
            (cx, vec![2, 8]),
        ];
        assert_eq!(ops, expected);
        assert_eq!(circuit.count_ops().get("measure"), None);
    }

    #[test]
    fn test_encode_wrong_size() {
        let mut circuit = Circuit::with_size("short", 8, 0);
        let data: Vec<QubitId> = (0..8).map(QubitId).collect();

        let err = encode(&mut circuit, &data).unwrap_err();
        assert!(matches!(
            err,
            QecError::InvalidRegisterSize {
                role: RegisterRole::Data,
                expected: 9,
                got: 8
            }
        ));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_encode_missing_qubit_leaves_circuit_untouched() {
        let mut circuit = Circuit::with_size("small", 5, 0);
        let data: Vec<QubitId> = (0..9).map(QubitId).collect();

        let err = encode(&mut circuit, &data).unwrap_err();
        assert!(matches!(err, QecError::Ir(_)));
        assert_eq!(circuit.num_ops(), 0);
    }
}
