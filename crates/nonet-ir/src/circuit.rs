//! High-level circuit builder API.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// A circuit is an ordered list of [`Instruction`]s over a fixed set of
/// qubits and classical bits. Instructions are validated as they are
/// appended, so a `Circuit` value always satisfies:
///
/// - every operand refers to a qubit or classical bit of this circuit;
/// - gates receive the number of distinct qubits they require;
/// - each classical bit is written by at most one measurement.
#[derive(Debug, Clone, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit, indexed by id.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit, indexed by id.
    clbits: Vec<Clbit>,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
    /// Classical bits already written by a measurement.
    #[serde(skip)]
    measured: FxHashSet<ClbitId>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
            measured: FxHashSet::default(),
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    fn next_qubit_id(&self) -> QubitId {
        QubitId(self.qubits.len() as u32)
    }

    fn next_clbit_id(&self) -> ClbitId {
        ClbitId(self.clbits.len() as u32)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_qubit_id();
                self.qubits.push(Qubit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.next_clbit_id();
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_clbit_id();
                self.clbits.push(Clbit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(GateKind::H, qubit))?;
        Ok(self)
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(GateKind::CX, control, target))?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure `qubits[i]` into `clbits[i]` for every `i`.
    ///
    /// Nothing is appended if the lists differ in length or any single
    /// measurement would be rejected.
    pub fn measure_all_into(&mut self, qubits: &[QubitId], clbits: &[ClbitId]) -> IrResult<&mut Self> {
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureLengthMismatch {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        let mut seen = FxHashSet::default();
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.check_measure(q, c)?;
            if !seen.insert(c) {
                return Err(IrError::ClbitAlreadyMeasured { clbit: c });
            }
        }
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.apply(Instruction::measure(q, c))?;
        }
        Ok(self)
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        match instruction.kind {
            InstructionKind::Gate(gate) => self.check_gate(gate, &instruction.qubits)?,
            InstructionKind::Measure => {
                let (&[qubit], &[clbit]) =
                    (instruction.qubits.as_slice(), instruction.clbits.as_slice())
                else {
                    return Err(IrError::MeasureLengthMismatch {
                        qubits: instruction.qubits.len(),
                        clbits: instruction.clbits.len(),
                    });
                };
                self.check_measure(qubit, clbit)?;
                self.measured.insert(clbit);
            }
        }
        self.instructions.push(instruction);
        Ok(())
    }

    fn check_qubit(&self, qubit: QubitId, gate_name: Option<&str>) -> IrResult<()> {
        if (qubit.0 as usize) < self.qubits.len() {
            Ok(())
        } else {
            Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate_name.map(String::from),
            })
        }
    }

    fn check_gate(&self, gate: GateKind, qubits: &[QubitId]) -> IrResult<()> {
        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().into(),
                expected: gate.num_qubits(),
                got: qubits.len() as u32,
            });
        }
        for (i, &q) in qubits.iter().enumerate() {
            self.check_qubit(q, Some(gate.name()))?;
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(gate.name().into()),
                });
            }
        }
        Ok(())
    }

    fn check_measure(&self, qubit: QubitId, clbit: ClbitId) -> IrResult<()> {
        self.check_qubit(qubit, Some("measure"))?;
        if (clbit.0 as usize) >= self.clbits.len() {
            return Err(IrError::ClbitNotFound { clbit });
        }
        if self.measured.contains(&clbit) {
            return Err(IrError::ClbitAlreadyMeasured { clbit });
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Whether any instruction already acts on `qubit`.
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.instructions.iter().any(|inst| inst.acts_on(qubit))
    }

    /// Whether `clbit` has been written by a measurement.
    pub fn is_measured(&self, clbit: ClbitId) -> bool {
        self.measured.contains(&clbit)
    }

    /// Number of instructions per name (`h`, `cx`, `measure`).
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Get the circuit depth.
    ///
    /// Instructions are layered greedily: each one lands one layer after the
    /// latest layer of any qubit or classical bit it uses.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.qubits.len()];
        let mut clbit_level = vec![0usize; self.clbits.len()];
        let mut depth = 0;

        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.0 as usize]))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                qubit_level[q.0 as usize] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.0 as usize] = level;
            }
            depth = depth.max(level);
        }

        depth
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Rebuild a circuit from its parts, re-validating every instruction.
    pub fn from_parts(
        name: impl Into<String>,
        qubits: Vec<Qubit>,
        clbits: Vec<Clbit>,
        instructions: Vec<Instruction>,
    ) -> IrResult<Self> {
        for (i, q) in qubits.iter().enumerate() {
            if q.id.0 as usize != i {
                return Err(IrError::InvalidCircuitData(format!(
                    "qubit at position {i} has id {}",
                    q.id
                )));
            }
        }
        for (i, c) in clbits.iter().enumerate() {
            if c.id.0 as usize != i {
                return Err(IrError::InvalidCircuitData(format!(
                    "classical bit at position {i} has id {}",
                    c.id
                )));
            }
        }

        let mut circuit = Self {
            name: name.into(),
            qubits,
            clbits,
            instructions: Vec::with_capacity(instructions.len()),
            measured: FxHashSet::default(),
        };
        for inst in instructions {
            circuit.apply(inst)?;
        }
        Ok(circuit)
    }

    /// Serialize the circuit to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a circuit from JSON produced by [`Circuit::to_json`].
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    instructions: Vec<Instruction>,
}

impl<'de> Deserialize<'de> for Circuit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCircuit::deserialize(deserializer)?;
        Circuit::from_parts(raw.name, raw.qubits, raw.clbits, raw.instructions)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();
        circuit
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let data = circuit.add_qreg("q", 9);
        let ancillas = circuit.add_qreg("ancilla", 6);
        let creg = circuit.add_creg("c", 9);

        assert_eq!(data.first(), Some(&QubitId(0)));
        assert_eq!(ancillas.first(), Some(&QubitId(9)));
        assert_eq!(creg.last(), Some(&ClbitId(8)));
        assert_eq!(circuit.num_qubits(), 15);
        assert_eq!(circuit.num_clbits(), 9);
        assert_eq!(circuit.qubits()[10].to_string(), "ancilla[1]");
    }

    #[test]
    fn test_fluent_api_and_depth() {
        let circuit = bell();
        assert_eq!(circuit.num_ops(), 4);
        // H, CX, parallel measures
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_count_ops() {
        let counts = bell().count_ops();
        assert_eq!(counts["h"], 1);
        assert_eq!(counts["cx"], 1);
        assert_eq!(counts["measure"], 2);
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit
            .apply(Instruction::gate(GateKind::H, [QubitId(0), QubitId(1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 1,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_clbit_measured_twice_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(circuit.is_measured(ClbitId(0)));

        let err = circuit.measure(QubitId(1), ClbitId(0)).unwrap_err();
        assert!(matches!(err, IrError::ClbitAlreadyMeasured { clbit: ClbitId(0) }));
    }

    #[test]
    fn test_measure_all_into_is_atomic() {
        let mut circuit = Circuit::with_size("test", 3, 3);
        circuit.measure(QubitId(2), ClbitId(2)).unwrap();

        let qubits = [QubitId(0), QubitId(1), QubitId(2)];
        let clbits = [ClbitId(0), ClbitId(1), ClbitId(2)];
        assert!(circuit.measure_all_into(&qubits, &clbits).is_err());
        assert_eq!(circuit.num_ops(), 1);

        let err = circuit.measure_all_into(&qubits, &clbits[..2]).unwrap_err();
        assert!(matches!(
            err,
            IrError::MeasureLengthMismatch {
                qubits: 3,
                clbits: 2
            }
        ));
    }

    #[test]
    fn test_touches() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        assert!(circuit.touches(QubitId(0)));
        assert!(!circuit.touches(QubitId(1)));
        assert!(circuit.touches(QubitId(2)));
    }

    #[test]
    fn test_json_round_trip_preserves_measurement_state() {
        let circuit = bell();
        let json = circuit.to_json().unwrap();
        let mut back = Circuit::from_json(&json).unwrap();

        assert_eq!(back.name(), "bell");
        assert_eq!(back.instructions(), circuit.instructions());
        assert!(back.is_measured(ClbitId(1)));
        assert!(back.measure(QubitId(0), ClbitId(1)).is_err());
    }

    #[test]
    fn test_json_with_invalid_instruction_rejected() {
        let json = r#"{
            "name": "bad",
            "qubits": [{"id": 0}],
            "clbits": [],
            "instructions": [{"kind": {"gate": "CX"}, "qubits": [0, 1]}]
        }"#;
        assert!(Circuit::from_json(json).is_err());
    }
}
