//! The fixed 9/6/9 register layout of the nine-qubit code.
//!
//! Data qubits are grouped into three triplets `(0,1,2)`, `(3,4,5)`,
//! `(6,7,8)`. A *column* is the set of corresponding positions across the
//! triplets, `(i, i+3, i+6)`. Ancillas `0..3` collect one bit-flip parity per
//! triplet, ancillas `3..6` one phase-flip parity per column.

use std::fmt;

use serde::{Deserialize, Serialize};

use nonet_ir::{Circuit, ClbitId, IrError, QubitId};

use crate::error::{QecError, QecResult};

/// Number of physical data qubits.
pub const DATA_QUBITS: usize = 9;
/// Number of syndrome ancillas.
pub const ANCILLA_QUBITS: usize = 6;
/// Number of classical output bits.
pub const CLASSICAL_BITS: usize = 9;

/// Which of the three registers an argument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterRole {
    /// The nine data qubits.
    Data,
    /// The six syndrome ancillas.
    Ancilla,
    /// The nine classical output bits.
    Classical,
}

impl fmt::Display for RegisterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegisterRole::Data => "Data",
            RegisterRole::Ancilla => "Ancilla",
            RegisterRole::Classical => "Classical",
        })
    }
}

/// Data positions of triplet `i` (`0..3`).
pub(crate) fn triplet(i: usize) -> [usize; 3] {
    [3 * i, 3 * i + 1, 3 * i + 2]
}

/// Data positions of column `i` (`0..3`).
pub(crate) fn column(i: usize) -> [usize; 3] {
    [i, i + 3, i + 6]
}

pub(crate) fn check_len(role: RegisterRole, expected: usize, got: usize) -> QecResult<()> {
    if got == expected {
        Ok(())
    } else {
        Err(QecError::InvalidRegisterSize {
            role,
            expected,
            got,
        })
    }
}

/// Fail unless `qubits` are pairwise distinct.
pub(crate) fn check_distinct(qubits: &[QubitId]) -> QecResult<()> {
    for (i, q) in qubits.iter().enumerate() {
        if qubits[..i].contains(q) {
            return Err(QecError::OverlappingRegisters { qubit: *q });
        }
    }
    Ok(())
}

/// Fail unless every qubit exists in `circuit`, so a stage never half-applies.
pub(crate) fn check_in_circuit(circuit: &Circuit, qubits: &[QubitId]) -> QecResult<()> {
    match qubits
        .iter()
        .find(|q| q.0 as usize >= circuit.num_qubits())
    {
        Some(&qubit) => Err(IrError::QubitNotFound {
            qubit,
            gate_name: None,
        }
        .into()),
        None => Ok(()),
    }
}

pub(crate) fn check_data(circuit: &Circuit, data: &[QubitId]) -> QecResult<()> {
    check_len(RegisterRole::Data, DATA_QUBITS, data.len())?;
    check_distinct(data)?;
    check_in_circuit(circuit, data)
}

pub(crate) fn check_data_and_ancillas(
    circuit: &Circuit,
    data: &[QubitId],
    ancillas: &[QubitId],
) -> QecResult<()> {
    check_len(RegisterRole::Data, DATA_QUBITS, data.len())?;
    check_len(RegisterRole::Ancilla, ANCILLA_QUBITS, ancillas.len())?;
    let all: Vec<QubitId> = data.iter().chain(ancillas).copied().collect();
    check_distinct(&all)?;
    check_in_circuit(circuit, &all)
}

/// The three disjoint index ranges one code block occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRegister {
    /// Nine data qubits in triplet order.
    pub data: Vec<QubitId>,
    /// Six ancillas: three bit-flip, then three phase-flip.
    pub ancillas: Vec<QubitId>,
    /// Nine classical bits receiving the data-qubit measurements.
    pub clbits: Vec<ClbitId>,
}

impl CodeRegister {
    /// Validate a register layout.
    pub fn new(data: Vec<QubitId>, ancillas: Vec<QubitId>, clbits: Vec<ClbitId>) -> QecResult<Self> {
        check_len(RegisterRole::Data, DATA_QUBITS, data.len())?;
        check_len(RegisterRole::Ancilla, ANCILLA_QUBITS, ancillas.len())?;
        check_len(RegisterRole::Classical, CLASSICAL_BITS, clbits.len())?;

        let qubits: Vec<QubitId> = data.iter().chain(&ancillas).copied().collect();
        check_distinct(&qubits)?;
        for (i, c) in clbits.iter().enumerate() {
            if clbits[..i].contains(c) {
                return Err(IrError::ClbitAlreadyMeasured { clbit: *c }.into());
            }
        }

        Ok(Self {
            data,
            ancillas,
            clbits,
        })
    }

    /// Append the registers `q[9]`, `ancilla[6]` and `c[9]` to `circuit`.
    pub fn allocate(circuit: &mut Circuit) -> Self {
        Self {
            data: circuit.add_qreg("q", DATA_QUBITS as u32),
            ancillas: circuit.add_qreg("ancilla", ANCILLA_QUBITS as u32),
            clbits: circuit.add_creg("c", CLASSICAL_BITS as u32),
        }
    }

    /// Data qubits of triplet `i`.
    pub fn triplet(&self, i: usize) -> [QubitId; 3] {
        triplet(i).map(|p| self.data[p])
    }

    /// Data qubits of column `i`.
    pub fn column(&self, i: usize) -> [QubitId; 3] {
        column(i).map(|p| self.data[p])
    }
}
