//! Syndrome-driven correction and final readout.
//!
//! [`CoherentCorrector`] never measures the ancillas. Each correction is a
//! controlled gate with the ancilla as control, so the whole circuit stays
//! unitary until the data register is read out by [`measure_data`].

use nonet_ir::{Circuit, ClbitId, QubitId};
use tracing::debug;

use crate::error::QecResult;
use crate::register::{self, CLASSICAL_BITS, RegisterRole, column, triplet};

/// Applies corrections derived from the syndrome ancillas.
pub trait Corrector: Send + Sync {
    /// Stage name used in logs.
    fn name(&self) -> &str;

    /// Append the correction gates.
    fn apply(&self, circuit: &mut Circuit, data: &[QubitId], ancillas: &[QubitId]) -> QecResult<()>;
}

/// Controlled corrections mirroring [`ShorSyndromeExtractor`](crate::ShorSyndromeExtractor).
#[derive(Debug, Clone, Copy, Default)]
pub struct CoherentCorrector;

impl Corrector for CoherentCorrector {
    fn name(&self) -> &str {
        "coherent"
    }

    fn apply(&self, circuit: &mut Circuit, data: &[QubitId], ancillas: &[QubitId]) -> QecResult<()> {
        register::check_data_and_ancillas(circuit, data, ancillas)?;

        for i in 0..3 {
            for p in triplet(i) {
                circuit.cx(ancillas[i], data[p])?;
            }
        }

        for i in 0..3 {
            let qubits = column(i).map(|p| data[p]);
            for q in qubits {
                circuit.h(q)?;
            }
            for q in qubits {
                circuit.cx(ancillas[i + 3], q)?;
            }
            for q in qubits {
                circuit.h(q)?;
            }
        }

        debug!("appended coherent corrections");
        Ok(())
    }
}

/// Append coherent corrections to `circuit`.
pub fn apply_corrections(circuit: &mut Circuit, data: &[QubitId], ancillas: &[QubitId]) -> QecResult<()> {
    CoherentCorrector.apply(circuit, data, ancillas)
}

/// Measure `data[i]` into `clbits[i]`.
pub fn measure_data(circuit: &mut Circuit, data: &[QubitId], clbits: &[ClbitId]) -> QecResult<()> {
    register::check_data(circuit, data)?;
    register::check_len(RegisterRole::Classical, CLASSICAL_BITS, clbits.len())?;
    circuit.measure_all_into(data, clbits)?;
    Ok(())
}
