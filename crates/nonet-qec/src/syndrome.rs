//! Syndrome extraction into fresh ancillas.

use nonet_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::{QecError, QecResult};
use crate::register::{self, column, triplet};

/// Collects error syndromes from the data register into ancillas.
pub trait SyndromeExtractor: Send + Sync {
    /// Stage name used in logs.
    fn name(&self) -> &str;

    /// Append the extraction gates. `ancillas` must be untouched so far.
    fn apply(&self, circuit: &mut Circuit, data: &[QubitId], ancillas: &[QubitId]) -> QecResult<()>;
}

/// Three bit-flip parities (one per triplet) and three phase-flip parities
/// (one per column).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShorSyndromeExtractor;

impl SyndromeExtractor for ShorSyndromeExtractor {
    fn name(&self) -> &str {
        "shor"
    }

    fn apply(&self, circuit: &mut Circuit, data: &[QubitId], ancillas: &[QubitId]) -> QecResult<()> {
        register::check_data_and_ancillas(circuit, data, ancillas)?;
        if let Some(&qubit) = ancillas.iter().find(|&&a| circuit.touches(a)) {
            return Err(QecError::AncillaInUse { qubit });
        }

        for i in 0..3 {
            for p in triplet(i) {
                circuit.cx(data[p], ancillas[i])?;
            }
        }

        for i in 0..3 {
            let qubits = column(i).map(|p| data[p]);
            for q in qubits {
                circuit.h(q)?;
            }
            for q in qubits {
                circuit.cx(q, ancillas[i + 3])?;
            }
            for q in qubits {
                circuit.h(q)?;
            }
        }

        debug!("extracted {} syndromes", ancillas.len());
        Ok(())
    }
}

/// Append Shor syndrome extraction to `circuit`.
pub fn extract_syndromes(circuit: &mut Circuit, data: &[QubitId], ancillas: &[QubitId]) -> QecResult<()> {
    ShorSyndromeExtractor.apply(circuit, data, ancillas)
}
