//! Error types for the QEC crate.

use nonet_hal::HalError;
use nonet_ir::{IrError, QubitId};
use thiserror::Error;

use crate::register::RegisterRole;

/// Errors produced while building or decoding an error-correction run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QecError {
    /// A register argument does not have the size the code requires.
    #[error("{role} register must have exactly {expected} entries, got {got}")]
    InvalidRegisterSize {
        /// Which register was wrong.
        role: RegisterRole,
        /// Size the code requires.
        expected: usize,
        /// Size that was supplied.
        got: usize,
    },

    /// A qubit appears twice across the data and ancilla registers.
    #[error("Qubit {qubit} appears more than once in the code register")]
    OverlappingRegisters {
        /// The repeated qubit.
        qubit: QubitId,
    },

    /// An ancilla was already used by an earlier stage.
    #[error("Ancilla {qubit} was already used before syndrome extraction")]
    AncillaInUse {
        /// The ancilla that is not fresh.
        qubit: QubitId,
    },

    /// A payload appended an instruction outside the data register.
    #[error("Payload '{payload}' violated its contract: {reason}")]
    PayloadContractViolation {
        /// Name of the offending payload.
        payload: String,
        /// What it did wrong.
        reason: String,
    },

    /// Decode was called on a frequency table whose counts sum to zero.
    #[error("Outcome table is empty; cannot compute logical probabilities")]
    EmptyOutcomeTable,

    /// The counts of a frequency table do not fit in a `u64` when summed.
    #[error("Outcome counts overflow a 64-bit total")]
    CountOverflow,

    /// A frequency-table key contains a character other than `0` or `1`.
    #[error("Bitstring '{0}' contains characters other than '0' and '1'")]
    InvalidBitstring(String),

    /// Circuit construction error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Backend error, passed through unchanged.
    #[error(transparent)]
    Backend(#[from] HalError),
}

/// Result type for QEC operations.
pub type QecResult<T> = Result<T, QecError>;
