//! Gate kinds.
//!
//! Circuits built by nonet are restricted to a fixed two-element gate set:
//! the Hadamard and the controlled-NOT. Every encoding, extraction and
//! correction stage is expressed with these two gates only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of gates a circuit may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate, operands ordered `[control, target]`.
    CX,
}

impl GateKind {
    /// All gate kinds, in declaration order.
    pub const ALL: [GateKind; 2] = [GateKind::H, GateKind::CX];

    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateKind::H => 1,
            GateKind::CX => 2,
        }
    }

    /// Look a gate up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_properties() {
        assert_eq!(GateKind::H.num_qubits(), 1);
        assert_eq!(GateKind::CX.num_qubits(), 2);
        assert_eq!(GateKind::H.name(), "h");
        assert_eq!(GateKind::CX.to_string(), "cx");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(GateKind::from_name("cx"), Some(GateKind::CX));
        assert_eq!(GateKind::from_name("h"), Some(GateKind::H));
        assert_eq!(GateKind::from_name("ccx"), None);
    }
}
