//! Backend capability introspection.

use nonet_ir::GateKind;
use serde::{Deserialize, Serialize};

/// What a backend can execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Gates the backend executes natively.
    pub gate_set: Vec<GateKind>,
    /// Maximum number of shots per submission.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateKind::ALL.to_vec(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    /// Set the maximum shot count.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Check if a gate is supported.
    pub fn supports(&self, gate: GateKind) -> bool {
        self.gate_set.contains(&gate)
    }
}
