//! Backend trait and configuration.
//!
//! The [`Backend`] trait is the capability interface through which the
//! error-correction pipeline reaches a circuit executor:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit()
//!    (&ref, cached)     (checked)     (blocking, all-or-nothing)
//! ```
//!
//! A submission either returns the complete, aggregated frequency table for
//! the requested number of shots or an error. There are no partial results
//! and no job handles; repeated shots are entirely the backend's concern.
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `capabilities()` | yes | `&Capabilities` |
//! | `availability()` | provided | `HalResult<BackendAvailability>` |
//! | `validate()` | provided | `HalResult<ValidationResult>` |
//! | `submit()` | yes | `HalResult<ExecutionResult>` |

use serde::{Deserialize, Serialize};

use nonet_ir::{Circuit, InstructionKind};

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Backend-specific options.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add a backend-specific option.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Trait for circuit executors.
///
/// # Contract
///
/// - `capabilities()` is infallible; implementations cache it at construction.
/// - `submit()` blocks until the whole run is done. On success the returned
///   counts sum to `shots`. Errors are reported as-is; callers neither
///   retry nor reinterpret them.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check whether the backend currently accepts work.
    fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    /// Validate a circuit against this backend's capabilities.
    fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(validate_against(self.capabilities(), circuit))
    }

    /// Execute `circuit` for `shots` repetitions and return the aggregated counts.
    fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

/// Check qubit count and gate support of `circuit` against `caps`.
pub fn validate_against(caps: &Capabilities, circuit: &Circuit) -> ValidationResult {
    let mut reasons = Vec::new();

    if circuit.num_qubits() > caps.num_qubits as usize {
        reasons.push(format!(
            "circuit has {} qubits but {} supports {}",
            circuit.num_qubits(),
            caps.name,
            caps.num_qubits
        ));
    }

    for inst in circuit.instructions() {
        if let InstructionKind::Gate(gate) = inst.kind {
            if !caps.supports(gate) {
                let reason = format!("gate '{gate}' is not supported");
                if !reasons.contains(&reason) {
                    reasons.push(reason);
                }
            }
        }
    }

    if reasons.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid { reasons }
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting work.
    pub is_available: bool,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability for a backend that is always ready (local simulators).
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            status_message: None,
        }
    }

    /// Availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be submitted as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
