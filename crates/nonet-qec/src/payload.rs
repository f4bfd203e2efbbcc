//! The protected computation.
//!
//! A payload runs between encoding and syndrome extraction. It may append any
//! gates it likes as long as they act only on the nine data qubits; touching
//! an ancilla or writing a classical bit is a contract violation. The
//! contract is enforced by [`apply_checked`], which runs the payload on a
//! scratch copy and only commits it when every new instruction complies.

use nonet_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::{QecError, QecResult};
use crate::register;

/// A computation applied to the encoded data register.
pub trait Payload: Send + Sync {
    /// Stage name used in logs and contract errors.
    fn name(&self) -> &str;

    /// Append the payload gates. May only act on `data`.
    fn apply(&self, circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()>;
}

/// Placeholder payload: a Hadamard on every data qubit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HadamardPayload;

impl Payload for HadamardPayload {
    fn name(&self) -> &str {
        "hadamard"
    }

    fn apply(&self, circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()> {
        for &q in data {
            circuit.h(q)?;
        }
        Ok(())
    }
}

/// A payload that appends nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPayload;

impl Payload for IdentityPayload {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, _circuit: &mut Circuit, _data: &[QubitId]) -> QecResult<()> {
        Ok(())
    }
}

/// Look up a built-in payload by name.
pub fn payload_by_name(name: &str) -> Option<Box<dyn Payload>> {
    match name.to_ascii_lowercase().as_str() {
        "hadamard" => Some(Box::new(HadamardPayload)),
        "identity" => Some(Box::new(IdentityPayload)),
        _ => None,
    }
}

/// Names accepted by [`payload_by_name`].
pub const PAYLOAD_NAMES: &[&str] = &["hadamard", "identity"];

/// Run `payload` and commit its instructions only if they respect the contract.
pub fn apply_checked(payload: &dyn Payload, circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()> {
    register::check_data(circuit, data)?;

    let start = circuit.num_ops();
    let mut scratch = circuit.clone();
    payload.apply(&mut scratch, data)?;

    let violation = |reason: String| QecError::PayloadContractViolation {
        payload: payload.name().to_string(),
        reason,
    };

    if scratch.num_ops() < start || scratch.instructions()[..start] != circuit.instructions()[..] {
        return Err(violation("rewrote instructions from earlier stages".into()));
    }
    if scratch.num_qubits() != circuit.num_qubits() || scratch.num_clbits() != circuit.num_clbits() {
        return Err(violation("changed the circuit's registers".into()));
    }
    for inst in &scratch.instructions()[start..] {
        if let Some(clbit) = inst.clbits.first() {
            return Err(violation(format!("'{}' writes classical bit {clbit}", inst.name())));
        }
        if let Some(q) = inst.qubits.iter().find(|q| !data.contains(q)) {
            return Err(violation(format!("'{}' acts on non-data qubit {q}", inst.name())));
        }
    }

    debug!(
        "payload '{}' appended {} instructions",
        payload.name(),
        scratch.num_ops() - start
    );
    *circuit = scratch;
    Ok(())
}

/// Apply the placeholder payload (Hadamard on every data qubit).
pub fn apply_payload(circuit: &mut Circuit, data: &[QubitId]) -> QecResult<()> {
    apply_checked(&HadamardPayload, circuit, data)
}
