//! Composes the four stages into one circuit and runs it.

use std::fmt;

use nonet_hal::{Backend, Counts, HalError};
use nonet_ir::Circuit;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::correction::{CoherentCorrector, Corrector, measure_data};
use crate::decoder::{LogicalDistribution, decode};
use crate::encoder::{Encoder, ShorEncoder};
use crate::error::QecResult;
use crate::payload::{HadamardPayload, Payload, apply_checked};
use crate::register::CodeRegister;
use crate::syndrome::{ShorSyndromeExtractor, SyndromeExtractor};

/// Name given to circuits built by [`QecPipeline`].
pub const CIRCUIT_NAME: &str = "shor_code";

/// An encode, payload, syndrome, correct, measure pipeline.
///
/// Every stage is a strategy object and can be replaced independently.
///
/// # Example
///
/// ```
/// use nonet_qec::{IdentityPayload, QecPipeline};
///
/// let (circuit, register) = QecPipeline::shor()
///     .with_payload(IdentityPayload)
///     .build()
///     .unwrap();
/// assert_eq!(circuit.num_qubits(), 15);
/// assert_eq!(register.clbits.len(), 9);
/// ```
pub struct QecPipeline {
    encoder: Box<dyn Encoder>,
    payload: Box<dyn Payload>,
    extractor: Box<dyn SyndromeExtractor>,
    corrector: Box<dyn Corrector>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    /// Raw frequency table over the nine data clbits.
    pub counts: Counts,
    /// Decoded logical probabilities.
    pub distribution: LogicalDistribution,
    /// Backend execution time in milliseconds.
    pub execution_time_ms: Option<u64>,
}

impl QecPipeline {
    /// The reference configuration: Shor encoder, Hadamard payload, Shor
    /// syndrome extraction and coherent correction.
    pub fn shor() -> Self {
        Self {
            encoder: Box::new(ShorEncoder),
            payload: Box::new(HadamardPayload),
            extractor: Box::new(ShorSyndromeExtractor),
            corrector: Box::new(CoherentCorrector),
        }
    }

    /// Replace the encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Replace the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Payload + 'static) -> Self {
        self.payload = Box::new(payload);
        self
    }

    /// Replace the payload with an already boxed one.
    #[must_use]
    pub fn with_boxed_payload(mut self, payload: Box<dyn Payload>) -> Self {
        self.payload = payload;
        self
    }

    /// Replace the syndrome extractor.
    #[must_use]
    pub fn with_syndrome_extractor(mut self, extractor: impl SyndromeExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replace the corrector.
    #[must_use]
    pub fn with_corrector(mut self, corrector: impl Corrector + 'static) -> Self {
        self.corrector = Box::new(corrector);
        self
    }

    /// Name of the configured payload.
    pub fn payload_name(&self) -> &str {
        self.payload.name()
    }

    /// Build the full circuit on a freshly allocated register.
    pub fn build(&self) -> QecResult<(Circuit, CodeRegister)> {
        let mut circuit = Circuit::new(CIRCUIT_NAME);
        let register = CodeRegister::allocate(&mut circuit);

        self.encoder.apply(&mut circuit, &register.data)?;
        debug!("encoder '{}': {} ops", self.encoder.name(), circuit.num_ops());

        apply_checked(self.payload.as_ref(), &mut circuit, &register.data)?;
        debug!("payload '{}': {} ops", self.payload.name(), circuit.num_ops());

        self.extractor
            .apply(&mut circuit, &register.data, &register.ancillas)?;
        debug!("extractor '{}': {} ops", self.extractor.name(), circuit.num_ops());

        self.corrector
            .apply(&mut circuit, &register.data, &register.ancillas)?;
        debug!("corrector '{}': {} ops", self.corrector.name(), circuit.num_ops());

        measure_data(&mut circuit, &register.data, &register.clbits)?;

        info!(
            "Built '{}': {} qubits, {} clbits, {} ops, depth {}",
            circuit.name(),
            circuit.num_qubits(),
            circuit.num_clbits(),
            circuit.num_ops(),
            circuit.depth()
        );
        Ok((circuit, register))
    }

    /// Build the circuit, execute it on `backend` and decode the counts.
    ///
    /// Backend errors are returned unchanged as [`QecError::Backend`](crate::QecError::Backend).
    pub fn run(&self, backend: &dyn Backend, shots: u32) -> QecResult<PipelineOutcome> {
        let (circuit, _) = self.build()?;
        self.execute(&circuit, backend, shots)
    }

    /// Execute a circuit returned by [`Self::build`] and decode the counts.
    #[instrument(skip_all, fields(circuit = circuit.name(), backend = backend.name(), shots = shots))]
    pub fn execute(
        &self,
        circuit: &Circuit,
        backend: &dyn Backend,
        shots: u32,
    ) -> QecResult<PipelineOutcome> {
        let availability = backend.availability()?;
        if !availability.is_available {
            return Err(HalError::BackendUnavailable(
                availability
                    .status_message
                    .unwrap_or_else(|| backend.name().to_string()),
            )
            .into());
        }

        let result = backend.submit(circuit, shots)?;
        info!(
            "Backend returned {} outcomes over {} shots",
            result.counts.len(),
            result.counts.total_shots()
        );

        let distribution = decode(&result.counts)?;
        info!("Decoded {}", distribution);

        Ok(PipelineOutcome {
            counts: result.counts,
            distribution,
            execution_time_ms: result.execution_time_ms,
        })
    }
}

impl Default for QecPipeline {
    fn default() -> Self {
        Self::shor()
    }
}

impl fmt::Debug for QecPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QecPipeline")
            .field("encoder", &self.encoder.name())
            .field("payload", &self.payload.name())
            .field("extractor", &self.extractor.name())
            .field("corrector", &self.corrector.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::IdentityPayload;

    #[test]
    fn test_build_reference_circuit() {
        let (circuit, reg) = QecPipeline::shor().build().unwrap();
        let ops = circuit.count_ops();

        assert_eq!(circuit.name(), CIRCUIT_NAME);
        assert_eq!(circuit.num_qubits(), 15);
        assert_eq!(circuit.num_clbits(), 9);
        // encode 3 H + 12 CX, payload 9 H, extraction and correction 18 H + 18 CX each.
        assert_eq!(ops["h"], 3 + 9 + 18 + 18);
        assert_eq!(ops["cx"], 12 + 18 + 18);
        assert_eq!(ops["measure"], 9);
        assert!(reg.clbits.iter().all(|&c| circuit.is_measured(c)));
    }

    #[test]
    fn test_identity_payload_skips_hadamards() {
        let (circuit, _) = QecPipeline::shor()
            .with_payload(IdentityPayload)
            .build()
            .unwrap();
        assert_eq!(circuit.count_ops()["h"], 3 + 18 + 18);
    }

    #[test]
    fn test_debug_lists_stage_names() {
        let debug = format!("{:?}", QecPipeline::shor());
        assert!(debug.contains("hadamard"));
        assert!(debug.contains("coherent"));
    }
}
