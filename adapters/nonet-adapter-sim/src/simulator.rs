//! Simulator backend implementation.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};

use nonet_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, ValidationResult,
};
use nonet_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Largest register the statevector engine will allocate.
pub const MAX_SIMULATOR_QUBITS: u32 = 30;

/// Local simulator backend.
///
/// The circuit is evolved once as an exact statevector; shots are then
/// sampled from the resulting distribution over classical bits. This
/// requires every measurement to be terminal: once a qubit is measured no
/// later gate may act on it.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// RNG seed; `None` draws from system entropy per submission.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits, clamped to [`MAX_SIMULATOR_QUBITS`].
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits.min(MAX_SIMULATOR_QUBITS)),
            seed: None,
        }
    }

    /// Make sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Collect `(qubit, clbit)` readout pairs, rejecting mid-circuit measurement.
    fn readout(circuit: &Circuit) -> HalResult<Vec<(usize, usize)>> {
        let mut measured = FxHashSet::default();
        let mut readout = Vec::new();

        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Measure => {
                    let qubit = inst.qubits[0];
                    measured.insert(qubit);
                    readout.push((qubit.0 as usize, inst.clbits[0].0 as usize));
                }
                InstructionKind::Gate(gate) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                        return Err(HalError::Unsupported(format!(
                            "gate '{gate}' acts on {q} after it was measured; \
                             only terminal measurements are simulated"
                        )));
                    }
                }
            }
        }

        Ok(readout)
    }

    /// Run simulation and sample `shots` outcomes.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        let readout = Self::readout(circuit)?;

        debug!(
            "Starting simulation: {} qubits, {} instructions, {} shots",
            circuit.num_qubits(),
            circuit.num_ops(),
            shots
        );

        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        let distribution = sv.clbit_distribution(&readout, circuit.num_clbits());
        debug!("{} reachable outcomes", distribution.len());

        let outcomes: Vec<(String, f64)> = distribution.into_iter().collect();
        let mut cumulative = Vec::with_capacity(outcomes.len());
        let mut acc = 0.0;
        for (_, p) in &outcomes {
            acc += p;
            cumulative.push(acc);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut tallies = vec![0u64; outcomes.len()];
        for _ in 0..shots {
            let r: f64 = rng.r#gen::<f64>() * acc;
            let idx = cumulative
                .partition_point(|&c| c <= r)
                .min(outcomes.len().saturating_sub(1));
            tallies[idx] += 1;
        }

        let counts: Counts = outcomes
            .into_iter()
            .zip(tallies)
            .filter(|(_, n)| *n > 0)
            .map(|((bitstring, _), n)| (bitstring, n))
            .collect();

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        let mut result = ExecutionResult::new(counts, shots)
            .with_execution_time(elapsed.as_millis() as u64);
        if let Some(seed) = self.seed {
            result = result.with_metadata("seed", serde_json::json!(seed));
        }
        Ok(result)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested but simulator allows at most {}",
                self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if let ValidationResult::Invalid { reasons } = self.validate(circuit)? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        self.run_simulation(circuit, shots)
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra.get("max_qubits") {
            None => DEFAULT_MAX_QUBITS,
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n <= MAX_SIMULATOR_QUBITS)
                .ok_or_else(|| {
                    HalError::Configuration(format!(
                        "max_qubits must be an integer <= {MAX_SIMULATOR_QUBITS}, got {v}"
                    ))
                })?,
        };
        let seed = match config.extra.get("seed") {
            None => None,
            Some(v) => Some(v.as_u64().ok_or_else(|| {
                HalError::Configuration(format!("seed must be a non-negative integer, got {v}"))
            })?),
        };

        let mut capabilities = Capabilities::simulator(max_qubits);
        if let Some(max_shots) = config.extra.get("max_shots").and_then(serde_json::Value::as_u64) {
            capabilities.max_shots = u32::try_from(max_shots).unwrap_or(u32::MAX);
        }

        Ok(Self {
            config,
            capabilities,
            seed,
        })
    }
}
