//! Nonet Local Statevector Simulator
//!
//! A local [`Backend`](nonet_hal::Backend) for development and for checking
//! the error-correction pipeline end to end. It keeps an exact statevector,
//! so it is limited to roughly 20 qubits; the nine-qubit code with its six
//! ancillas needs 15.
//!
//! # Features
//!
//! - **Exact evolution**: the circuit is applied once to a full statevector
//! - **Sampling**: shots are drawn from the exact classical-bit distribution
//! - **Reproducible**: optional RNG seed
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```rust
//! use nonet_adapter_sim::SimulatorBackend;
//! use nonet_hal::Backend;
//! use nonet_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//! circuit
//!     .measure_all_into(&[QubitId(0), QubitId(1)], &[ClbitId(0), ClbitId(1)])
//!     .unwrap();
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//! let result = backend.submit(&circuit, 1000).unwrap();
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! ```

mod simulator;
mod statevector;

pub use simulator::{MAX_SIMULATOR_QUBITS, SimulatorBackend};
