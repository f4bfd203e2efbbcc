//! Nine-qubit Shor code pipeline
//!
//! This crate builds the circuit that protects one logical qubit with the
//! nine-qubit Shor code and decodes the measurement statistics it produces.
//! It knows nothing about how circuits are executed; any
//! [`Backend`](nonet_hal::Backend) will do.
//!
//! # Stages
//!
//! | Stage | Trait | Reference implementation |
//! |-------|-------|--------------------------|
//! | Encode | [`Encoder`] | [`ShorEncoder`] |
//! | Payload | [`Payload`] | [`HadamardPayload`] |
//! | Syndrome extraction | [`SyndromeExtractor`] | [`ShorSyndromeExtractor`] |
//! | Correction | [`Corrector`] | [`CoherentCorrector`] |
//!
//! The data register is then measured into nine classical bits and the
//! resulting frequency table is decoded by majority vote.
//!
//! # Example
//!
//! ```
//! use nonet_adapter_sim::SimulatorBackend;
//! use nonet_qec::QecPipeline;
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//! let outcome = QecPipeline::shor().run(&backend, 1024).unwrap();
//!
//! assert_eq!(outcome.counts.total_shots(), 1024);
//! assert!((outcome.distribution.sum() - 1.0).abs() < 1e-9);
//! ```
//!
//! The stages can also be driven one by one:
//!
//! ```
//! use nonet_hal::Counts;
//! use nonet_ir::Circuit;
//! use nonet_qec::{CodeRegister, decode, encode, measure_data};
//!
//! let mut circuit = Circuit::new("encode_only");
//! let reg = CodeRegister::allocate(&mut circuit);
//! encode(&mut circuit, &reg.data).unwrap();
//! measure_data(&mut circuit, &reg.data, &reg.clbits).unwrap();
//!
//! let counts = Counts::from_pairs([("000000000", 3), ("111111111", 1)]);
//! assert_eq!(decode(&counts).unwrap().p_zero, 0.75);
//! ```

pub mod correction;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod payload;
pub mod pipeline;
pub mod register;
pub mod syndrome;

pub use correction::{CoherentCorrector, Corrector, apply_corrections, measure_data};
pub use decoder::{LogicalDistribution, LogicalValue, decode, majority_vote};
pub use encoder::{Encoder, ShorEncoder, encode};
pub use error::{QecError, QecResult};
pub use payload::{
    HadamardPayload, IdentityPayload, PAYLOAD_NAMES, Payload, apply_checked, apply_payload,
    payload_by_name,
};
pub use pipeline::{CIRCUIT_NAME, PipelineOutcome, QecPipeline};
pub use register::{ANCILLA_QUBITS, CLASSICAL_BITS, CodeRegister, DATA_QUBITS, RegisterRole};
pub use syndrome::{ShorSyndromeExtractor, SyndromeExtractor, extract_syndromes};
