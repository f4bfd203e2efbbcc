//! Nonet Circuit Representation
//!
//! This crate provides the data structures the rest of nonet builds on: qubit
//! and classical-bit handles, the fixed gate set, instructions and the
//! ordered [`Circuit`] builder.
//!
//! # Overview
//!
//! A circuit is a flat, ordered list of instructions. There is no per-qubit
//! state here; a qubit is a position in the circuit description and its
//! quantum state only exists inside whichever backend executes the circuit.
//! Circuits serialize to plain JSON so they can be handed to renderers and
//! other tools unchanged.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use nonet_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit
//!     .measure_all_into(&[QubitId(0), QubitId(1)], &[ClbitId(0), ClbitId(1)])
//!     .unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `CX` | 2 | Controlled-NOT (CNOT) |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::GateKind;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
