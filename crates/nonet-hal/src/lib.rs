//! Nonet Hardware Abstraction Layer
//!
//! This crate defines how the error-correction core talks to whatever
//! actually executes circuits: a local statevector simulator, a stabilizer
//! simulator or a hardware queue.
//!
//! # Overview
//!
//! - A common [`Backend`] trait with a single blocking [`Backend::submit`]
//! - [`Capabilities`] describing qubit count, gate set and shot limits
//! - Result handling via [`ExecutionResult`] and the [`Counts`] frequency table
//!
//! # Implementing a Custom Backend
//!
//! ```ignore
//! use nonet_hal::{Backend, Capabilities, Counts, ExecutionResult, HalResult};
//! use nonet_ir::Circuit;
//!
//! struct AlwaysZero {
//!     capabilities: Capabilities,
//! }
//!
//! impl Backend for AlwaysZero {
//!     fn name(&self) -> &str { "always_zero" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         let zeros = "0".repeat(circuit.num_clbits());
//!         let counts = Counts::from_pairs([(zeros, u64::from(shots))]);
//!         Ok(ExecutionResult::new(counts, shots))
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult,
    validate_against,
};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
