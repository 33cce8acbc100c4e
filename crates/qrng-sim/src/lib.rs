//! Local statevector simulator for small circuits.
//!
//! Built for random-bit generation: a circuit is evolved once and then
//! sampled per shot, and every shot's classical register is kept in order
//! (the "memory"), not just aggregated into counts.
//!
//! # Example
//!
//! ```
//! use qrng_sim::{Circuit, SimulatorBackend};
//!
//! let backend = SimulatorBackend::new();
//! let circuit = Circuit::coin_flip().unwrap();
//! let result = backend.run(&circuit, 16).unwrap();
//!
//! assert_eq!(result.memory.len(), 16);
//! assert!(result.memory.iter().all(|m| m == "0" || m == "1"));
//! ```

pub mod circuit;
mod error;
mod simulator;
mod statevector;

pub use circuit::{Circuit, ClbitId, Gate, Instruction, QubitId};
pub use error::{SimError, SimResult};
pub use simulator::{DEFAULT_MAX_QUBITS, ExecutionResult, SimulatorBackend};
pub use statevector::Statevector;
