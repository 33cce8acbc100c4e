//! Error types for the simulator crate.

use thiserror::Error;

/// Errors produced while building or simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit has no qubits to simulate.
    #[error("Circuit has no qubits")]
    EmptyCircuit,

    /// Circuit exceeds the simulator's qubit limit.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max_qubits}")]
    CircuitTooLarge {
        /// Qubits in the submitted circuit.
        num_qubits: usize,
        /// Simulator limit.
        max_qubits: usize,
    },

    /// A qubit index is out of range.
    #[error("Qubit {qubit} not found in circuit with {num_qubits} qubits")]
    QubitNotFound {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the circuit.
        num_qubits: usize,
    },

    /// A classical bit index is out of range.
    #[error("Classical bit {clbit} not found in circuit with {num_clbits} clbits")]
    ClbitNotFound {
        /// The offending clbit index.
        clbit: u32,
        /// Number of classical bits in the circuit.
        num_clbits: usize,
    },

    /// Only terminal measurements are supported.
    #[error("Gate applied to qubit {0} after it was measured")]
    MidCircuitMeasurement(u32),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
