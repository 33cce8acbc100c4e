//! Simulator backend implementation.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::circuit::Circuit;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Default qubit limit; a 20-qubit statevector is 16 MiB.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Outcome of running a circuit for a number of shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Classical register value per shot, in execution order.
    ///
    /// Clbit 0 is the leftmost character, the reverse of Qiskit's `get_memory()`.
    pub memory: Vec<String>,
    /// Histogram of register values.
    pub counts: BTreeMap<String, u64>,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock simulation time.
    pub execution_time: Duration,
}

impl ExecutionResult {
    /// Number of shots that produced `bitstring`.
    pub fn count(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }
}

/// Local statevector simulator.
///
/// Gates are applied once; every shot then samples the final state. Each
/// shot's classical register is recorded in `memory`, so shot order is kept.
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    max_qubits: usize,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a simulator with default settings and entropy-seeded sampling.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self {
            max_qubits,
            seed: None,
        }
    }

    /// Fix the sampling seed so repeated runs produce the same memory.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Run `circuit` for `shots` shots.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<ExecutionResult> {
        let num_qubits = circuit.num_qubits();
        if num_qubits == 0 {
            return Err(SimError::EmptyCircuit);
        }
        if num_qubits > self.max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits,
                max_qubits: self.max_qubits,
            });
        }

        let start = Instant::now();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        let mut sv = Statevector::new(num_qubits);
        for (gate, qubit) in circuit.gates() {
            sv.apply(gate, qubit.0 as usize);
        }

        let measurements: Vec<_> = circuit.measurements().collect();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut memory = Vec::with_capacity(shots as usize);
        let mut counts = BTreeMap::new();
        let mut register = vec![b'0'; circuit.num_clbits()];

        for shot in 0..shots {
            let outcome = sv.sample(&mut rng);
            register.fill(b'0');
            for (qubit, clbit) in &measurements {
                if outcome & (1 << qubit.0) != 0 {
                    register[clbit.0 as usize] = b'1';
                }
            }
            let value = String::from_utf8_lossy(&register).into_owned();
            *counts.entry(value.clone()).or_insert(0) += 1;
            memory.push(value);

            if shot > 0 && shot % 10_000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let execution_time = start.elapsed();
        debug!("Simulation completed in {:?}", execution_time);

        Ok(ExecutionResult {
            memory,
            counts,
            shots,
            execution_time,
        })
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}
