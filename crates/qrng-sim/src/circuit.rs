//! Circuit model: a flat list of single-qubit gates and terminal measurements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Identifier for a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

/// Identifier for a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

/// Single-qubit gates understood by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    H,
    X,
    Y,
    Z,
    S,
    T,
    Rx(f64),
    Ry(f64),
    Rz(f64),
}

impl Gate {
    /// Lowercase gate mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::T => "t",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
        }
    }
}

/// A circuit instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Apply a gate to a qubit.
    Gate { gate: Gate, qubit: QubitId },
    /// Measure a qubit into a classical bit.
    Measure { qubit: QubitId, clbit: ClbitId },
}

/// A quantum circuit with a fixed number of qubits and classical bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit with the given register sizes.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    /// One qubit in balanced superposition, measured into one clbit.
    ///
    /// Every shot of this circuit is a fair coin flip.
    pub fn coin_flip() -> SimResult<Self> {
        let mut circuit = Self::with_size("coin_flip", 1, 1);
        circuit.h(QubitId(0))?.measure(QubitId(0), ClbitId(0))?;
        Ok(circuit)
    }

    /// Apply a gate, rejecting unknown qubits and gates after measurement.
    pub fn gate(&mut self, gate: Gate, qubit: QubitId) -> SimResult<&mut Self> {
        self.check_qubit(qubit)?;
        if self.is_measured(qubit) {
            return Err(SimError::MidCircuitMeasurement(qubit.0));
        }
        self.instructions.push(Instruction::Gate { gate, qubit });
        Ok(self)
    }

    pub fn h(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::H, qubit)
    }

    pub fn x(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::X, qubit)
    }

    pub fn y(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::Y, qubit)
    }

    pub fn z(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::Z, qubit)
    }

    pub fn s(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::S, qubit)
    }

    pub fn t(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::T, qubit)
    }

    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::Rx(theta), qubit)
    }

    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::Ry(theta), qubit)
    }

    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> SimResult<&mut Self> {
        self.gate(Gate::Rz(theta), qubit)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> SimResult<&mut Self> {
        self.check_qubit(qubit)?;
        if clbit.0 >= self.num_clbits {
            return Err(SimError::ClbitNotFound {
                clbit: clbit.0,
                num_clbits: self.num_clbits as usize,
            });
        }
        self.instructions.push(Instruction::Measure { qubit, clbit });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Gate instructions in program order.
    pub fn gates(&self) -> impl Iterator<Item = (Gate, QubitId)> + '_ {
        self.instructions.iter().filter_map(|inst| match inst {
            Instruction::Gate { gate, qubit } => Some((*gate, *qubit)),
            Instruction::Measure { .. } => None,
        })
    }

    /// Measurement instructions in program order.
    pub fn measurements(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        self.instructions.iter().filter_map(|inst| match inst {
            Instruction::Measure { qubit, clbit } => Some((*qubit, *clbit)),
            Instruction::Gate { .. } => None,
        })
    }

    fn check_qubit(&self, qubit: QubitId) -> SimResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(SimError::QubitNotFound {
                qubit: qubit.0,
                num_qubits: self.num_qubits as usize,
            });
        }
        Ok(())
    }

    fn is_measured(&self, qubit: QubitId) -> bool {
        self.measurements().any(|(q, _)| q == qubit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} qubits, {} clbits, {} instructions)",
            self.name,
            self.num_qubits,
            self.num_clbits,
            self.instructions.len()
        )
    }
}
