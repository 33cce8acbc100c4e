//! Bits from measuring a qubit in balanced superposition on the local simulator.

use async_trait::async_trait;
use qrng_sim::{Circuit, SimulatorBackend};
use tracing::{debug, instrument};

use super::BitGenerator;
use crate::bits::BitString;
use crate::error::{GeneratorError, GeneratorResult};

pub const NAME: &str = "Local Statevector Sim";

/// One shot per bit of a single-qubit H + measure circuit.
#[derive(Debug, Clone, Default)]
pub struct SimulatorSource {
    backend: SimulatorBackend,
}

impl SimulatorSource {
    pub fn new(backend: SimulatorBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl BitGenerator for SimulatorSource {
    fn name(&self) -> &str {
        NAME
    }

    #[instrument(skip(self), fields(source = NAME))]
    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString> {
        let shots = u32::try_from(num_bits).map_err(|_| GeneratorError::TooManyBits {
            requested: num_bits,
            limit: u32::MAX as usize,
        })?;

        let circuit = Circuit::coin_flip()?;
        let result = self.backend.run(&circuit, shots)?;
        debug!(
            ones = result.count("1"),
            zeros = result.count("0"),
            "simulation finished"
        );

        BitString::from_memory(&result.memory).ok_or(GeneratorError::InvalidOutput)
    }
}
