//! Random bit sources.
//!
//! | Name                    | Source                                   |
//! |-------------------------|------------------------------------------|
//! | `Local Statevector Sim` | H + measure on the local simulator       |
//! | `Classical OS`          | Operating-system CSPRNG (`OsRng`)        |
//! | `Remote ANU API`        | ANU quantum vacuum RNG over HTTPS        |

use async_trait::async_trait;

use crate::bits::BitString;
use crate::config::BenchConfig;
use crate::error::{BenchResult, GeneratorResult};

pub mod anu;
pub mod classical;
pub mod simulator;

pub use anu::AnuSource;
pub use classical::ClassicalSource;
pub use simulator::SimulatorSource;

/// Something that produces random bits on request.
#[async_trait]
pub trait BitGenerator: Send + Sync {
    /// Display name, unique within a runner.
    fn name(&self) -> &str;

    /// Produce exactly `num_bits` random bits.
    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString>;
}

/// Build the three stock generators in report order.
pub fn default_generators(config: &BenchConfig) -> BenchResult<Vec<Box<dyn BitGenerator>>> {
    let mut simulator = qrng_sim::SimulatorBackend::with_max_qubits(config.simulator.max_qubits);
    if let Some(seed) = config.simulator.seed {
        simulator = simulator.with_seed(seed);
    }

    let mut generators: Vec<Box<dyn BitGenerator>> = Vec::with_capacity(3);
    generators.push(Box::new(SimulatorSource::new(simulator)));
    generators.push(Box::new(ClassicalSource::new()));
    generators.push(Box::new(AnuSource::with_endpoint(
        config.anu.url.clone(),
        config.anu.timeout(),
    )?));
    Ok(generators)
}
