//! Benchmark of three random bit generators.
//!
//! - **Local Statevector Sim**: a Hadamard-then-measure circuit run on the
//!   local `qrng-sim` simulator, one shot per bit
//! - **Classical OS**: the operating system's cryptographic RNG
//! - **Remote ANU API**: the ANU quantum random number service over HTTPS
//!
//! Each generator is timed around a single `generate_bits` call. Successful
//! timings are collected into [`BenchmarkResults`] and can be charted with
//! [`plot::plot_results`]; failures are reported and left out.
//!
//! # Example
//!
//! ```ignore
//! use qrng_bench::{BenchConfig, plot, run_benchmark};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let report = run_benchmark(&BenchConfig::default()).await?;
//!     plot::plot_results(&report.results())?;
//!     Ok(())
//! }
//! ```

pub mod bits;
pub mod config;
mod error;
pub mod plot;
pub mod runner;
pub mod source;

pub use bits::{BitString, bytes_for_bits};
pub use config::{AnuConfig, BenchConfig, PlotConfig, SimulatorConfig};
pub use error::{BenchError, BenchResult, GeneratorError, GeneratorResult};
pub use runner::{
    BenchmarkReport, BenchmarkResults, BenchmarkRunner, Measurement, Outcome, run_benchmark,
    throughput,
};
pub use source::{AnuSource, BitGenerator, ClassicalSource, SimulatorSource};
