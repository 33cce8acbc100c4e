//! Sequential benchmark runner.
//!
//! Each generator is timed around exactly its own `generate_bits` call. Rows
//! are written to the supplied writer as soon as each generator finishes:
//!
//! ```text
//! --- Benchmarking Generation of 2000 bits ---
//! Method               | Time (sec) | Speed (bits/s)
//! --------------------------------------------------
//! Local Statevector Sim | 0.00042 s  | 4761905
//! Classical OS         | 0.00001 s  | 181818182
//! Remote ANU API       | FAILED     | Error: request timed out after 10s
//! ```

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult, GeneratorError};
use crate::source::{BitGenerator, default_generators};

/// Bits per second, or `None` when the duration is too small to measure.
pub fn throughput(num_bits: usize, duration: Duration) -> Option<f64> {
    let secs = duration.as_secs_f64();
    (secs > 0.0).then(|| num_bits as f64 / secs)
}

/// Successful durations keyed by generator name, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkResults {
    entries: Vec<(String, f64)>,
}

impl BenchmarkResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a duration in seconds. A repeated name replaces the old value.
    pub fn insert(&mut self, name: impl Into<String>, seconds: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = seconds,
            None => self.entries.push((name, seconds)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, secs)| *secs)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for BenchmarkResults {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut results = Self::new();
        for (name, secs) in iter {
            results.insert(name, secs);
        }
        results
    }
}

/// What happened to one generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        /// `None` when the duration rounded to zero.
        bits_per_second: Option<f64>,
    },
    Failed {
        error: String,
    },
}

/// One generator's timed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub duration_seconds: f64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Measurement {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

/// Full record of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub target_bits: usize,
    pub started_at: DateTime<Utc>,
    pub measurements: Vec<Measurement>,
}

impl BenchmarkReport {
    /// Durations of the successful generators.
    pub fn results(&self) -> BenchmarkResults {
        self.measurements
            .iter()
            .filter(|m| m.is_success())
            .map(|m| (m.name.as_str(), m.duration_seconds))
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter().filter(|m| !m.is_success())
    }

    pub fn to_json(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Runs registered generators one after another and reports their timings.
#[derive(Default)]
pub struct BenchmarkRunner {
    generators: Vec<Box<dyn BitGenerator>>,
}

impl std::fmt::Debug for BenchmarkRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkRunner")
            .field("generators", &self.names())
            .finish()
    }
}

impl BenchmarkRunner {
    /// Runner with no generators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with the stock generators, freshly built from `config`.
    pub fn from_config(config: &BenchConfig) -> BenchResult<Self> {
        let mut runner = Self::new();
        for generator in default_generators(config)? {
            runner.register(generator)?;
        }
        Ok(runner)
    }

    /// Append a generator; names must be unique.
    pub fn register(&mut self, generator: Box<dyn BitGenerator>) -> BenchResult<&mut Self> {
        if self.generators.iter().any(|g| g.name() == generator.name()) {
            return Err(BenchError::DuplicateGenerator(generator.name().to_string()));
        }
        self.generators.push(generator);
        Ok(self)
    }

    pub fn names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// Time every generator for `target_bits` bits, writing the report to `out`.
    pub async fn run<W: Write>(&self, target_bits: usize, out: &mut W) -> BenchResult<BenchmarkReport> {
        if target_bits == 0 {
            return Err(BenchError::InvalidTarget);
        }

        let started_at = Utc::now();
        write_header(out, target_bits)?;

        let mut measurements = Vec::with_capacity(self.generators.len());
        for generator in &self.generators {
            let name = generator.name();

            let start = Instant::now();
            let result = generator.generate_bits(target_bits).await;
            let duration = start.elapsed();

            let result = result.and_then(|bits| {
                if bits.len() == target_bits {
                    Ok(bits)
                } else {
                    Err(GeneratorError::LengthMismatch {
                        expected: target_bits,
                        got: bits.len(),
                    })
                }
            });

            let outcome = match result {
                Ok(_) => {
                    let speed = throughput(target_bits, duration);
                    info!(
                        generator = name,
                        seconds = duration.as_secs_f64(),
                        "generated {} bits",
                        target_bits
                    );
                    writeln!(out, "{}", success_row(name, duration, speed))?;
                    Outcome::Success {
                        bits_per_second: speed,
                    }
                }
                Err(err) => {
                    warn!(generator = name, error = %err, "generator failed");
                    writeln!(out, "{}", failure_row(name, &err))?;
                    Outcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            out.flush()?;

            measurements.push(Measurement {
                name: name.to_string(),
                duration_seconds: duration.as_secs_f64(),
                outcome,
            });
        }

        Ok(BenchmarkReport {
            target_bits,
            started_at,
            measurements,
        })
    }
}

fn write_header<W: Write>(out: &mut W, target_bits: usize) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Benchmarking Generation of {target_bits} bits ---")?;
    writeln!(out, "{:<20} | {:<10} | {:<15}", "Method", "Time (sec)", "Speed (bits/s)")?;
    writeln!(out, "{}", "-".repeat(50))?;
    out.flush()
}

fn success_row(name: &str, duration: Duration, speed: Option<f64>) -> String {
    let speed = match speed {
        Some(bps) => format!("{bps:.0}"),
        None => "n/a".to_string(),
    };
    format!("{name:<20} | {:.5} s  | {speed}", duration.as_secs_f64())
}

fn failure_row(name: &str, err: &GeneratorError) -> String {
    format!("{name:<20} | FAILED     | Error: {err}")
}

/// Build fresh stock generators, run them, and print the report to stdout.
pub async fn run_benchmark(config: &BenchConfig) -> BenchResult<BenchmarkReport> {
    config.validate()?;
    let runner = BenchmarkRunner::from_config(config)?;
    runner.run(config.target_bits, &mut std::io::stdout()).await
}
