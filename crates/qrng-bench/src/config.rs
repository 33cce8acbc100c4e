//! Benchmark configuration.
//!
//! Loaded from an optional YAML file; every field has a default, so an empty
//! file (or no file) reproduces the stock run: 2000 bits, the public ANU
//! endpoint with a 10 second timeout, and the plot shown at the end.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};
use crate::source::anu::ANU_URL;

/// Complete benchmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Bits requested from every generator.
    #[serde(default = "default_target_bits")]
    pub target_bits: usize,

    /// Remote ANU API settings.
    #[serde(default)]
    pub anu: AnuConfig,

    /// Local simulator settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Chart settings.
    #[serde(default)]
    pub plot: PlotConfig,
}

/// Remote ANU API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnuConfig {
    #[serde(default = "default_anu_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Local simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Fixed sampling seed; unseeded runs draw from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_target_bits() -> usize {
    2000
}

fn default_anu_url() -> String {
    ANU_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_max_qubits() -> usize {
    qrng_sim::DEFAULT_MAX_QUBITS
}

fn default_true() -> bool {
    true
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            target_bits: default_target_bits(),
            anu: AnuConfig::default(),
            simulator: SimulatorConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl Default for AnuConfig {
    fn default() -> Self {
        Self {
            url: default_anu_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            seed: None,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl AnuConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl BenchConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> BenchResult<Self> {
        let config: Self = serde_yaml_ng::from_str(contents)
            .map_err(|e| BenchError::Config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BenchError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> BenchResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.target_bits == 0 {
            return Err(BenchError::Config("target_bits must be at least 1".into()));
        }
        if self.anu.timeout_seconds == 0 {
            return Err(BenchError::Config(
                "anu.timeout_seconds must be at least 1".into(),
            ));
        }
        reqwest::Url::parse(&self.anu.url)
            .map_err(|e| BenchError::Config(format!("anu.url '{}': {e}", self.anu.url)))?;
        if self.simulator.max_qubits == 0 {
            return Err(BenchError::Config(
                "simulator.max_qubits must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
