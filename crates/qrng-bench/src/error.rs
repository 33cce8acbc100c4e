//! Error types for generators and the benchmark runner.

use std::time::Duration;

use thiserror::Error;

/// Result type for bit generation.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;

/// Why a generator could not produce its bits.
///
/// Every variant is reported by the runner as a FAILED row; none aborts a run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    /// The remote endpoint did not answer within the request timeout.
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Remote endpoint returned `"success": false`.
    #[error("API reported an unsuccessful request")]
    ApiReportedFailure,

    /// Fewer random bytes than requested.
    #[error("response too short: needed {expected} bytes, got {got}")]
    ShortResponse { expected: usize, got: usize },

    /// Output was not the requested number of '0'/'1' characters.
    #[error("generator returned {got} bits, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },

    /// Output contained characters other than '0' and '1'.
    #[error("generator returned a non-binary string")]
    InvalidOutput,

    /// Local circuit simulation failed.
    #[error("simulation failed: {0}")]
    Simulation(#[from] qrng_sim::SimError),

    /// The operating system's secure random source failed.
    #[error("OS entropy source failed: {0}")]
    Entropy(String),

    /// Requested more bits than the source can deliver in one call.
    #[error("{requested} bits requested but this source is limited to {limit}")]
    TooManyBits { requested: usize, limit: usize },
}

/// Errors that abort a benchmark run or its setup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// Target bit count must be positive.
    #[error("target bit count must be at least 1")]
    InvalidTarget,

    /// Two generators share a name.
    #[error("generator '{0}' is already registered")]
    DuplicateGenerator(String),

    /// A generator could not be constructed.
    #[error("generator setup failed: {0}")]
    Setup(#[from] GeneratorError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report could not be serialized.
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    /// Console, terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = GeneratorError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "request timed out after 10s");
    }

    #[test]
    fn test_status_display() {
        let err = GeneratorError::Status {
            status: 503,
            message: "Service unavailable".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service unavailable"));
    }

    #[test]
    fn test_short_response_display() {
        let err = GeneratorError::ShortResponse {
            expected: 251,
            got: 3,
        };
        assert!(err.to_string().contains("251"));
    }

    #[test]
    fn test_simulation_from() {
        let err: GeneratorError = qrng_sim::SimError::EmptyCircuit.into();
        assert!(matches!(err, GeneratorError::Simulation(_)));
        assert!(err.to_string().starts_with("simulation failed"));
    }

    #[test]
    fn test_setup_from_generator_error() {
        let err: BenchError = GeneratorError::InvalidOutput.into();
        assert!(matches!(err, BenchError::Setup(_)));
    }
}
