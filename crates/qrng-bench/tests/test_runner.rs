//! Runner behavior with stub generators.

use std::time::Duration;

use async_trait::async_trait;
use qrng_bench::{
    BenchError, BenchmarkRunner, BitGenerator, BitString, ClassicalSource, GeneratorError,
    GeneratorResult, Outcome, SimulatorSource,
};

/// Returns all-zero bits after an optional delay.
struct Zeros {
    name: &'static str,
    delay: Duration,
}

#[async_trait]
impl BitGenerator for Zeros {
    fn name(&self) -> &str {
        self.name
    }

    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(BitString::parse("0".repeat(num_bits)).unwrap())
    }
}

/// Always fails.
struct Broken;

#[async_trait]
impl BitGenerator for Broken {
    fn name(&self) -> &str {
        "Broken"
    }

    async fn generate_bits(&self, _num_bits: usize) -> GeneratorResult<BitString> {
        Err(GeneratorError::Status {
            status: 500,
            message: "internal".into(),
        })
    }
}

/// Returns one bit too few.
struct Short;

#[async_trait]
impl BitGenerator for Short {
    fn name(&self) -> &str {
        "Short"
    }

    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString> {
        Ok(BitString::parse("1".repeat(num_bits - 1)).unwrap())
    }
}

fn zeros(name: &'static str) -> Box<dyn BitGenerator> {
    Box::new(Zeros {
        name,
        delay: Duration::ZERO,
    })
}

async fn run(runner: &BenchmarkRunner, bits: usize) -> (qrng_bench::BenchmarkReport, String) {
    let mut out = Vec::new();
    let report = runner.run(bits, &mut out).await.unwrap();
    (report, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn failed_generator_is_excluded() {
    let mut runner = BenchmarkRunner::new();
    runner.register(zeros("First")).unwrap();
    runner.register(Box::new(Broken)).unwrap();
    runner.register(zeros("Last")).unwrap();

    let (report, text) = run(&runner, 32).await;

    let results = report.results();
    assert_eq!(results.names(), vec!["First", "Last"]);
    assert!(!results.contains("Broken"));
    assert!(results.iter().all(|(_, secs)| secs >= 0.0));

    let row = text.lines().find(|l| l.starts_with("Broken")).unwrap();
    assert!(row.contains("FAILED"));
    assert!(row.ends_with("Error: API error (500): internal"));
}

#[tokio::test]
async fn one_row_per_generator_after_header() {
    let mut runner = BenchmarkRunner::new();
    runner.register(zeros("A")).unwrap();
    runner.register(Box::new(Broken)).unwrap();

    let (_, text) = run(&runner, 8).await;
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "--- Benchmarking Generation of 8 bits ---");
    assert!(lines[4].starts_with("A                    | "));
    assert!(lines[4].contains(" s  | "));
    assert!(lines[5].starts_with("Broken               | FAILED"));
}

#[tokio::test]
async fn duration_covers_the_call() {
    let mut runner = BenchmarkRunner::new();
    runner
        .register(Box::new(Zeros {
            name: "Slow",
            delay: Duration::from_millis(50),
        }))
        .unwrap();

    let (report, _) = run(&runner, 16).await;
    let secs = report.results().get("Slow").unwrap();
    assert!(secs >= 0.05, "measured {secs}");
    assert!(matches!(
        report.measurements[0].outcome,
        Outcome::Success {
            bits_per_second: Some(bps)
        } if bps > 0.0
    ));
}

#[tokio::test]
async fn wrong_length_is_a_failure() {
    let mut runner = BenchmarkRunner::new();
    runner.register(Box::new(Short)).unwrap();

    let (report, text) = run(&runner, 10).await;
    assert!(report.results().is_empty());
    assert!(text.contains("generator returned 9 bits, expected 10"));
}

#[tokio::test]
async fn zero_target_rejected() {
    let mut runner = BenchmarkRunner::new();
    runner.register(zeros("A")).unwrap();

    let mut out = Vec::new();
    let err = runner.run(0, &mut out).await.unwrap_err();
    assert!(matches!(err, BenchError::InvalidTarget));
}

#[test]
fn duplicate_names_rejected() {
    let mut runner = BenchmarkRunner::new();
    runner.register(zeros("Same")).unwrap();
    let err = runner.register(zeros("Same")).unwrap_err();
    assert!(matches!(err, BenchError::DuplicateGenerator(name) if name == "Same"));
    assert_eq!(runner.names(), vec!["Same"]);
}

#[tokio::test]
async fn local_generators_succeed() {
    let mut runner = BenchmarkRunner::new();
    runner.register(Box::new(SimulatorSource::default())).unwrap();
    runner.register(Box::new(ClassicalSource::new())).unwrap();

    let (report, text) = run(&runner, 2000).await;
    assert_eq!(
        report.results().names(),
        vec!["Local Statevector Sim", "Classical OS"]
    );
    assert!(!text.contains("FAILED"));
}
