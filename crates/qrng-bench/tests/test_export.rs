//! Writing the benchmark report to disk as JSON.

use async_trait::async_trait;
use chrono::Utc;
use qrng_bench::{
    BenchError, BenchmarkReport, BenchmarkRunner, BitGenerator, BitString, GeneratorError,
    GeneratorResult, Measurement, Outcome,
};
use serde_json::Value;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn report_file_records_success_and_failure() {
    let report = BenchmarkReport {
        target_bits: 16,
        started_at: Utc::now(),
        measurements: vec![
            Measurement {
                name: "Classical OS".into(),
                duration_seconds: 0.0,
                outcome: Outcome::Success {
                    bits_per_second: None,
                },
            },
            Measurement {
                name: "Remote ANU API".into(),
                duration_seconds: 0.25,
                outcome: Outcome::Failed {
                    error: "request timed out after 10s".into(),
                },
            },
        ],
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.write_json(&path).unwrap();

    let json = read_json(&path);
    assert_eq!(json["target_bits"], 16);
    assert!(json["started_at"].is_string());

    let ok = &json["measurements"][0];
    assert_eq!(ok["name"], "Classical OS");
    assert_eq!(ok["status"], "success");
    assert_eq!(ok["duration_seconds"], 0.0);
    assert!(ok["bits_per_second"].is_null());
    assert!(ok.get("error").is_none());

    let failed = &json["measurements"][1];
    assert_eq!(failed["status"], "failed");
    assert_eq!(failed["duration_seconds"], 0.25);
    assert_eq!(failed["error"], "request timed out after 10s");
    assert!(failed.get("bits_per_second").is_none());
}

#[test]
fn missing_directory_is_io_error() {
    let report = BenchmarkReport {
        target_bits: 8,
        started_at: Utc::now(),
        measurements: Vec::new(),
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.json");

    let err = report.write_json(&path).unwrap_err();
    assert!(matches!(err, BenchError::Io(_)));
    assert!(!path.exists());
}

struct Fixed(&'static str, Option<&'static str>);

#[async_trait]
impl BitGenerator for Fixed {
    fn name(&self) -> &str {
        self.0
    }

    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString> {
        match self.1 {
            Some(reason) => Err(GeneratorError::MalformedResponse(reason.into())),
            None => Ok(BitString::parse("1".repeat(num_bits)).unwrap()),
        }
    }
}

#[tokio::test]
async fn runner_report_round_trips_through_file() {
    let mut runner = BenchmarkRunner::new();
    runner.register(Box::new(Fixed("ones", None))).unwrap();
    runner
        .register(Box::new(Fixed("broken", Some("no data"))))
        .unwrap();

    let mut out = Vec::new();
    let report = runner.run(32, &mut out).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    report.write_json(&path).unwrap();
    let json = read_json(&path);

    assert_eq!(json["target_bits"], 32);
    let measurements = json["measurements"].as_array().unwrap();
    assert_eq!(measurements.len(), 2);
    assert_eq!(measurements[0]["name"], "ones");
    assert_eq!(measurements[0]["status"], "success");
    assert!(measurements[0]["duration_seconds"].as_f64().unwrap() >= 0.0);
    assert_eq!(measurements[1]["status"], "failed");
    assert!(
        measurements[1]["error"]
            .as_str()
            .unwrap()
            .contains("no data")
    );
}
