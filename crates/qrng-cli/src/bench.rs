//! Benchmark command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qrng_bench::{BenchConfig, plot, run_benchmark};

/// Run the benchmark, optionally export the report, then chart the results.
pub async fn execute(config: &BenchConfig, export: Option<&Path>) -> Result<()> {
    let report = run_benchmark(config).await?;

    let failed = report.failures().count();
    if failed > 0 {
        info!("{} of {} generators failed", failed, report.measurements.len());
    }

    if let Some(path) = export {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!(
            "{} Report written to {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }

    if config.plot.enabled {
        plot::plot_results(&report.results())?;
    }

    Ok(())
}
