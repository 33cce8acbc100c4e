//! qrngbench command-line interface.
//!
//! With no arguments: benchmark 2000 bits from every generator, print the
//! timing table, then show the bar chart.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qrng_bench::BenchConfig;

mod bench;

/// Time a simulated qubit, the ANU quantum API and the OS RNG producing random bits
#[derive(Parser, Debug)]
#[command(name = "qrngbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of bits to request from each generator
    #[arg(short, long)]
    bits: Option<usize>,

    /// ANU API request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Seed for the local simulator's sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the chart
    #[arg(long)]
    no_plot: bool,

    /// Write the full report as JSON
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (or defaults) and apply command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<BenchConfig> {
        let mut config = BenchConfig::load(self.config.as_deref())?;

        if let Some(bits) = self.bits {
            config.target_bits = bits;
        }
        if let Some(timeout) = self.timeout {
            config.anu.timeout_seconds = timeout;
        }
        if let Some(seed) = self.seed {
            config.simulator.seed = Some(seed);
        }
        if self.no_plot {
            config.plot.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for the report.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.resolve_config() {
        Ok(config) => bench::execute(&config, cli.export.as_deref()).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
