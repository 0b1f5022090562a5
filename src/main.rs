mod analyze;
mod coverage;
mod error;
mod extract;
mod keywords;
mod render;
mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use analyze::GuideAnalyzer;

#[derive(Parser)]
#[command(
    name = "missing_refs",
    about = "Find brands, apps, stores and services mentioned in travel guides but missing from their references"
)]
struct Cli {
    /// Guide dataset to scan
    #[arg(long, default_value = "dataset-guides.json")]
    dataset: PathBuf,

    /// Where to write the report; the directory must already exist
    #[arg(long, default_value = "enrichments/missing-references-analysis.json")]
    output: PathBuf,

    /// How many of the most frequent entities to list on the console
    #[arg(long, default_value_t = 20)]
    top: usize,
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let dataset = report::load_dataset(&cli.dataset)?;
    let analyzer = GuideAnalyzer::new().context("building entity patterns")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let analysis = report::run_with_progress(&analyzer, &dataset, &mut out)?;
    report::print_summary(&mut out, &analysis, cli.top)?;

    // Nothing is written unless the whole dataset was analyzed.
    report::write_report(&cli.output, &analysis)?;
    writeln!(out, "\nSaved to {}", cli.output.display())?;

    Ok(())
}
