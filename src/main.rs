use anyhow::Context;
use clap::Parser;
use data_toolkit::observability::logging;
use data_toolkit::{PipelineConfig, PipelineRunner};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "data_toolkit")]
#[command(about = "Scrape, clean and analyze datasets in one sequential pipeline")]
#[command(version)]
struct Cli {
    /// Directory holding data/ and reports/ (defaults to the current directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Optional TOML file overriding paths and scraper settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    let config = match &cli.config {
        Some(path) => PipelineConfig::load(&base_dir, path)?,
        None => PipelineConfig::for_base_dir(&base_dir),
    };

    let _log_guard = logging::init_logging(config.log_dir.as_deref());

    let mut runner = PipelineRunner::with_defaults(config);
    if let Err(e) = runner.run() {
        error!("Pipeline could not start: {}", e);
        return Err(e.into());
    }
    Ok(())
}
