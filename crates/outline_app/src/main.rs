mod app;
mod logging;
mod render;
mod runner;
mod selector;

use std::path::PathBuf;

use clap::Parser;

/// Batch PDF outline extraction against a PageSense service.
#[derive(Debug, Parser)]
#[command(name = "pagesense", version)]
pub struct Cli {
    /// PDF files to process, in selection order.
    pub files: Vec<PathBuf>,

    /// Base URL of the extraction service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub server: String,

    /// Directory JSON exports are written to.
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Skip writing JSON exports.
    #[arg(long)]
    pub no_export: bool,
}

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    app::run(Cli::parse())
}
