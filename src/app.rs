//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - merges the YAML configuration
//! - sets up logging
//! - runs the pipeline

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::error::AppError;

pub mod pipeline;

pub use pipeline::{RunOptions, RunOutput};

/// Entry point for the `shelter` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    crate::config::load_dotenv();
    let config = crate::config::load_config(&cli.config)?;
    crate::logging::init(cli.verbose, &cli.log_file)?;

    info!(input = %cli.input.display(), group_col = %config.group_col, "Starting run");

    let options = run_options_from_args(&cli);
    let output = pipeline::run(&options, &config)?;

    info!(
        rows = output.table.height(),
        groups = output.summary.rows.len(),
        chart = %output.chart_path.display(),
        "Run complete"
    );
    Ok(())
}

pub fn run_options_from_args(cli: &Cli) -> RunOptions {
    RunOptions {
        input: cli.input.clone(),
        chart_path: format!("{}.png", cli.output_file).into(),
        workbook: cli.workbook.clone(),
        width: cli.width,
        height: cli.height,
        export_summary: cli.export_summary.clone(),
        export_profile: cli.export_profile.clone(),
    }
}
