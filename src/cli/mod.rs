//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline; `app` turns the parsed flags into `RunOptions`.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "shelter",
    version,
    about = "Plot for Toronto Shelter & Overnight Service Occupancy & Capacity Dataset"
)]
pub struct Cli {
    /// Path to the input CSV dataset.
    #[arg(short = 'i', long, default_value = "Daily_shelter_overnight_occupancy.csv")]
    pub input: PathBuf,

    /// Output plot filename (without the `.png` extension).
    #[arg(short = 'o', long = "output_file", default_value = "Daily_shelter_overnight_occupancy")]
    pub output_file: String,

    /// Print verbose logs.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// YAML config files, merged in order (later files win).
    #[arg(long = "config", value_name = "YAML", default_values = ["user_config.yml", "job_config.yml"])]
    pub config: Vec<PathBuf>,

    /// Log file (appended to).
    #[arg(long, default_value = "Daily_shelter_overnight_occupancy.log")]
    pub log_file: PathBuf,

    /// Spreadsheet the cleaned table is saved to.
    #[arg(long, default_value = "Daily_shelter_overnight_occupancy_proc.xlsx")]
    pub workbook: PathBuf,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Export the aggregated summary to CSV.
    #[arg(long = "export-summary", value_name = "CSV")]
    pub export_summary: Option<PathBuf>,

    /// Export the dataset profile to JSON.
    #[arg(long = "export-profile", value_name = "JSON")]
    pub export_profile: Option<PathBuf>,
}
