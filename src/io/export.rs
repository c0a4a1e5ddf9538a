//! Optional exports: aggregated summary (CSV) and profile (JSON).
//!
//! Both are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, SerWriter};

use crate::analysis::Summary;
use crate::error::{AppError, EXIT_OUTPUT};
use crate::profile::Profile;

/// Write the aggregated summary to a CSV file.
///
/// Header: `<group_col>,records,total_service_user,average_service_user,average_occupancy_rate_beds`.
/// Means over no values are written as empty cells.
pub fn write_summary_csv(path: &Path, summary: &Summary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create summary CSV '{}': {e}", path.display())))?;

    let mut frame = summary.frame.clone();
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write summary CSV: {e}")))
}

/// Write the profile as pretty-printed JSON.
pub fn write_profile_json(path: &Path, profile: &Profile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create profile JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, profile)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write profile JSON: {e}")))
}
