//! CSV ingest.
//!
//! Turns the occupancy CSV into a polars `DataFrame`:
//! - header names are trimmed (and a UTF-8 BOM on the first one stripped)
//! - empty cells and the usual NA markers become nulls
//! - column types are inferred from the whole file, not a prefix
//!
//! No cleaning happens here; dates stay text until `clean::to_date`.

use std::io::{Cursor, ErrorKind};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{AppError, EXIT_DATA, EXIT_INPUT};

/// Cell contents read as missing values, on top of empty cells.
const NA_MARKERS: [&str; 7] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Load a CSV file from disk.
pub fn load_csv(path: &Path) -> Result<DataFrame, AppError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::new(
            EXIT_INPUT,
            format!("The {} csv file was not found", path.display()),
        ),
        _ => AppError::new(EXIT_INPUT, format!("Failed to open {}: {e}", path.display())),
    })?;

    read_csv(data).map_err(|e| e.context(format!("Failed to read '{}'", path.display())))
}

/// Parse CSV bytes (header row required).
pub fn read_csv(data: Vec<u8>) -> Result<DataFrame, AppError> {
    let null_values = NA_MARKERS.iter().map(|m| PlSmallStr::from(*m)).collect();

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_null_values(Some(NullValues::AllColumns(null_values)))
                .with_truncate_ragged_lines(true),
        )
        .into_reader_with_file_handle(Cursor::new(data))
        .finish()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to parse CSV: {e}")))?;

    // Excel exports sometimes carry a BOM on the first header; without stripping
    // it `_id` would not be found later on.
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().trim_start_matches('\u{feff}').to_string())
        .collect();
    df.set_column_names(names)
        .map_err(|e| AppError::new(EXIT_DATA, format!("Invalid CSV header: {e}")))?;

    debug!(rows = df.height(), columns = df.width(), "Parsed CSV");
    Ok(df)
}
