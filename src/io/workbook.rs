//! Write a frame to an `.xlsx` workbook.
//!
//! One worksheet: a header row with the column names, then one row per record.
//! Dates are stored as Excel serial numbers with a `yyyy-mm-dd` format so they
//! stay sortable in a spreadsheet; nulls are left as empty cells.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::domain::Value;
use crate::error::{AppError, EXIT_OUTPUT};
use crate::table::values;

/// Write `df` to `path`, replacing any existing file.
pub fn write_workbook(path: &Path, df: &DataFrame) -> Result<(), AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    fill_worksheet(worksheet, df)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to build workbook: {e}")))?;

    workbook
        .save(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to save workbook '{}': {e}", path.display())))
}

fn fill_worksheet(worksheet: &mut Worksheet, df: &DataFrame) -> Result<(), Box<dyn std::error::Error>> {
    let bold = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (col, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(col)?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), &bold)?;

        for (idx, value) in values(column)?.iter().enumerate() {
            let row = u32::try_from(idx)? + 1;
            match value {
                Value::Null => {}
                Value::Int(v) => {
                    worksheet.write_number(row, col, *v as f64)?;
                }
                Value::Float(v) if v.is_finite() => {
                    worksheet.write_number(row, col, *v)?;
                }
                Value::Float(_) => {}
                Value::Date(d) => {
                    worksheet.write_number_with_format(row, col, excel_serial(*d), &date_format)?;
                }
                Value::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
            }
        }
    }

    Ok(())
}

/// Days since 1899-12-30, the Excel (1900 system) epoch.
fn excel_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    (date - epoch).num_days() as f64
}
