//! Cleaning and type conversion.
//!
//! Every step replaces whole columns of the frame in place. A step that fails
//! leaves the column it was working on untouched.

use polars::prelude::*;
use tracing::debug;

use crate::domain::{Value, schema};
use crate::error::TableError;
use crate::table::{has_column, require};

const DATE_FMTS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Rename the raw `_id` column to `ID`.
///
/// Fails with `TableError::MissingColumn` if there is no `_id` column, and with
/// `TableError::DuplicateColumn` if an `ID` column already exists. In both
/// cases the frame is not modified.
pub fn rename_column(df: &mut DataFrame) -> Result<&mut DataFrame, TableError> {
    if !has_column(df, schema::RAW_ID) {
        return Err(TableError::MissingColumn(schema::RAW_ID.to_string()));
    }
    if has_column(df, schema::ID) {
        return Err(TableError::DuplicateColumn(schema::ID.to_string()));
    }
    df.rename(schema::RAW_ID, schema::ID.into())?;
    Ok(df)
}

/// Run the full cleaning sequence on an occupancy frame.
pub fn clean_occupancy(df: &mut DataFrame) -> Result<(), TableError> {
    rename_column(df)?;

    to_date(df, schema::OCCUPANCY_DATE)?;
    to_int(df, schema::LOCATION_ID)?;
    for column in schema::COUNT_COLUMNS {
        to_int(df, column)?;
    }

    derive_month(df, schema::OCCUPANCY_DATE, schema::OCCUPANCY_MONTH)?;
    let replaced = replace_text(df, schema::LOCATION_ADDRESS, "Road", "Rd")?;
    debug!(replaced, "Abbreviated `Road` in {}", schema::LOCATION_ADDRESS);

    require(df, schema::LOCATION_PROVINCE)?;
    df.drop_in_place(schema::LOCATION_PROVINCE)?;
    Ok(())
}

/// Convert a text column to dates.
///
/// Each value may use any of the accepted layouts; a non-null value that
/// matches none of them is a conversion error.
pub fn to_date(df: &mut DataFrame, name: &str) -> Result<(), TableError> {
    let source = require(df, name)?;
    let converted = match source.dtype() {
        DataType::Date => return Ok(()),
        DataType::String => {
            let parsed = df.clone().lazy().select([date_expr(name)]).collect()?;
            parsed.column(name)?.clone()
        }
        _ => Column::full_null(name.into(), source.len(), &DataType::Date),
    };

    if let Some(row) = first_failure(source, &converted) {
        return Err(conversion_error(name, row, source, "date"));
    }
    df.with_column(converted)?;
    Ok(())
}

/// Try the date layouts first, then the date-time ones, keeping the first hit.
fn date_expr(name: &str) -> Expr {
    let dates = DATE_FMTS.iter().map(|fmt| col(name).str().to_date(strptime(fmt)));
    let datetimes = DATETIME_FMTS.iter().map(|fmt| {
        col(name)
            .str()
            .to_datetime(Some(TimeUnit::Microseconds), None, strptime(fmt), lit("raise"))
            .dt()
            .date()
    });
    let parsers: Vec<Expr> = dates.chain(datetimes).collect();
    coalesce(&parsers).alias(name)
}

fn strptime(fmt: &str) -> StrptimeOptions {
    StrptimeOptions {
        format: Some(fmt.into()),
        strict: false,
        exact: true,
        cache: true,
    }
}

/// Convert a column to nullable 64-bit integers.
///
/// Floats must be whole numbers; text must parse as an integer.
pub fn to_int(df: &mut DataFrame, name: &str) -> Result<(), TableError> {
    let source = require(df, name)?;
    if source.dtype() == &DataType::Int64 {
        return Ok(());
    }

    let converted = source.cast(&DataType::Int64)?;
    let failed = if source.dtype().is_float() {
        fractional_row(source)?.or_else(|| first_failure(source, &converted))
    } else {
        first_failure(source, &converted)
    };
    if let Some(row) = failed {
        return Err(conversion_error(name, row, source, "Int64"));
    }

    df.with_column(converted)?;
    Ok(())
}

/// Add an integer month (1-12) column derived from a date column.
pub fn derive_month(df: &mut DataFrame, date_column: &str, month_column: &str) -> Result<(), TableError> {
    let source = require(df, date_column)?;
    if source.dtype() != &DataType::Date {
        return Err(TableError::Conversion {
            column: date_column.to_string(),
            row: 0,
            value: source.dtype().to_string(),
            target: "date",
        });
    }
    if has_column(df, month_column) {
        return Err(TableError::DuplicateColumn(month_column.to_string()));
    }

    let months = df
        .clone()
        .lazy()
        .select([col(date_column).dt().month().cast(DataType::Int64).alias(month_column)])
        .collect()?;
    df.with_column(months.column(month_column)?.clone())?;
    Ok(())
}

/// Replace every occurrence of `from` with `to` in a text column.
///
/// Returns the number of cells that changed.
pub fn replace_text(df: &mut DataFrame, name: &str, from: &str, to: &str) -> Result<usize, TableError> {
    let source = require(df, name)?;
    // An all-null column may be read as numeric; there is nothing to replace.
    let Ok(text) = source.str() else {
        return Ok(0);
    };
    let changed = text.into_iter().flatten().filter(|s| s.contains(from)).count();
    if changed == 0 {
        return Ok(0);
    }

    let replaced = df
        .clone()
        .lazy()
        .select([col(name).str().replace_all(lit(from), lit(to), true)])
        .collect()?;
    df.with_column(replaced.column(name)?.clone())?;
    Ok(changed)
}

/// First row that held a value before conversion and is null after it.
fn first_failure(source: &Column, converted: &Column) -> Option<usize> {
    let lost = &source.is_not_null() & &converted.is_null();
    (&lost).into_iter().position(|flag| flag == Some(true))
}

fn fractional_row(source: &Column) -> Result<Option<usize>, TableError> {
    let floats = source.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .position(|v| v.is_some_and(|v| v.is_finite() && v.fract() != 0.0)))
}

fn conversion_error(column: &str, row: usize, source: &Column, target: &'static str) -> TableError {
    let value = source
        .get(row)
        .map(|v| Value::from_any(&v).to_string())
        .unwrap_or_default();
    TableError::Conversion {
        column: column.to_string(),
        row,
        value,
        target,
    }
}
