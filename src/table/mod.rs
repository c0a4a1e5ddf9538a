//! Small helpers over polars `DataFrame`s.
//!
//! Column lookups report `TableError::MissingColumn` instead of a generic
//! polars error, so a schema problem in the input reads the same wherever it
//! is detected.

use polars::prelude::*;

use crate::domain::Value;
use crate::error::TableError;

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Look up a column that the pipeline cannot do without.
pub fn require<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, TableError> {
    df.column(name).map_err(|_| TableError::MissingColumn(name.to_string()))
}

pub fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Look up a column and check it holds numbers.
pub fn require_numeric<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, TableError> {
    let column = require(df, name)?;
    if !is_numeric(column.dtype()) {
        return Err(TableError::NotNumeric {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    Ok(column)
}

/// Rows that hold a null in any column.
pub fn rows_with_nulls(df: &DataFrame) -> Result<DataFrame, TableError> {
    let mut mask = BooleanChunked::full("has_null".into(), false, df.height());
    for column in df.get_columns() {
        mask = &mask | &column.is_null();
    }
    Ok(df.filter(&mask)?)
}

/// Owned copies of every cell of a column, in row order.
pub fn values(column: &Column) -> Result<Vec<Value>, TableError> {
    (0..column.len())
        .map(|row| Ok(Value::from_any(&column.get(row)?)))
        .collect()
}

/// Owned copies of the cells of one row, in column order.
pub fn row_values(df: &DataFrame, row: usize) -> Result<Vec<Value>, TableError> {
    df.get_columns()
        .iter()
        .map(|column| Ok(Value::from_any(&column.get(row)?)))
        .collect()
}
