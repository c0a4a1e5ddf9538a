//! Error types.
//!
//! - `TableError` is the domain error raised by table operations (rename,
//!   select, conversions, aggregation), wrapping polars failures.
//! - `AppError` is what the pipeline returns to `main`: a message plus the
//!   process exit code (2 = input/config, 3 = data/schema, 4 = output).

use polars::prelude::PolarsError;

/// Exit code for unreadable inputs and bad configuration.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for data that does not fit the expected schema.
pub const EXIT_DATA: u8 = 3;
/// Exit code for failures writing output artifacts.
pub const EXIT_OUTPUT: u8 = 4;

/// Errors raised by table operations.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("missing required column: `{0}`")]
    MissingColumn(String),

    #[error("duplicate column: `{0}`")]
    DuplicateColumn(String),

    #[error("cannot convert `{value}` in column `{column}` (row {row}) to {target}")]
    Conversion {
        column: String,
        row: usize,
        value: String,
        target: &'static str,
    },

    #[error("column `{column}` is {dtype}, expected a numeric column")]
    NotNumeric { column: String, dtype: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Prefix the message with extra context, keeping the exit code.
    pub fn context(self, note: impl std::fmt::Display) -> Self {
        Self {
            exit_code: self.exit_code,
            message: format!("{note}: {}", self.message),
        }
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        AppError::new(EXIT_DATA, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
