//! Input/output helpers.
//!
//! - CSV ingest into a polars frame (`ingest`)
//! - cleaned frame to `.xlsx` (`workbook`)
//! - summary CSV / profile JSON exports (`export`)

pub mod export;
pub mod ingest;
pub mod workbook;

pub use export::*;
pub use ingest::*;
pub use workbook::*;
