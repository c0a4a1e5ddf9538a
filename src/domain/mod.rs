//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the owned cell value handed out of dataframes (`Value`)
//! - the column names of the occupancy dataset (`schema`)

pub mod schema;
pub mod types;

pub use types::*;
