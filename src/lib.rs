//! `shelter-occupancy` library crate.
//!
//! The binary (`shelter`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - the table, cleaning and aggregation code can be reused on other extracts
//!   of the same dataset

pub mod analysis;
pub mod app;
pub mod clean;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod profile;
pub mod report;
pub mod table;
