//! Command-line pipeline for the retail ETL.

pub mod config;
pub mod logging;
pub mod pipeline;
