//! Command-line surface: flag normalization, the batch run, and config management.

pub mod args;
pub mod config;
pub mod run;
