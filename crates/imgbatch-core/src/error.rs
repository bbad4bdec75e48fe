//! Error types for the batch filter pipeline.
//!
//! Display strings double as the operator-facing console text, so a
//! per-item failure can be printed verbatim by whoever drains the
//! completion stream.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline errors, split by the stage that produced them.
///
/// Only `ReadDir` is fatal to a batch. Everything else is scoped to one item.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source directory could not be enumerated
    #[error("Error reading directory: {message}")]
    ReadDir { path: PathBuf, message: String },

    /// Source file could not be opened or decoded
    #[error("Error applying {filter} filter to {file_name}: {message}")]
    Decode {
        file_name: String,
        filter: String,
        message: String,
    },

    /// Filter name does not match any known transform
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The transform itself failed
    #[error("Error applying {filter} filter to {file_name}: {message}")]
    Transform {
        file_name: String,
        filter: String,
        message: String,
    },

    /// Transformed image could not be written to the destination
    #[error("Error applying {filter} filter to {file_name}: {message}")]
    Save {
        file_name: String,
        filter: String,
        message: String,
    },

    /// Blocking worker section panicked or was cancelled
    #[error("Worker for {file_name} did not complete: {message}")]
    TaskJoin { file_name: String, message: String },
}

impl PipelineError {
    /// Whether this error aborts the whole batch rather than a single item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::ReadDir { .. })
    }
}

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
