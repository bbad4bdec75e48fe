//! imgbatch core - apply one image filter to every file in a folder.
//!
//! A batch enumerates a source folder, hands each file to a worker that
//! opens it, applies grayscale or blur, and writes the result under the
//! same name in the destination folder. Every attempt, successful or not,
//! yields exactly one [`CompletionEvent`] on a shared channel that the
//! caller drains until it closes.
//!
//! ```text
//! enumerate → dispatch (1 worker | N workers) → process → channel → collect
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use imgbatch_core::{BatchJob, Config, DispatchStrategy, FilterKind, ImageCrateBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let job = BatchJob::new("./in", "./out", FilterKind::Blur.into(), DispatchStrategy::Channel);
//!     let summary = job
//!         .run(Arc::new(ImageCrateBackend), &config, |e| println!("Finished processing: {}", e.file_name))
//!         .await?;
//!     println!("{} written, {} failed", summary.succeeded, summary.failed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult};
pub use pipeline::{BatchJob, BatchRun, ImageBackend, ImageCrateBackend, ItemProcessor};
pub use types::{
    BatchSummary, CompletionEvent, DispatchStrategy, FilterKind, FilterRequest, ItemOutcome,
    WorkItem,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
