//! The default command: run one batch and print a line per completed item.

use clap::Args;
use imgbatch_core::config::expand_path;
use imgbatch_core::{
    BatchJob, CompletionEvent, Config, DispatchStrategy, FilterRequest, ImageCrateBackend,
    ItemOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;

pub const USAGE: &str = "Usage: imgbatch -src <source_folder> -dst <destination_folder> -filter <filter_type> -task <task_method>";

/// Flags for a batch run. All four are required; clap treats them as
/// optional so a missing one prints usage instead of a parse error.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Source folder containing the images
    #[arg(long)]
    pub src: Option<PathBuf>,

    /// Destination folder to save the filtered images (must already exist)
    #[arg(long)]
    pub dst: Option<PathBuf>,

    /// Filter to apply (grayscale or blur)
    #[arg(long)]
    pub filter: Option<String>,

    /// Task method to use (waitgrp or channel)
    #[arg(long)]
    pub task: Option<String>,
}

/// Flags after presence checks.
#[derive(Debug)]
struct Resolved {
    src: PathBuf,
    dst: PathBuf,
    filter: String,
    task: String,
}

impl RunArgs {
    /// All four flags, or `None` if any is missing or empty.
    fn resolve(self) -> Option<Resolved> {
        let src = self.src.filter(|p| !p.as_os_str().is_empty())?;
        let dst = self.dst.filter(|p| !p.as_os_str().is_empty())?;
        let filter = self.filter.filter(|f| !f.is_empty())?;
        let task = self.task.filter(|t| !t.is_empty())?;
        Some(Resolved {
            src,
            dst,
            filter,
            task,
        })
    }
}

/// Console lines for one completion event.
///
/// A failed item gets its error line first, then the completion line.
pub fn event_lines(event: &CompletionEvent) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if let ItemOutcome::Failed(message) = &event.outcome {
        lines.push(message.clone());
    }
    lines.push(format!("Finished processing: {}", event.file_name));
    lines
}

/// Execute a batch run.
///
/// Every operator-facing condition is printed; none of them changes the
/// exit status.
pub async fn execute(args: RunArgs, config: Config) -> anyhow::Result<()> {
    let Some(args) = args.resolve() else {
        println!("{USAGE}");
        return Ok(());
    };

    let strategy = match args.task.parse::<DispatchStrategy>() {
        Ok(strategy) => strategy,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    let job = BatchJob::new(
        expand_path(&args.src),
        expand_path(&args.dst),
        FilterRequest::new(args.filter),
        strategy,
    );

    let result = job
        .run(Arc::new(ImageCrateBackend), &config, |event| {
            for line in event_lines(event) {
                println!("{line}");
            }
        })
        .await;

    match result {
        Ok(summary) => tracing::info!(
            "Batch complete: {} succeeded, {} failed in {:.2?}",
            summary.succeeded,
            summary.failed,
            summary.elapsed
        ),
        Err(e) => println!("{e}"),
    }

    Ok(())
}
