//! Core data types that flow through a batch run.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::PipelineError;

/// One source file slated for transform-and-save.
///
/// Built once during enumeration and handed to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// File name for display and completion events (lossy for non-UTF-8 names)
    pub file_name: String,
    /// Full path of the source image
    pub source: PathBuf,
    /// Full path the filtered image is written to (`dst/<same name>`)
    pub destination: PathBuf,
}

impl WorkItem {
    /// Build a work item from a file name and the batch's source/destination folders.
    ///
    /// Paths are joined from the raw name, so names that are not valid
    /// UTF-8 still resolve to the real file.
    pub fn new(file_name: impl AsRef<OsStr>, src_dir: &Path, dst_dir: &Path) -> Self {
        let name = file_name.as_ref();
        Self {
            file_name: name.to_string_lossy().into_owned(),
            source: src_dir.join(name),
            destination: dst_dir.join(name),
        }
    }
}

/// The transforms a batch can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Tone remap to luminance only
    Grayscale,
    /// Gaussian spatial blur
    Blur,
}

impl FilterKind {
    /// CLI name of the filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Blur => "blur",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grayscale" => Ok(FilterKind::Grayscale),
            "blur" => Ok(FilterKind::Blur),
            other => Err(PipelineError::InvalidFilter(other.to_string())),
        }
    }
}

/// The filter name a batch was started with.
///
/// Kept as the raw operator input so that an unknown name is reported per
/// item instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest(String);

impl FilterRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Raw name as given on the command line.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Resolve to a known transform.
    pub fn resolve(&self) -> Result<FilterKind, PipelineError> {
        self.0.parse()
    }
}

impl From<FilterKind> for FilterRequest {
    fn from(kind: FilterKind) -> Self {
        Self(kind.as_str().to_string())
    }
}

/// How work items are assigned to concurrent workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// One worker drains the whole list in enumeration order (`waitgrp`)
    WaitGroup,
    /// One task per item, completion channel sized to the batch (`channel`)
    Channel,
}

impl DispatchStrategy {
    /// CLI name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStrategy::WaitGroup => "waitgrp",
            DispatchStrategy::Channel => "channel",
        }
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waitgrp" => Ok(DispatchStrategy::WaitGroup),
            "channel" => Ok(DispatchStrategy::Channel),
            other => Err(format!("Invalid task method: {other}")),
        }
    }
}

/// Result of one processing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Filtered image was written to its destination
    Written,
    /// Attempt finished without writing; carries the operator message
    Failed(String),
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Written)
    }
}

/// Notification that a work item's processing attempt has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub file_name: String,
    pub outcome: ItemOutcome,
}

impl CompletionEvent {
    pub fn written(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: ItemOutcome::Written,
        }
    }

    pub fn failed(file_name: impl Into<String>, error: &PipelineError) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: ItemOutcome::Failed(error.to_string()),
        }
    }
}

/// Counts gathered by the collector once the completion stream closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Completion events received
    pub total: usize,
    /// Items written to the destination
    pub succeeded: usize,
    /// Items that finished with a reported error
    pub failed: usize,
    /// Wall time from the first receive until the stream closed
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Record one completion event.
    pub fn record(&mut self, event: &CompletionEvent) {
        self.total += 1;
        if event.outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_paths_preserve_file_name() {
        let item = WorkItem::new("photo.JPG", Path::new("/in"), Path::new("/out"));
        assert_eq!(item.source, PathBuf::from("/in/photo.JPG"));
        assert_eq!(item.destination, PathBuf::from("/out/photo.JPG"));
        assert_eq!(item.file_name, "photo.JPG");
    }

    #[test]
    fn test_filter_kind_parse() {
        assert_eq!("grayscale".parse::<FilterKind>().unwrap(), FilterKind::Grayscale);
        assert_eq!("blur".parse::<FilterKind>().unwrap(), FilterKind::Blur);
        let err = "sepia".parse::<FilterKind>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid filter: sepia");
    }

    #[test]
    fn test_filter_request_keeps_raw_name() {
        let request = FilterRequest::new("Blur");
        assert_eq!(request.name(), "Blur");
        assert!(request.resolve().is_err());

        let request = FilterRequest::from(FilterKind::Blur);
        assert_eq!(request.resolve().unwrap(), FilterKind::Blur);
    }

    #[test]
    fn test_dispatch_strategy_parse() {
        assert_eq!(
            "waitgrp".parse::<DispatchStrategy>().unwrap(),
            DispatchStrategy::WaitGroup
        );
        assert_eq!(
            "channel".parse::<DispatchStrategy>().unwrap(),
            DispatchStrategy::Channel
        );
        assert_eq!(
            "threads".parse::<DispatchStrategy>().unwrap_err(),
            "Invalid task method: threads"
        );
    }

    #[test]
    fn test_summary_record() {
        let mut summary = BatchSummary::default();
        summary.record(&CompletionEvent::written("a.png"));
        summary.record(&CompletionEvent::failed(
            "b.png",
            &PipelineError::InvalidFilter("sepia".into()),
        ));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
    }
}
