//! Source directory enumeration.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{PipelineError, PipelineResult};
use crate::types::WorkItem;

/// List the immediate entries of `src` as work items bound for `dst`.
///
/// The directory is read once, sorted by file name. Subdirectories are
/// dropped; every other entry is eligible regardless of extension, so a
/// non-image file becomes a per-item decode failure later on.
pub fn enumerate(src: &Path, dst: &Path) -> PipelineResult<Vec<WorkItem>> {
    if let Ok(meta) = std::fs::metadata(src) {
        if !meta.is_dir() {
            return Err(PipelineError::ReadDir {
                path: src.to_path_buf(),
                message: format!("{} is not a directory", src.display()),
            });
        }
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(src)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| PipelineError::ReadDir {
            path: src.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        items.push(WorkItem::new(entry.file_name(), src, dst));
    }

    tracing::debug!("Enumerated {} item(s) in {:?}", items.len(), src);
    Ok(items)
}
