//! Item processor - applies the batch's filter to a single work item.

use std::sync::Arc;
use std::time::Instant;

use crate::config::FilterConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{CompletionEvent, FilterKind, FilterRequest, WorkItem};

use super::backend::ImageBackend;

/// Opens, transforms and saves one work item.
///
/// Cheap to clone; every worker task holds its own copy.
#[derive(Clone)]
pub struct ItemProcessor {
    backend: Arc<dyn ImageBackend>,
    filter: FilterRequest,
    blur_sigma: f32,
}

impl ItemProcessor {
    /// Create a processor for one batch.
    pub fn new(backend: Arc<dyn ImageBackend>, filter: FilterRequest, config: &FilterConfig) -> Self {
        Self {
            backend,
            filter,
            blur_sigma: config.blur_sigma,
        }
    }

    /// Process one item and report its completion.
    ///
    /// Never fails: every error, including a panic inside the backend, is
    /// folded into the returned event so the batch keeps its one event per
    /// item.
    pub async fn process(&self, item: WorkItem) -> CompletionEvent {
        let start = Instant::now();
        let file_name = item.file_name.clone();
        tracing::debug!("Processing: {:?}", item.source);

        match self.run(item).await {
            Ok(()) => {
                tracing::debug!("Processed {:?} in {:?}", file_name, start.elapsed());
                CompletionEvent::written(file_name)
            }
            Err(e) => {
                tracing::error!("Failed: {:?} - {}", file_name, e);
                CompletionEvent::failed(file_name, &e)
            }
        }
    }

    async fn run(&self, item: WorkItem) -> PipelineResult<()> {
        let kind = self.filter.resolve()?;
        let backend = Arc::clone(&self.backend);
        let sigma = self.blur_sigma;
        let file_name = item.file_name.clone();

        tokio::task::spawn_blocking(move || apply_sync(backend.as_ref(), kind, sigma, &item))
            .await
            .map_err(|e| PipelineError::TaskJoin {
                file_name,
                message: e.to_string(),
            })?
    }
}

/// Synchronous open → transform → save (runs in spawn_blocking).
fn apply_sync(
    backend: &dyn ImageBackend,
    kind: FilterKind,
    sigma: f32,
    item: &WorkItem,
) -> PipelineResult<()> {
    let filter = kind.to_string();

    let image = backend
        .open(&item.source)
        .map_err(|e| PipelineError::Decode {
            file_name: item.file_name.clone(),
            filter: filter.clone(),
            message: e.to_string(),
        })?;

    let transformed = match kind {
        FilterKind::Grayscale => backend.tone_remap(image),
        FilterKind::Blur => backend.spatial_blur(image, sigma),
    }
    .map_err(|e| PipelineError::Transform {
        file_name: item.file_name.clone(),
        filter: filter.clone(),
        message: e.to_string(),
    })?;

    backend
        .save(&transformed, &item.destination)
        .map_err(|e| PipelineError::Save {
            file_name: item.file_name.clone(),
            filter,
            message: e.to_string(),
        })
}
