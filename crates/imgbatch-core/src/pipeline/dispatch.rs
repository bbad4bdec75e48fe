//! Dispatch strategies - how a batch's work items are spread over workers.
//!
//! Both strategies share one shape: workers hold clones of the completion
//! sender, a supervisor task holds the original and joins every worker
//! before dropping it. The supervisor's drop is the only close, so the
//! collector sees end-of-stream exactly once, after the last event.
//!
//! - **WaitGroup**: one worker enumerates the source folder and processes
//!   items in order, handing each event off and waiting until the
//!   collector has taken it before starting the next item. Completion
//!   order equals enumeration order.
//! - **Channel**: the caller enumerates, then spawns one task per item
//!   with no concurrency cap. The channel is sized to the batch so no
//!   worker ever waits on the collector. Completion order is whatever the
//!   scheduler produces.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{BatchSummary, CompletionEvent, DispatchStrategy, FilterRequest};

use super::backend::ImageBackend;
use super::channel::{completion_channel, drain, hand_off, Delivery};
use super::discovery::enumerate;
use super::processor::ItemProcessor;

/// A batch that has been started and is producing completion events.
pub struct BatchRun {
    events: mpsc::Receiver<Delivery>,
    supervisor: JoinHandle<PipelineResult<usize>>,
}

impl BatchRun {
    /// Receive the next completion event, or `None` once the batch is done.
    pub async fn next_event(&mut self) -> Option<CompletionEvent> {
        self.events.recv().await.map(Delivery::accept)
    }

    /// Drain every completion event, then wait for the supervisor.
    ///
    /// Returns an error only when the source folder could not be
    /// enumerated; per-item failures are counted in the summary.
    pub async fn collect<F>(self, on_event: F) -> PipelineResult<BatchSummary>
    where
        F: FnMut(&CompletionEvent),
    {
        let summary = drain(self.events, on_event).await;

        match self.supervisor.await {
            Ok(Ok(dispatched)) => {
                tracing::debug!(
                    "Supervisor joined {} item(s), collector saw {}",
                    dispatched,
                    summary.total
                );
                Ok(summary)
            }
            Ok(Err(e)) => Err(e),
            Err(e) => Err(PipelineError::TaskJoin {
                file_name: "supervisor".to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// One batch: where to read, where to write, what to apply, and how to fan out.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub src: PathBuf,
    pub dst: PathBuf,
    pub filter: FilterRequest,
    pub strategy: DispatchStrategy,
}

impl BatchJob {
    pub fn new(
        src: impl Into<PathBuf>,
        dst: impl Into<PathBuf>,
        filter: FilterRequest,
        strategy: DispatchStrategy,
    ) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            filter,
            strategy,
        }
    }

    /// Start the batch on the current tokio runtime.
    ///
    /// Under `Channel` an unreadable source folder is returned here before
    /// any worker exists. Under `WaitGroup` enumeration happens inside the
    /// worker, so the same failure surfaces from [`BatchRun::collect`].
    pub fn start(&self, backend: Arc<dyn ImageBackend>, config: &Config) -> PipelineResult<BatchRun> {
        let processor = ItemProcessor::new(backend, self.filter.clone(), &config.filter);
        tracing::debug!(
            "Starting batch {:?} -> {:?} (filter={}, task={})",
            self.src,
            self.dst,
            self.filter.name(),
            self.strategy
        );

        match self.strategy {
            DispatchStrategy::WaitGroup => {
                Ok(dispatch_wait_group(processor, self.src.clone(), self.dst.clone()))
            }
            DispatchStrategy::Channel => {
                dispatch_channel(processor, self.src.clone(), self.dst.clone())
            }
        }
    }

    /// Start the batch and drain it, calling `on_event` per completion.
    pub async fn run<F>(
        &self,
        backend: Arc<dyn ImageBackend>,
        config: &Config,
        on_event: F,
    ) -> PipelineResult<BatchSummary>
    where
        F: FnMut(&CompletionEvent),
    {
        self.start(backend, config)?.collect(on_event).await
    }
}

/// Single worker, sequential processing, rendezvous hand-off per item.
pub fn dispatch_wait_group(processor: ItemProcessor, src: PathBuf, dst: PathBuf) -> BatchRun {
    let (tx, events) = completion_channel(1);
    let mut workers: JoinSet<PipelineResult<usize>> = JoinSet::new();

    let worker_tx = tx.clone();
    workers.spawn(async move {
        let items = enumerate(&src, &dst)?;
        let count = items.len();

        for item in items {
            let event = processor.process(item).await;
            if !hand_off(&worker_tx, event).await {
                tracing::warn!("Collector went away, stopping worker");
                break;
            }
        }
        Ok(count)
    });

    let supervisor = tokio::spawn(supervise(workers, tx));
    BatchRun { events, supervisor }
}

/// One task per item, channel sized to the batch.
pub fn dispatch_channel(
    processor: ItemProcessor,
    src: PathBuf,
    dst: PathBuf,
) -> PipelineResult<BatchRun> {
    let items = enumerate(&src, &dst)?;
    let (tx, events) = completion_channel(items.len());
    let mut workers: JoinSet<PipelineResult<usize>> = JoinSet::new();

    tracing::debug!("Spawning {} worker(s)", items.len());
    for item in items {
        let processor = processor.clone();
        let tx = tx.clone();
        workers.spawn(async move {
            let event = processor.process(item).await;
            if tx.send(Delivery::detached(event)).await.is_err() {
                tracing::warn!("Collector went away, dropping completion event");
            }
            Ok(1)
        });
    }

    let supervisor = tokio::spawn(supervise(workers, tx));
    Ok(BatchRun { events, supervisor })
}

/// Join every worker, then close the completion channel by dropping the
/// last sender this side holds.
async fn supervise(
    mut workers: JoinSet<PipelineResult<usize>>,
    closer: mpsc::Sender<Delivery>,
) -> PipelineResult<usize> {
    let mut dispatched = 0usize;
    let mut fatal = None;

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Ok(count)) => dispatched += count,
            Ok(Err(e)) => {
                tracing::debug!("Batch aborted: {}", e);
                fatal.get_or_insert(e);
            }
            Err(e) => tracing::error!("Worker task panicked: {e}"),
        }
    }

    drop(closer);
    tracing::debug!("All workers joined; completion channel closed");

    match fatal {
        Some(e) => Err(e),
        None => Ok(dispatched),
    }
}
