//! Batch filter pipeline components.
//!
//! - **backend**: decode/transform/save collaborator (`image` crate)
//! - **discovery**: enumerate the source folder into work items
//! - **processor**: apply the batch's filter to one work item
//! - **channel**: completion channel and the collector loop
//! - **dispatch**: the two strategies that fan items out to workers

pub mod backend;
pub mod channel;
pub mod discovery;
pub mod dispatch;
pub mod processor;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenient access
pub use backend::{ImageBackend, ImageCrateBackend};
pub use channel::{completion_channel, drain, hand_off, Delivery};
pub use discovery::enumerate;
pub use dispatch::{dispatch_channel, dispatch_wait_group, BatchJob, BatchRun};
pub use processor::ItemProcessor;
