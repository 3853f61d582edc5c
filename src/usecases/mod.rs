//! Application use cases. The scrape, diff, assemble and publish pipeline.

pub mod assembler;
pub mod classifier;
pub mod event_bus;
pub mod pipeline;
pub mod publish_service;
pub mod row_diff;
pub mod scan_service;
pub mod stabilizer;

pub use assembler::MessageAssembler;
pub use classifier::{ChatCell, LayoutHeuristics};
pub use event_bus::EventBus;
pub use pipeline::{Pipeline, PipelineHandle};
pub use publish_service::{PublishService, PublishWorker, RetryPolicy};
pub use row_diff::RowDiff;
pub use scan_service::{PollCadence, ScanService, ScanSession};
pub use stabilizer::Stabilizer;
