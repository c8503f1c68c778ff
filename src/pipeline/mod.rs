// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
pub mod progress;

pub use orchestrator::RetrievalPipeline;
pub use progress::{ProgressTracker, RetrievalStats};
