//! Pipeline module.
//!
//! This module provides the preparation pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{PrepPipeline, PrepPipelineBuilder};
pub use progress::{ClosureProgressReporter, PrepStage, ProgressReporter, ProgressUpdate};
