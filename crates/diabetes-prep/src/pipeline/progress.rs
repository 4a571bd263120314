//! Progress reporting for the preparation pipeline.
//!
//! Each stage emits one [`ProgressUpdate`] when it finishes, carrying the row
//! count it produced. Callers that only need console output can ignore this;
//! the pipeline also logs every stage through `tracing`.
//!
//! # Example
//!
//! ```rust,ignore
//! use diabetes_prep::PrepPipeline;
//!
//! let summary = PrepPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         let stage = update.stage.display_name();
//!         println!("[{}] {} ({:?} rows)", stage, update.message, update.rows);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the preparation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepStage {
    /// Resolving, copying and parsing the input file
    Loading,
    /// Dropping rows with missing values
    Cleaning,
    /// Coercing and scaling feature columns
    Normalizing,
    /// Writing the output CSV
    Writing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl PrepStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Cleaning => "Cleaning Data",
            Self::Normalizing => "Normalizing Features",
            Self::Writing => "Writing Output",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }
}

/// A progress event emitted by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: PrepStage,

    /// Human-readable message describing what happened
    pub message: String,

    /// Rows in the table after this stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

impl ProgressUpdate {
    /// An update for a finished stage with its resulting row count.
    pub fn stage_done(stage: PrepStage, rows: usize, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            rows: Some(rows),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(rows: usize, message: impl Into<String>) -> Self {
        Self::stage_done(PrepStage::Complete, rows, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: PrepStage::Failed,
            message: message.into(),
            rows: None,
        }
    }
}

/// Trait for receiving progress updates.
///
/// Implementations must be `Send + Sync` so a pipeline can be moved to a
/// worker thread together with its reporter.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
