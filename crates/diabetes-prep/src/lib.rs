//! Diabetes Data Preparation
//!
//! Turns a raw diabetes CSV into a training-ready one, using Polars.
//!
//! # Overview
//!
//! One linear pipeline:
//!
//! - **Loading**: resolve a file or directory to one CSV, copy it to a scratch
//!   file, detect the delimiter (`,` `;` tab `|`) and parse it, falling back to
//!   Latin-1 when the bytes are not UTF-8
//! - **Cleaning**: drop every row with a missing value
//! - **Normalizing**: find the seven health-measurement columns (accepting
//!   known alternate names), coerce them to numbers, drop rows that fail, and
//!   min-max scale each one to [0, 1]
//! - **Writing**: save `diabetes.csv` into the output directory
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diabetes_prep::{PrepConfig, PrepPipeline};
//!
//! let config = PrepConfig::builder()
//!     .input_data("data/raw")
//!     .output_data("data/prepared")
//!     .build()?;
//!
//! let summary = PrepPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| println!("{}: {}", update.stage.display_name(), update.message))
//!     .build()?
//!     .run()?;
//!
//! println!("{} rows written to {}", summary.rows_written, summary.output_path.display());
//! ```
//!
//! # Stages on their own
//!
//! Each stage is usable without the pipeline:
//!
//! ```rust,ignore
//! use diabetes_prep::{DataLoader, FeatureNormalizer, MissingValueCleaner};
//!
//! let table = DataLoader::default().load("data/raw".as_ref())?;
//! let (df, _) = MissingValueCleaner.drop_incomplete_rows(table.data)?;
//! let (df, report) = FeatureNormalizer::default().normalize(df)?;
//! println!("scaled {:?}", report.columns);
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod writer;

// Re-exports for convenient access
pub use cleaner::MissingValueCleaner;
pub use config::{
    ConfigValidationError, DEFAULT_OUTPUT_FILE_NAME, DEFAULT_SNIFF_SAMPLE_BYTES, PrepConfig,
    PrepConfigBuilder,
};
pub use error::{PrepError, Result as PrepResult, ResultExt};
pub use loader::{DataLoader, ScratchCopy, TextDecoding, detect_delimiter, resolve_input};
pub use normalizer::{
    AliasGroup, FeatureNormalizer, FeatureRange, MinMaxScaler, coerce_numeric,
    default_feature_groups, resolve_feature_columns,
};
pub use pipeline::{
    ClosureProgressReporter, PrepPipeline, PrepPipelineBuilder, PrepStage, ProgressReporter,
    ProgressUpdate,
};
pub use types::{LoadedTable, NormalizationReport, PrepSummary};
pub use writer::DatasetWriter;
