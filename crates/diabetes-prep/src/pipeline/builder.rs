//! The preparation pipeline and its builder.

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::cleaner::MissingValueCleaner;
use crate::config::{ConfigValidationError, PrepConfig};
use crate::error::Result;
use crate::loader::DataLoader;
use crate::normalizer::FeatureNormalizer;
use crate::pipeline::progress::{
    ClosureProgressReporter, PrepStage, ProgressReporter, ProgressUpdate,
};
use crate::types::PrepSummary;
use crate::writer::DatasetWriter;

/// Load → clean → normalize → write, in one synchronous pass.
///
/// Use [`PrepPipeline::builder()`] to create a pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use diabetes_prep::{PrepConfig, PrepPipeline};
///
/// let config = PrepConfig::builder()
///     .input_data("raw/")
///     .output_data("prepared/")
///     .build()?;
///
/// let summary = PrepPipeline::builder().config(config).build()?.run()?;
/// println!("wrote {} rows to {}", summary.rows_written, summary.output_path.display());
/// ```
pub struct PrepPipeline {
    config: PrepConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    loader: DataLoader,
    cleaner: MissingValueCleaner,
    normalizer: FeatureNormalizer,
    writer: DatasetWriter,
}

static_assertions::assert_impl_all!(PrepPipeline: Send, Sync);

impl PrepPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PrepPipelineBuilder {
        PrepPipelineBuilder::default()
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Run every stage and return a summary of what happened.
    ///
    /// No output file is written unless loading, cleaning and normalizing
    /// all succeed.
    pub fn run(&self) -> Result<PrepSummary> {
        match self.run_internal() {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete(
                    summary.rows_written,
                    "Pipeline completed successfully",
                ));
                Ok(summary)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<PrepSummary> {
        let start_time = Instant::now();

        let loaded = self.loader.load(&self.config.input_data)?;
        let rows_loaded = loaded.height();
        self.report_progress(ProgressUpdate::stage_done(
            PrepStage::Loading,
            rows_loaded,
            format!("Loaded {}", loaded.source.display()),
        ));

        let (df, rows_dropped_missing) = self.cleaner.drop_incomplete_rows(loaded.data)?;
        self.report_progress(ProgressUpdate::stage_done(
            PrepStage::Cleaning,
            df.height(),
            format!("Dropped {} rows with missing values", rows_dropped_missing),
        ));

        let (mut df, report) = self.normalizer.normalize(df)?;
        self.report_progress(ProgressUpdate::stage_done(
            PrepStage::Normalizing,
            df.height(),
            format!(
                "Scaled {} columns, dropped {} non-numeric rows",
                report.columns.len(),
                report.rows_dropped
            ),
        ));

        let output_path = self.writer.write(&mut df, &self.config.output_data)?;
        self.report_progress(ProgressUpdate::stage_done(
            PrepStage::Writing,
            df.height(),
            format!("Wrote {}", output_path.display()),
        ));

        let summary = PrepSummary {
            source_file: loaded.source,
            delimiter: char::from(loaded.delimiter),
            decoding: loaded.decoding,
            rows_loaded,
            rows_dropped_missing,
            rows_dropped_non_numeric: report.rows_dropped,
            scaled_columns: report.columns,
            rows_written: df.height(),
            output_path,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Prepared {} of {} rows ({} dropped) in {} ms",
            summary.rows_written,
            summary.rows_loaded,
            summary.rows_dropped(),
            summary.duration_ms
        );

        Ok(summary)
    }
}

/// Builder for [`PrepPipeline`].
#[derive(Default)]
pub struct PrepPipelineBuilder {
    config: Option<PrepConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PrepPipelineBuilder: Send);

impl PrepPipelineBuilder {
    /// Set the pipeline configuration. Required.
    pub fn config(mut self, config: PrepConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving stage updates.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns `PrepError::InvalidConfig` if no configuration was given or
    /// it is invalid.
    pub fn build(self) -> Result<PrepPipeline> {
        let config = self.config.ok_or(ConfigValidationError::MissingConfig)?;
        config.validate()?;

        Ok(PrepPipeline {
            loader: DataLoader::new(config.sniff_sample_bytes),
            cleaner: MissingValueCleaner,
            normalizer: FeatureNormalizer::new(config.feature_groups.clone()),
            writer: DatasetWriter::new(config.output_file_name.clone()),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
