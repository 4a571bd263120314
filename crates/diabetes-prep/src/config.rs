//! Configuration types for the data preparation pipeline.
//!
//! The CLI only supplies the two paths; everything else has a fixed default
//! that matches the training job's expectations. The builder exists so tests
//! and embedding code can point the pipeline somewhere else.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::normalizer::{AliasGroup, default_feature_groups};

/// File name written inside the output directory.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "diabetes.csv";

/// Number of leading bytes inspected when detecting the delimiter.
pub const DEFAULT_SNIFF_SAMPLE_BYTES: usize = 20_000;

/// Configuration for the preparation pipeline.
///
/// Use [`PrepConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use diabetes_prep::PrepConfig;
///
/// let config = PrepConfig::builder()
///     .input_data("data/raw")
///     .output_data("data/prepared")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    /// File or directory holding the source CSV.
    pub input_data: PathBuf,

    /// Directory the prepared CSV is written into. Created if absent.
    pub output_data: PathBuf,

    /// Name of the file written inside `output_data`.
    /// Default: "diabetes.csv"
    pub output_file_name: String,

    /// Bytes read from the start of the file for delimiter detection.
    /// Default: 20 000
    pub sniff_sample_bytes: usize,

    /// Feature columns to scale, each with its accepted source names.
    /// Default: the seven Pima-style health measurements.
    pub feature_groups: Vec<AliasGroup>,
}

impl PrepConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PrepConfigBuilder {
        PrepConfigBuilder::default()
    }

    /// Full path of the file the writer produces.
    pub fn output_path(&self) -> PathBuf {
        self.output_data.join(&self.output_file_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.output_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName);
        }

        let name = Path::new(&self.output_file_name);
        if name.file_name().map(|n| n != name.as_os_str()).unwrap_or(true) {
            return Err(ConfigValidationError::NotAFileName(
                self.output_file_name.clone(),
            ));
        }

        if self.sniff_sample_bytes == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(
                self.sniff_sample_bytes,
            ));
        }

        if self.feature_groups.is_empty() {
            return Err(ConfigValidationError::NoFeatureGroups);
        }

        if let Some(group) = self.feature_groups.iter().find(|g| g.aliases.is_empty()) {
            return Err(ConfigValidationError::EmptyAliasGroup(group.canonical.clone()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("No configuration provided")]
    MissingConfig,

    #[error("Missing required path '{0}'")]
    MissingPath(&'static str),

    #[error("Output file name must not be empty")]
    EmptyFileName,

    #[error("Output file name '{0}' must be a bare file name, not a path")]
    NotAFileName(String),

    #[error("Invalid sniff sample size: {0} (must be at least 1 byte)")]
    InvalidSampleSize(usize),

    #[error("At least one feature group is required")]
    NoFeatureGroups,

    #[error("Feature group '{0}' has no aliases")]
    EmptyAliasGroup(String),
}

/// Builder for [`PrepConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PrepConfigBuilder {
    input_data: Option<PathBuf>,
    output_data: Option<PathBuf>,
    output_file_name: Option<String>,
    sniff_sample_bytes: Option<usize>,
    feature_groups: Option<Vec<AliasGroup>>,
}

impl PrepConfigBuilder {
    /// Set the input file or directory.
    pub fn input_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_data = Some(path.into());
        self
    }

    /// Set the output directory.
    pub fn output_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_data = Some(path.into());
        self
    }

    /// Override the output file name.
    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = Some(name.into());
        self
    }

    /// Override how many bytes are sampled for delimiter detection.
    pub fn sniff_sample_bytes(mut self, bytes: usize) -> Self {
        self.sniff_sample_bytes = Some(bytes);
        self
    }

    /// Replace the feature groups that get scaled.
    pub fn feature_groups(mut self, groups: Vec<AliasGroup>) -> Self {
        self.feature_groups = Some(groups);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PrepConfig` or an error if validation fails.
    pub fn build(self) -> Result<PrepConfig, ConfigValidationError> {
        let config = PrepConfig {
            input_data: self
                .input_data
                .ok_or(ConfigValidationError::MissingPath("input_data"))?,
            output_data: self
                .output_data
                .ok_or(ConfigValidationError::MissingPath("output_data"))?,
            output_file_name: self
                .output_file_name
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE_NAME.to_string()),
            sniff_sample_bytes: self.sniff_sample_bytes.unwrap_or(DEFAULT_SNIFF_SAMPLE_BYTES),
            feature_groups: self.feature_groups.unwrap_or_else(default_feature_groups),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> PrepConfigBuilder {
        PrepConfig::builder()
            .input_data("in")
            .output_data("out")
    }

    #[test]
    fn test_builder_defaults() {
        let config = base_builder().build().unwrap();
        assert_eq!(config.output_file_name, "diabetes.csv");
        assert_eq!(config.sniff_sample_bytes, 20_000);
        assert_eq!(config.feature_groups.len(), 7);
        assert_eq!(config.output_path(), PathBuf::from("out").join("diabetes.csv"));
    }

    #[test]
    fn test_builder_requires_paths() {
        let result = PrepConfig::builder().output_data("out").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::MissingPath("input_data")
        ));

        let result = PrepConfig::builder().input_data("in").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::MissingPath("output_data")
        ));
    }

    #[test]
    fn test_validation_rejects_zero_sample() {
        let result = base_builder().sniff_sample_bytes(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSampleSize(0)
        ));
    }

    #[test]
    fn test_validation_rejects_bad_file_names() {
        assert!(matches!(
            base_builder().output_file_name("  ").build().unwrap_err(),
            ConfigValidationError::EmptyFileName
        ));
        assert!(matches!(
            base_builder().output_file_name("nested/out.csv").build().unwrap_err(),
            ConfigValidationError::NotAFileName(_)
        ));
    }

    #[test]
    fn test_validation_rejects_empty_groups() {
        assert!(matches!(
            base_builder().feature_groups(vec![]).build().unwrap_err(),
            ConfigValidationError::NoFeatureGroups
        ));

        let groups = vec![AliasGroup::new("Glucose", Vec::<String>::new())];
        assert!(matches!(
            base_builder().feature_groups(groups).build().unwrap_err(),
            ConfigValidationError::EmptyAliasGroup(name) if name == "Glucose"
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_data": "raw",
            "output_data": "prepared",
            "output_file_name": "train.csv",
            "sniff_sample_bytes": 4096,
            "feature_groups": [
                { "canonical": "Glucose", "aliases": ["Glucose", "PlasmaGlucose"] }
            ]
        }"#;

        let config: PrepConfig = serde_json::from_str(json).expect("Should deserialize");
        config.validate().unwrap();
        assert_eq!(config.output_file_name, "train.csv");
        assert_eq!(config.sniff_sample_bytes, 4096);
        assert_eq!(config.feature_groups[0].aliases[1], "PlasmaGlucose");
    }
}
