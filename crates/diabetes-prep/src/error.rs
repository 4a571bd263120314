//! Error types for the data preparation pipeline.
//!
//! Every stage reports failures through [`PrepError`]. Errors are raised where
//! they are detected and propagated unchanged to the caller; nothing in the
//! pipeline swallows or retries them.
//!
//! Errors serialize as `{ code, message }` so a caller can hand them to other
//! tooling without matching on the enum.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the preparation pipeline.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Input path does not exist, or a directory holds no CSV file.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The source file could not be parsed as delimited text.
    #[error("Failed to parse input: {0}")]
    Parse(String),

    /// None of the expected feature columns were present.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No rows remain to compute scaling bounds for a column.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PrepError>,
    },
}

impl PrepError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PrepError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, independent of the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Strip any context wrappers and return the underlying error.
    pub fn root(&self) -> &PrepError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this error is a missing input.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Check if this error is a feature-column validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::Validation(_))
    }
}

impl From<ConfigValidationError> for PrepError {
    fn from(err: ConfigValidationError) -> Self {
        PrepError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for PrepError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PrepError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PrepError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PrepError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            PrepError::NotFound("data/".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            PrepError::Validation("no columns".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(PrepError::Parse("bad".to_string()).error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_error_serialization() {
        let error = PrepError::NoValidValues("BMI".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("NO_VALID_VALUES"));
        assert!(json.contains("BMI"));
    }

    #[test]
    fn test_with_context_preserves_code() {
        let error = PrepError::NotFound("input.csv".to_string()).with_context("Loading input");
        assert!(error.to_string().contains("Loading input"));
        assert_eq!(error.error_code(), "NOT_FOUND");
        assert!(error.is_not_found());
        assert!(!error.is_validation());
    }

    #[test]
    fn test_io_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("Copying input").unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.to_string().starts_with("Copying input"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: PrepError = ConfigValidationError::EmptyFileName.into();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
