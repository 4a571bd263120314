use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::TextDecoding;
use crate::normalizer::FeatureRange;

/// A parsed input table together with where and how it was read.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub data: DataFrame,
    /// The resolved CSV file (not the scratch copy).
    pub source: PathBuf,
    pub delimiter: u8,
    pub decoding: TextDecoding,
}

impl LoadedTable {
    pub fn height(&self) -> usize {
        self.data.height()
    }
}

/// Outcome of the normalization stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Source columns that were scaled, in canonical group order.
    pub columns: Vec<String>,
    /// Rows dropped because a scaled column failed numeric coercion.
    pub rows_dropped: usize,
    /// Bounds the scaler was fitted with.
    pub ranges: Vec<FeatureRange>,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepSummary {
    pub source_file: PathBuf,
    /// Delimiter character the loader settled on.
    pub delimiter: char,
    pub decoding: TextDecoding,
    pub rows_loaded: usize,
    pub rows_dropped_missing: usize,
    pub rows_dropped_non_numeric: usize,
    pub scaled_columns: Vec<String>,
    pub rows_written: usize,
    pub output_path: PathBuf,
    pub duration_ms: u64,
}

impl PrepSummary {
    /// Total rows removed across cleaning and coercion.
    pub fn rows_dropped(&self) -> usize {
        self.rows_dropped_missing + self.rows_dropped_non_numeric
    }
}
