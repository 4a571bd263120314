//! Input loading.
//!
//! Resolves the input path to a single CSV file, copies it to a scratch file,
//! detects the delimiter from a bounded prefix and parses the whole copy into
//! a DataFrame. The scratch file is removed when loading returns, on success
//! and on failure alike.

mod decoding;
mod sniffer;

pub use decoding::TextDecoding;
pub use sniffer::{
    CANDIDATE_DELIMITERS, ConsistencySniffer, DEFAULT_DELIMITER, DelimiterDetector,
    detect_delimiter, detect_with,
};

use polars::prelude::*;
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::DEFAULT_SNIFF_SAMPLE_BYTES;
use crate::error::{PrepError, Result, ResultExt};
use crate::types::LoadedTable;
use crate::utils::{MISSING_MARKERS, delimiter_name};

/// Resolve an input path to the CSV file that should be read.
///
/// A file is returned as is. For a directory, the lexicographically first
/// regular file with a `.csv` extension is chosen.
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if !path.is_dir() {
        return Err(PrepError::NotFound(format!(
            "Input path does not exist: {}",
            path.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(path).context(format!("Listing {}", path.display()))? {
        let candidate = entry.context(format!("Listing {}", path.display()))?.path();
        if candidate.is_file() && candidate.extension().is_some_and(|ext| ext == "csv") {
            candidates.push(candidate);
        }
    }
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        PrepError::NotFound(format!("No CSV files in: {}", path.display()))
    })
}

/// File name prefix of scratch copies.
pub const SCRATCH_PREFIX: &str = "diabetes-prep-";

/// A private copy of the input file, deleted when dropped.
#[derive(Debug)]
pub struct ScratchCopy {
    file: NamedTempFile,
}

impl ScratchCopy {
    /// Copy `source` into a fresh file in the system temp directory.
    pub fn create(source: &Path) -> Result<Self> {
        Self::create_in(source, &std::env::temp_dir())
    }

    /// Copy `source` into a fresh file inside `dir`.
    pub fn create_in(source: &Path, dir: &Path) -> Result<Self> {
        let suffix = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_else(|| ".csv".to_string());

        let file = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)
            .context("Creating scratch file")?;

        let copied = fs::copy(source, file.path())
            .context(format!("Copying {} to scratch", source.display()))?;
        debug!("Copied {} bytes to {}", copied, file.path().display());

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read at most `limit` bytes from the start of the copy.
    pub fn read_prefix(&self, limit: usize) -> Result<Vec<u8>> {
        let mut sample = Vec::with_capacity(limit.min(64 * 1024));
        File::open(self.path())
            .context("Opening scratch file")?
            .take(limit as u64)
            .read_to_end(&mut sample)
            .context("Reading delimiter sample")?;
        Ok(sample)
    }

    pub fn read_all(&self) -> Result<Vec<u8>> {
        fs::read(self.path()).context("Reading scratch file")
    }
}

/// Loads the input CSV into a DataFrame.
#[derive(Debug, Clone)]
pub struct DataLoader {
    sniff_sample_bytes: usize,
    scratch_dir: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(DEFAULT_SNIFF_SAMPLE_BYTES)
    }
}

impl DataLoader {
    pub fn new(sniff_sample_bytes: usize) -> Self {
        Self {
            sniff_sample_bytes,
            scratch_dir: None,
        }
    }

    /// Put scratch copies in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Resolve, copy, sniff and parse `path`.
    pub fn load(&self, path: &Path) -> Result<LoadedTable> {
        let source = resolve_input(path)?;
        debug!("Resolved input file: {}", source.display());

        let scratch = match &self.scratch_dir {
            Some(dir) => ScratchCopy::create_in(&source, dir)?,
            None => ScratchCopy::create(&source)?,
        };

        let sample = scratch.read_prefix(self.sniff_sample_bytes)?;
        let delimiter = detect_delimiter(&String::from_utf8_lossy(&sample));

        let bytes = scratch.read_all()?;
        let (data, decoding) = parse_with_fallbacks(&bytes, delimiter)
            .context(format!("Parsing {}", source.display()))?;

        info!("Preparing {} rows of data", data.height());
        debug!(
            "Parsed {} columns using {} delimiter and {} decoding",
            data.width(),
            delimiter_name(delimiter),
            decoding.label()
        );

        Ok(LoadedTable {
            data,
            source,
            delimiter,
            decoding,
        })
    }
}

/// Try each decoding in [`TextDecoding::CHAIN`] until one yields text, then
/// parse that text. Only a decoding failure moves on to the next entry.
pub fn parse_with_fallbacks(bytes: &[u8], delimiter: u8) -> Result<(DataFrame, TextDecoding)> {
    for decoding in TextDecoding::CHAIN {
        let Some(text) = decoding.decode(bytes) else {
            debug!("Input is not valid {}, trying next decoding", decoding.label());
            continue;
        };
        let df = parse_table(text.into_owned(), delimiter)?;
        return Ok((df, decoding));
    }

    Err(PrepError::Parse(
        "input is not valid text under any supported encoding".to_string(),
    ))
}

/// Remove lines that are empty or whitespace-only, outside quoted fields.
fn strip_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;

    for line in text.split_inclusive('\n') {
        let blank = line.trim().is_empty();
        if in_quotes || !blank {
            out.push_str(line);
        }
        if line.bytes().filter(|&b| b == b'"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }

    out
}

/// Parse delimited text with a header row.
///
/// Every column is read as text. Feature columns are converted later by the
/// normalizer; the rest are written back exactly as they were read. Blank
/// lines are skipped.
pub fn parse_table(text: String, delimiter: u8) -> Result<DataFrame> {
    let text = strip_blank_lines(&text);

    let null_values: Vec<PlSmallStr> = MISSING_MARKERS
        .iter()
        .filter(|marker| !marker.is_empty())
        .map(|marker| (*marker).into())
        .collect();

    let parse_options = CsvParseOptions::default()
        .with_separator(delimiter)
        .with_quote_char(Some(b'"'))
        .with_missing_is_null(true)
        .with_null_values(Some(NullValues::AllColumns(null_values)));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(text))
        .finish()
        .map_err(|e| PrepError::Parse(e.to_string()))
}
