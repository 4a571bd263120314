//! Output writing.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::DEFAULT_OUTPUT_FILE_NAME;
use crate::error::{Result, ResultExt};

/// Writes the prepared dataset as CSV.
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    file_name: String,
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_FILE_NAME)
    }
}

impl DatasetWriter {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Write `df` to `<output_dir>/<file_name>`, creating the directory and
    /// replacing any existing file. Returns the written path.
    pub fn write(&self, df: &mut DataFrame, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .context(format!("Creating output directory {}", output_dir.display()))?;

        let output_path = output_dir.join(&self.file_name);
        let mut file = File::create(&output_path)
            .context(format!("Creating {}", output_path.display()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)?;

        info!("wrote: {} rows={}", output_path.display(), df.height());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("prepared").join("v1");
        let mut df = df![
            "Glucose" => [0.0, 1.0],
            "Outcome" => [1, 0],
        ]
        .unwrap();

        let path = DatasetWriter::default().write(&mut df, &out_dir).unwrap();
        assert_eq!(path, out_dir.join("diabetes.csv"));

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("Glucose,Outcome"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("diabetes.csv"), "stale\nstale\nstale\nstale\n").unwrap();

        let mut df = df!["BMI" => [0.5]].unwrap();
        let path = DatasetWriter::default().write(&mut df, dir.path()).unwrap();

        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["BMI", "0.5"]);
    }

    #[test]
    fn test_write_quotes_fields_with_commas() {
        let dir = tempdir().unwrap();
        let mut df = df![
            "Name" => ["Smith, J"],
            "BMI" => [1.0],
        ]
        .unwrap();

        let path = DatasetWriter::new("out.csv").write(&mut df, dir.path()).unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("\"Smith, J\""));
    }
}
