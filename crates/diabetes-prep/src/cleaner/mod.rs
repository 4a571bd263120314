//! Missing-value cleaning.
//!
//! Rows with a null in any column are removed. There is no imputation and no
//! threshold: a single missing cell is enough to drop the row.

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Drops incomplete rows from a dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct MissingValueCleaner;

impl MissingValueCleaner {
    /// Return a copy of `df` without any row that has a null, and the number
    /// of rows removed.
    pub fn drop_incomplete_rows(&self, df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let df = df.drop_nulls::<String>(None)?;
        let dropped = before - df.height();

        debug!("clean_data: dropped {} rows with missing values", dropped);
        Ok((df, dropped))
    }
}
