//! Min-max scaling to [0, 1].

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Observed bounds of one column at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    /// Map `value` into [0, 1] relative to this range.
    ///
    /// A zero-width range maps every value to 0.0. Ranges wider than
    /// `f64::MAX` are computed on halved operands.
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else if span.is_finite() {
            (value - self.min) / span
        } else {
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        }
    }
}

/// Per-column min-max scaler. Fitted and applied within a single run.
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    ranges: Vec<FeatureRange>,
}

impl MinMaxScaler {
    /// Record min and max of each named Float64 column.
    ///
    /// Fails with `NoValidValues` if a column has no non-null value.
    pub fn fit(df: &DataFrame, columns: &[String]) -> Result<Self> {
        let mut ranges = Vec::with_capacity(columns.len());

        for name in columns {
            let series = df.column(name)?.as_materialized_series();
            let values = series.f64()?;
            let (Some(min), Some(max)) = (values.min(), values.max()) else {
                return Err(PrepError::NoValidValues(name.clone()));
            };
            ranges.push(FeatureRange {
                column: name.clone(),
                min,
                max,
            });
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[FeatureRange] {
        &self.ranges
    }

    /// Replace each fitted column in `df` with its scaled values.
    pub fn transform(&self, df: &mut DataFrame) -> Result<()> {
        for range in &self.ranges {
            let series = df.column(&range.column)?.as_materialized_series();
            let scaled: Float64Chunked = series
                .f64()?
                .apply_values(|value| range.scale(value))
                .with_name(range.column.as_str().into());
            df.replace(&range.column, scaled.into_series())?;
        }
        Ok(())
    }

    pub fn into_ranges(self) -> Vec<FeatureRange> {
        self.ranges
    }
}
