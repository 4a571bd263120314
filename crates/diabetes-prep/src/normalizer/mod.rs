//! Feature normalization.
//!
//! Steps, in order:
//! 1. resolve which source column holds each canonical feature;
//! 2. coerce those columns to Float64 (unparseable values become null);
//! 3. drop rows with a null in any of them;
//! 4. min-max scale each one independently to [0, 1].
//!
//! Columns outside the feature groups pass through unchanged.

mod aliases;
mod coercion;
mod scaler;

pub use aliases::{AliasGroup, default_feature_groups, resolve_feature_columns};
pub use coercion::coerce_numeric;
pub use scaler::{FeatureRange, MinMaxScaler};

use polars::prelude::*;
use tracing::debug;

use crate::error::{PrepError, Result};
use crate::types::NormalizationReport;

/// Scales the canonical feature columns of a dataset.
#[derive(Debug, Clone)]
pub struct FeatureNormalizer {
    groups: Vec<AliasGroup>,
}

impl Default for FeatureNormalizer {
    fn default() -> Self {
        Self::new(default_feature_groups())
    }
}

impl FeatureNormalizer {
    pub fn new(groups: Vec<AliasGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }

    pub fn normalize(&self, mut df: DataFrame) -> Result<(DataFrame, NormalizationReport)> {
        let columns = resolve_feature_columns(&df, &self.groups);
        if columns.is_empty() {
            return Err(PrepError::Validation(
                "None of the expected numeric columns were found to scale".to_string(),
            ));
        }

        for name in &columns {
            let coerced = coerce_numeric(df.column(name)?.as_materialized_series())?;
            df.replace(name, coerced)?;
        }

        let before = df.height();
        df = df.drop_nulls(Some(columns.as_slice()))?;
        let rows_dropped = before - df.height();
        debug!(
            "normalize_data: coerced to numeric; dropped {} rows with non-numeric values in {:?}",
            rows_dropped, columns
        );

        let scaler = MinMaxScaler::fit(&df, &columns)?;
        scaler.transform(&mut df)?;
        debug!("normalized columns: {:?}", columns);

        Ok((
            df,
            NormalizationReport {
                columns,
                rows_dropped,
                ranges: scaler.into_ranges(),
            },
        ))
    }
}
