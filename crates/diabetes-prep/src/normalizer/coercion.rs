//! Numeric coercion of feature columns.
//!
//! Coercion never fails: any value that cannot be read as a finite number
//! becomes null, and the caller decides what to do with the row.

use polars::prelude::*;

use crate::error::Result;
use crate::utils::{is_numeric_dtype, is_string_dtype, parse_numeric_string};

/// Convert `series` to a Float64 series with the same name and length.
///
/// - integer and float columns are cast;
/// - booleans map to 1.0 / 0.0;
/// - strings are trimmed and parsed;
/// - every other dtype becomes all-null.
///
/// NaN and infinite values are nulled in every case.
pub fn coerce_numeric(series: &Series) -> Result<Series> {
    let dtype = series.dtype();

    let cast_directly = is_numeric_dtype(dtype) || matches!(dtype, DataType::Boolean);

    let values: Vec<Option<f64>> = if cast_directly {
        let floats = series.cast(&DataType::Float64)?;
        floats
            .f64()?
            .into_iter()
            .map(|opt| opt.filter(|v| v.is_finite()))
            .collect()
    } else if is_string_dtype(dtype) {
        series
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(parse_numeric_string))
            .collect()
    } else {
        vec![None; series.len()]
    };

    Ok(Series::new(series.name().clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(series: &Series) -> Vec<Option<f64>> {
        series.f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_integers_are_cast() {
        let series = Series::new("Glucose".into(), &[148i64, 85, 183]);
        let coerced = coerce_numeric(&series).unwrap();
        assert_eq!(coerced.dtype(), &DataType::Float64);
        assert_eq!(coerced.name().as_str(), "Glucose");
        assert_eq!(values(&coerced), vec![Some(148.0), Some(85.0), Some(183.0)]);
    }

    #[test]
    fn test_strings_parse_or_become_null() {
        let series = Series::new(
            "BMI".into(),
            &[Some("33.6"), Some(" 26.6 "), Some("abc"), None, Some(""), Some("1,5")],
        );
        let coerced = coerce_numeric(&series).unwrap();
        assert_eq!(
            values(&coerced),
            vec![Some(33.6), Some(26.6), None, None, None, None]
        );
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        let series = Series::new(
            "Insulin".into(),
            &[Some(1.0), Some(f64::NAN), Some(f64::INFINITY), None],
        );
        let coerced = coerce_numeric(&series).unwrap();
        assert_eq!(values(&coerced), vec![Some(1.0), None, None, None]);
    }

    #[test]
    fn test_booleans_map_to_zero_one() {
        let series = Series::new("Flag".into(), &[true, false]);
        let coerced = coerce_numeric(&series).unwrap();
        assert_eq!(values(&coerced), vec![Some(1.0), Some(0.0)]);
    }

    #[test]
    fn test_unsupported_dtype_is_all_null() {
        let series = Series::new("When".into(), &[1i32, 2])
            .cast(&DataType::Date)
            .unwrap();
        let coerced = coerce_numeric(&series).unwrap();
        assert_eq!(coerced.len(), 2);
        assert_eq!(coerced.null_count(), 2);
    }
}
