use polars::prelude::*;

use crate::error::Result;

/// Linear-interpolation quantile of a numeric column.
///
/// Undefined (null) cells are skipped. Returns `None` when the column
/// has no defined values, so callers can tell "no distribution" apart
/// from a numeric cutoff.
pub fn column_quantile(df: &DataFrame, column: &str, q: f64) -> Result<Option<f64>> {
    if df.height() == 0 {
        return Ok(None);
    }
    let out = df
        .clone()
        .lazy()
        .select([col(column)
            .quantile(lit(q), QuantileMethod::Linear)
            .alias(column)])
        .collect()?;
    if out.height() == 0 {
        return Ok(None);
    }
    Ok(out.column(column)?.f64()?.get(0))
}

/// Median as the 0.5 quantile, same null handling.
pub fn column_median(df: &DataFrame, column: &str) -> Result<Option<f64>> {
    column_quantile(df, column, 0.5)
}
