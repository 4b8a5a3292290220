use polars::prelude::*;

use crate::error::Result;
use crate::source::require_columns;

/// Partition of a ratio-derived table around a fixed cutoff.
///
/// `extreme` holds rows whose ratio strictly exceeds the cutoff;
/// `normal` holds everything else, including rows with an undefined
/// ratio, so the two partitions are disjoint and cover the input.
/// Extreme rows are reported separately and never take part in ranked
/// views computed over `normal`.
#[derive(Debug, Clone)]
pub struct OutlierSplit {
    pub normal: DataFrame,
    pub extreme: DataFrame,
}

pub fn isolate_outliers(
    df: &DataFrame,
    ratio_column: &str,
    cutoff: f64,
) -> Result<OutlierSplit> {
    require_columns(df, &[ratio_column])?;

    let extreme = df
        .clone()
        .lazy()
        .filter(col(ratio_column).gt(lit(cutoff)))
        .collect()?;
    let normal = df
        .clone()
        .lazy()
        .filter(
            col(ratio_column)
                .lt_eq(lit(cutoff))
                .or(col(ratio_column).is_null()),
        )
        .collect()?;

    Ok(OutlierSplit { normal, extreme })
}
