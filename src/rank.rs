use polars::prelude::*;

use crate::error::Result;
use crate::schema::region;
use crate::source::require_columns;

/// Top-N rows by a metric column. Rows with an undefined metric are
/// dropped before ranking — a large raw count never buys a region a
/// place in a ranking over a ratio it does not have.
pub fn top_by(df: &DataFrame, column: &str, n: usize, descending: bool) -> Result<DataFrame> {
    require_columns(df, &[column])?;

    let out = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .sort(
            [column],
            SortMultipleOptions::default().with_order_descending(descending),
        )
        .limit(n as IdxSize)
        .collect()?;
    Ok(out)
}

/// Rank states by the peak value of a district-level ratio: group to
/// state, take the maximum, keep the top N. States whose every district
/// has an undefined ratio are dropped.
pub fn top_states_by_peak_ratio(df: &DataFrame, ratio_column: &str, n: usize) -> Result<DataFrame> {
    require_columns(df, &[region::STATE, ratio_column])?;

    let out = df
        .clone()
        .lazy()
        .group_by([col(region::STATE)])
        .agg([col(ratio_column).max()])
        .filter(col(ratio_column).is_not_null())
        .sort(
            [ratio_column],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .limit(n as IdxSize)
        .collect()?;
    Ok(out)
}
