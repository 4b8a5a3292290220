use polars::prelude::*;

use crate::error::{PressureError, Result};
use crate::source::require_columns;
use crate::stats::column_quantile;

/// How the volume filter decides that a region has enough activity to be
/// worth analyzing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeCutoff {
    /// Row survives iff the volume column strictly exceeds the minimum.
    Absolute(f64),
    /// Row survives iff the volume column meets or exceeds this quantile
    /// of its own distribution, computed over the full unfiltered input.
    Quantile(f64),
}

/// Minimum-volume filter over one counter column.
#[derive(Debug, Clone)]
pub struct VolumeFilter {
    pub column: String,
    pub cutoff: VolumeCutoff,
}

impl VolumeFilter {
    pub fn absolute(column: impl Into<String>, min: f64) -> Self {
        Self {
            column: column.into(),
            cutoff: VolumeCutoff::Absolute(min),
        }
    }

    pub fn quantile(column: impl Into<String>, q: f64) -> Self {
        Self {
            column: column.into(),
            cutoff: VolumeCutoff::Quantile(q),
        }
    }

    fn validate(&self) -> Result<()> {
        if let VolumeCutoff::Quantile(q) = self.cutoff {
            check_quantile(q, "volume")?;
        }
        Ok(())
    }
}

/// Heavy-region selection result: the surviving rows plus the scalar
/// cutoffs actually used, for reporting and testability. A cutoff is
/// `None` when the stage saw no defined values to take a quantile of.
#[derive(Debug, Clone)]
pub struct HeavyRegions {
    pub regions: DataFrame,
    pub volume_cutoff: Option<f64>,
    pub ratio_cutoff: Option<f64>,
}

pub(crate) fn check_quantile(q: f64, what: &str) -> Result<()> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(PressureError::InvalidConfig(format!(
            "{what} quantile {q} outside [0, 1]"
        )))
    }
}

/// Drop rows that do not clear the volume cutoff. Returns the survivors
/// and the resolved scalar cutoff.
pub fn apply_volume_filter(
    df: &DataFrame,
    filter: &VolumeFilter,
) -> Result<(DataFrame, Option<f64>)> {
    filter.validate()?;
    let column = filter.column.as_str();
    require_columns(df, &[column])?;

    match filter.cutoff {
        VolumeCutoff::Absolute(min) => {
            let kept = df
                .clone()
                .lazy()
                .filter(col(column).gt(lit(min)))
                .collect()?;
            Ok((kept, Some(min)))
        }
        VolumeCutoff::Quantile(q) => {
            let Some(cut) = column_quantile(df, column, q)? else {
                return Ok((df.clear(), None));
            };
            let kept = df
                .clone()
                .lazy()
                .filter(col(column).gt_eq(lit(cut)))
                .collect()?;
            Ok((kept, Some(cut)))
        }
    }
}

/// Among the given rows, keep those whose ratio sits at or above the
/// requested quantile of that ratio's own distribution, sorted by the
/// ratio descending. Undefined ratios take no part in the quantile and
/// never survive the selection.
pub fn select_heavy(
    df: &DataFrame,
    ratio_column: &str,
    quantile: f64,
) -> Result<(DataFrame, Option<f64>)> {
    check_quantile(quantile, "heavy-ratio")?;
    require_columns(df, &[ratio_column])?;

    let Some(cut) = column_quantile(df, ratio_column, quantile)? else {
        return Ok((df.clear(), None));
    };
    let regions = df
        .clone()
        .lazy()
        .filter(col(ratio_column).gt_eq(lit(cut)))
        .sort(
            [ratio_column],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;
    Ok((regions, Some(cut)))
}

/// The full two-stage selection: volume first, ratio quantile second.
///
/// The order is load-bearing. The ratio quantile is computed over volume
/// survivors only; running it over the raw table would let near-zero
/// volume rows shape the cutoff.
pub fn heavy_regions(
    df: &DataFrame,
    volume: &VolumeFilter,
    ratio_column: &str,
    ratio_quantile: f64,
) -> Result<HeavyRegions> {
    let (survivors, volume_cutoff) = apply_volume_filter(df, volume)?;
    let (regions, ratio_cutoff) = select_heavy(&survivors, ratio_column, ratio_quantile)?;
    Ok(HeavyRegions {
        regions,
        volume_cutoff,
        ratio_cutoff,
    })
}
