use std::fmt;

use polars::prelude::*;

use crate::error::Result;
use crate::schema::{metrics, need};
use crate::source::require_columns;

/// Dominant operational need of a heavy region: which update channel
/// drives the larger share of its maintenance load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantNeed {
    /// Biometric updates dominate (capture hardware pressure).
    BioHeavy,
    /// Demographic updates dominate (data-entry pressure).
    DemoHeavy,
}

impl DominantNeed {
    /// The per-row rule: bio-heavy only on a strictly greater biometric
    /// ratio; ties resolve to demo-heavy.
    pub fn from_ratios(bio_to_enrol: f64, demo_to_enrol: f64) -> Self {
        if bio_to_enrol > demo_to_enrol {
            DominantNeed::BioHeavy
        } else {
            DominantNeed::DemoHeavy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DominantNeed::BioHeavy => need::BIO_HEAVY,
            DominantNeed::DemoHeavy => need::DEMO_HEAVY,
        }
    }
}

impl fmt::Display for DominantNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append the `dominant_need` label column.
///
/// Pure per-row classification with no dependence on other rows. Rows
/// whose channel ratios are undefined fall into the demo-heavy branch,
/// same as a tie.
pub fn classify_dominant_need(df: DataFrame) -> Result<DataFrame> {
    require_columns(
        &df,
        &[metrics::BIO_TO_ENROL_RATIO, metrics::DEMO_TO_ENROL_RATIO],
    )?;

    let out = df
        .lazy()
        .with_columns([when(
            col(metrics::BIO_TO_ENROL_RATIO).gt(col(metrics::DEMO_TO_ENROL_RATIO)),
        )
        .then(lit(need::BIO_HEAVY))
        .otherwise(lit(need::DEMO_HEAVY))
        .alias(metrics::DOMINANT_NEED)])
        .collect()?;
    Ok(out)
}
