use polars::prelude::*;

use crate::error::Result;
use crate::schema::{activity, metrics};
use crate::source::require_columns;

/// Ratio expression with explicit zero-denominator handling: the result
/// is null (undefined) unless the denominator is strictly positive.
/// Undefined cells drop out of sorts, quantiles and top-N selections
/// while the row itself survives.
pub fn safe_ratio(numerator: Expr, denominator: Expr) -> Expr {
    when(denominator.clone().gt(lit(0.0)))
        .then(numerator / denominator)
        .otherwise(lit(NULL).cast(DataType::Float64))
}

/// Derive the pressure metrics from the core counters.
///
/// Adds `total_activity`, `total_updates` and the three
/// enrolment-denominated ratios plus their sum. Rows with zero
/// enrolments keep their counters but carry undefined ratios; this
/// guards against near-zero-enrolment regions producing spuriously
/// enormous ratios downstream.
pub fn derive_pressure_metrics(df: DataFrame) -> Result<DataFrame> {
    require_columns(&df, &activity::CORE)?;

    let enrol = col(activity::TOTAL_ENROLMENTS);
    let demo = col(activity::DEMO_ACTIVITY);
    let bio = col(activity::BIO_ACTIVITY);

    let out = df
        .lazy()
        .with_columns([
            (enrol.clone() + demo.clone() + bio.clone()).alias(metrics::TOTAL_ACTIVITY),
            (demo.clone() + bio.clone()).alias(metrics::TOTAL_UPDATES),
        ])
        .with_columns([
            safe_ratio(col(metrics::TOTAL_UPDATES), enrol.clone())
                .alias(metrics::UPDATE_TO_ENROLMENT_RATIO),
            safe_ratio(bio, enrol.clone()).alias(metrics::BIO_TO_ENROL_RATIO),
            safe_ratio(demo, enrol).alias(metrics::DEMO_TO_ENROL_RATIO),
        ])
        .with_columns([(col(metrics::BIO_TO_ENROL_RATIO) + col(metrics::DEMO_TO_ENROL_RATIO))
            .alias(metrics::TOTAL_MAINTENANCE_RATIO)])
        .collect()?;
    Ok(out)
}

/// Derive the age-band metrics from age-split counters.
///
/// `age_17_plus_share` is the adult fraction of all update activity and
/// is undefined when a region recorded no update activity at all.
pub fn derive_age_metrics(df: DataFrame) -> Result<DataFrame> {
    require_columns(
        &df,
        &[
            activity::DEMO_AGE_5_17,
            activity::DEMO_AGE_17_PLUS,
            activity::BIO_AGE_5_17,
            activity::BIO_AGE_17_PLUS,
        ],
    )?;

    let out = df
        .lazy()
        .with_columns([
            (col(activity::DEMO_AGE_5_17) + col(activity::BIO_AGE_5_17))
                .alias(metrics::ACTIVITY_5_17),
            (col(activity::DEMO_AGE_17_PLUS) + col(activity::BIO_AGE_17_PLUS))
                .alias(metrics::ACTIVITY_17_PLUS),
        ])
        .with_columns([(col(metrics::ACTIVITY_5_17) + col(metrics::ACTIVITY_17_PLUS))
            .alias(metrics::TOTAL_UPDATE_ACTIVITY)])
        .with_columns([safe_ratio(
            col(metrics::ACTIVITY_17_PLUS),
            col(metrics::TOTAL_UPDATE_ACTIVITY),
        )
        .alias(metrics::AGE_17_PLUS_SHARE)])
        .collect()?;
    Ok(out)
}
