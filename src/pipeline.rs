use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::aggregation::{merge_counters, roll_up, GroupKey};
use crate::classify::classify_dominant_need;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::normalize::normalize_regions;
use crate::outlier::{isolate_outliers, OutlierSplit};
use crate::rank::{top_by, top_states_by_peak_ratio};
use crate::ratio::{derive_age_metrics, derive_pressure_metrics};
use crate::schema::{activity, metrics};
use crate::stats::column_median;
use crate::threshold::{apply_volume_filter, select_heavy, VolumeFilter};

/// District-level update-pressure analysis.
#[derive(Debug, Clone)]
pub struct DistrictPressureReport {
    /// Volume-surviving districts with every derived metric attached.
    pub regions: DataFrame,
    pub volume_cutoff: Option<f64>,
    /// Heavy districts, classified by dominant need, maintenance ratio
    /// descending.
    pub heavy: DataFrame,
    pub heavy_cutoff: Option<f64>,
    /// Normal/extreme split of `regions` by update-to-enrolment ratio.
    pub outliers: OutlierSplit,
    /// Worst extreme outliers, ratio descending.
    pub top_outliers: DataFrame,
    /// States ranked by their peak district ratio, extreme rows excluded.
    pub leading_states: DataFrame,
}

/// Age-band service-pressure analysis.
#[derive(Debug, Clone)]
pub struct AgePressureReport {
    /// Volume-surviving districts with age metrics attached.
    pub regions: DataFrame,
    pub volume_cutoff: Option<f64>,
    /// Districts with the highest adult share of update activity.
    pub adult_heavy: DataFrame,
    /// Districts with the lowest adult share (child-driven demand).
    pub child_heavy: DataFrame,
    /// Reference point for the share distribution over `regions`.
    pub median_share: Option<f64>,
}

/// Run the district pressure pipeline over pincode-level records.
///
/// Stages, in order: normalize labels, roll up to (state, district),
/// derive ratios, volume-filter, select and classify heavy districts,
/// split outliers, rank. Each stage consumes one immutable frame and
/// produces a new one.
pub fn run_district_pressure(
    records: &DataFrame,
    cfg: &PipelineConfig,
) -> Result<DistrictPressureReport> {
    cfg.validate()?;
    debug!(rows = records.height(), "district pressure: input records");

    let normalized = normalize_regions(records, &cfg.state_aliases)?;
    let districts = roll_up(&normalized, GroupKey::StateDistrict, &activity::CORE)?;
    let with_metrics = derive_pressure_metrics(districts)?;

    let volume = VolumeFilter::absolute(metrics::TOTAL_ACTIVITY, cfg.volume_threshold);
    let (regions, volume_cutoff) = apply_volume_filter(&with_metrics, &volume)?;
    debug!(
        districts = with_metrics.height(),
        surviving = regions.height(),
        "district pressure: volume filter"
    );

    let (heavy, heavy_cutoff) =
        select_heavy(&regions, metrics::TOTAL_MAINTENANCE_RATIO, cfg.heavy_quantile)?;
    let heavy = classify_dominant_need(heavy)?;

    let outliers = isolate_outliers(&regions, metrics::UPDATE_TO_ENROLMENT_RATIO, cfg.outlier_cutoff)?;
    let top_outliers = top_by(
        &outliers.extreme,
        metrics::UPDATE_TO_ENROLMENT_RATIO,
        cfg.top_outliers,
        true,
    )?;
    let leading_states = top_states_by_peak_ratio(
        &outliers.normal,
        metrics::UPDATE_TO_ENROLMENT_RATIO,
        cfg.top_states,
    )?;

    info!(
        regions = regions.height(),
        heavy = heavy.height(),
        extreme = outliers.extreme.height(),
        volume_cutoff,
        heavy_cutoff,
        "district pressure: report ready"
    );

    Ok(DistrictPressureReport {
        regions,
        volume_cutoff,
        heavy,
        heavy_cutoff,
        outliers,
        top_outliers,
        leading_states,
    })
}

/// Run the age pressure pipeline over the two age-split record tables.
///
/// Demo and bio activity are normalized and rolled up independently,
/// merged with zero-fill on (state, district), and reduced to the adult
/// activity share. The volume floor here is a quantile of the merged
/// update activity rather than a fixed count.
pub fn run_age_pressure(
    demo_records: &DataFrame,
    bio_records: &DataFrame,
    cfg: &PipelineConfig,
) -> Result<AgePressureReport> {
    cfg.validate()?;
    debug!(
        demo_rows = demo_records.height(),
        bio_rows = bio_records.height(),
        "age pressure: input records"
    );

    let demo = normalize_regions(demo_records, &cfg.state_aliases)?;
    let bio = normalize_regions(bio_records, &cfg.state_aliases)?;

    let demo = roll_up(&demo, GroupKey::StateDistrict, &activity::DEMO_AGE_SPLIT)?;
    let bio = roll_up(&bio, GroupKey::StateDistrict, &activity::BIO_AGE_SPLIT)?;
    let merged = merge_counters(&demo, &bio, GroupKey::StateDistrict)?;
    let with_metrics = derive_age_metrics(merged)?;

    let volume = VolumeFilter::quantile(metrics::TOTAL_UPDATE_ACTIVITY, cfg.volume_quantile);
    let (regions, volume_cutoff) = apply_volume_filter(&with_metrics, &volume)?;
    debug!(
        districts = with_metrics.height(),
        surviving = regions.height(),
        "age pressure: volume filter"
    );

    let adult_heavy = top_by(&regions, metrics::AGE_17_PLUS_SHARE, cfg.top_regions, true)?;
    let child_heavy = top_by(&regions, metrics::AGE_17_PLUS_SHARE, cfg.top_regions, false)?;
    let median_share = column_median(&regions, metrics::AGE_17_PLUS_SHARE)?;

    info!(
        regions = regions.height(),
        volume_cutoff,
        median_share,
        "age pressure: report ready"
    );

    Ok(AgePressureReport {
        regions,
        volume_cutoff,
        adult_heavy,
        child_heavy,
        median_share,
    })
}
