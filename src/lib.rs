//! Regional service-pressure analytics over identity-enrolment and
//! identity-update transaction records.
//!
//! The crate is one linear pipeline of pure table transforms: normalize
//! free-text region labels, roll granular records up to district or
//! state level, derive update-to-enrolment pressure ratios with explicit
//! undefined handling, apply volume and quantile thresholds, classify
//! heavy regions by dominant need, and isolate extreme-ratio outliers
//! from the bulk distribution.

pub mod aggregation;
pub mod classify;
pub mod config;
pub mod error;
pub mod normalize;
pub mod outlier;
pub mod pipeline;
pub mod rank;
pub mod ratio;
pub mod schema;
pub mod source;
pub mod stats;
pub mod threshold;

pub use aggregation::{merge_counters, roll_up, GroupKey};
pub use classify::{classify_dominant_need, DominantNeed};
pub use config::PipelineConfig;
pub use error::{PressureError, Result};
pub use normalize::{normalize_regions, StateAliases};
pub use outlier::{isolate_outliers, OutlierSplit};
pub use pipeline::{
    run_age_pressure, run_district_pressure, AgePressureReport, DistrictPressureReport,
};
pub use rank::{top_by, top_states_by_peak_ratio};
pub use ratio::{derive_age_metrics, derive_pressure_metrics, safe_ratio};
pub use source::{CsvSource, SourceLoader};
pub use threshold::{
    apply_volume_filter, heavy_regions, select_heavy, HeavyRegions, VolumeCutoff, VolumeFilter,
};
