use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize::StateAliases;
use crate::threshold::check_quantile;

/// Tunables for the pressure pipelines. Every field has a default, so a
/// partial TOML table (or an empty one) deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum `total_activity` a district must strictly exceed to be
    /// analyzed at all.
    pub volume_threshold: f64,
    /// Quantile-based volume floor used by the age analysis.
    pub volume_quantile: f64,
    /// Quantile of the maintenance ratio above which a region counts as
    /// heavy.
    pub heavy_quantile: f64,
    /// Fixed update-to-enrolment ratio beyond which a region is an
    /// extreme outlier.
    pub outlier_cutoff: f64,
    pub top_states: usize,
    pub top_regions: usize,
    pub top_outliers: usize,
    pub state_aliases: StateAliases,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            volume_threshold: 1000.0,
            volume_quantile: 0.75,
            heavy_quantile: 0.90,
            outlier_cutoff: 150.0,
            top_states: 20,
            top_regions: 10,
            top_outliers: 5,
            state_aliases: StateAliases::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        check_quantile(self.volume_quantile, "volume")?;
        check_quantile(self.heavy_quantile, "heavy-ratio")?;
        Ok(())
    }
}
