use std::collections::HashSet;

use polars::prelude::*;

use crate::error::Result;
use crate::schema::region;
use crate::source::require_columns;

/// Target granularity for a roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    StateDistrict,
    State,
}

impl GroupKey {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            GroupKey::StateDistrict => &[region::STATE, region::DISTRICT],
            GroupKey::State => &[region::STATE],
        }
    }
}

/// Roll granular records up to the target key, summing every counter
/// column within each group.
///
/// One output row per distinct key; counter names are preserved.
/// Duplicate source keys are valid input and are summed, not rejected.
/// Associative: pincode → district → state equals pincode → state.
pub fn roll_up(df: &DataFrame, key: GroupKey, counters: &[&str]) -> Result<DataFrame> {
    let mut required: Vec<&str> = key.columns().to_vec();
    required.extend_from_slice(counters);
    require_columns(df, &required)?;

    let keys: Vec<Expr> = key.columns().iter().map(|c| col(*c)).collect();
    let sums: Vec<Expr> = counters.iter().map(|c| col(*c).sum()).collect();

    let out = df.clone().lazy().group_by(keys).agg(sums).collect()?;
    Ok(out)
}

/// Combine two counter tables on a shared key.
///
/// Keys present on only one side survive with the other side's counters
/// filled as zero — a record with no join partner contributes zeros
/// rather than disappearing. Counter column names must be disjoint
/// between the two tables.
pub fn merge_counters(left: &DataFrame, right: &DataFrame, key: GroupKey) -> Result<DataFrame> {
    require_columns(left, key.columns())?;
    require_columns(right, key.columns())?;

    let key_cols = key.columns();
    let key_exprs: Vec<Expr> = key_cols.iter().map(|c| col(*c)).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let counter_fills: Vec<Expr> = left
        .get_column_names_str()
        .into_iter()
        .chain(right.get_column_names_str())
        .filter(|c| !key_cols.contains(c) && seen.insert(*c))
        .map(|c| col(c).fill_null(lit(0.0)))
        .collect();

    let out = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            key_exprs.clone(),
            key_exprs,
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .with_columns(counter_fills)
        .collect()?;
    Ok(out)
}
