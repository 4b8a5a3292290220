use std::collections::HashMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::region;
use crate::source::require_columns;

/// Alias corrections applied to state names after case/trim normalization.
///
/// The table is empirically derived from observed source labels and is
/// deliberately injectable: callers extend or replace it for regions the
/// default set has never seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateAliases(HashMap<String, String>);

impl Default for StateAliases {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("Westbengal".to_string(), "West Bengal".to_string());
        map.insert("Daman And Diu".to_string(), "Daman & Diu".to_string());
        map.insert(
            "Dadra And Nagar Haveli".to_string(),
            "Dadra & Nagar Haveli".to_string(),
        );
        map.insert(
            "Andaman And Nicobar Islands".to_string(),
            "A & N Islands".to_string(),
        );
        Self(map)
    }
}

impl StateAliases {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Register a correction. `from` is matched against the title-cased,
    /// trimmed state label.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.0.insert(from.into(), to.into());
    }

    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Canonicalize the free-text `state` and `district` columns.
///
/// States are trimmed, title-cased, then passed through the alias table;
/// unmapped names survive unchanged. Districts have every literal `?`
/// rewritten to `-` (source systems substitute `?` for uncommon
/// characters, e.g. the hyphen in compound district names), then get the
/// same trim/title-case treatment so typo variants collapse to one key.
///
/// Idempotent: normalizing already-normalized input is a no-op.
pub fn normalize_regions(df: &DataFrame, aliases: &StateAliases) -> Result<DataFrame> {
    require_columns(df, &[region::STATE, region::DISTRICT])?;
    let mut out = df.clone();

    let states = out.column(region::STATE)?.str()?;
    let canonical: StringChunked = states
        .into_iter()
        .map(|v| v.map(|s| canonical_state(s, aliases)))
        .collect();
    out.with_column(canonical.with_name(region::STATE.into()).into_series())?;

    let districts = out.column(region::DISTRICT)?.str()?;
    let repaired: StringChunked = districts
        .into_iter()
        .map(|v| v.map(|s| title_case(s.replace('?', "-").trim())))
        .collect();
    out.with_column(repaired.with_name(region::DISTRICT.into()).into_series())?;

    Ok(out)
}

fn canonical_state(raw: &str, aliases: &StateAliases) -> String {
    let cased = title_case(raw.trim());
    match aliases.canonical(&cased) {
        Some(fixed) => fixed.to_string(),
        None => cased,
    }
}

/// Title-case every alphabetic run: first letter uppercased, the rest
/// lowercased, word boundaries at any non-alphabetic character.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
