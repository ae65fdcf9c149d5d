//! HHI concentration reporting

use serde::{Deserialize, Serialize};

use crate::aggregator::{AggregationGroup, PeriodAggregator};

/// Interpretation bands follow the conventional HHI thresholds.
#[must_use]
pub fn interpret_hhi(index: f64) -> &'static str {
    if index < 0.01 {
        "Highly competitive market"
    } else if index < 0.15 {
        "Unconcentrated market"
    } else if index < 0.25 {
        "Moderately concentrated"
    } else {
        "Highly concentrated market"
    }
}

/// Largest contributor to a concentration figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGroup {
    /// Group key
    pub key: String,
    /// Share of the grand total in percent
    pub share_percentage: f64,
}

/// Concentration index with its interpretation and top contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationReport {
    /// HHI over fractional shares, in `[0, 1]`
    pub index: f64,
    /// Human-readable reading of the index
    pub interpretation: String,
    /// Number of distinct groups contributing
    pub group_count: usize,
    /// Largest contributor, when any group has a positive share
    pub top_group: Option<TopGroup>,
}

/// Builds concentration reports from grouped totals
pub struct ConcentrationAnalyzer;

impl ConcentrationAnalyzer {
    /// Concentration report over a set of grouped totals.
    #[must_use]
    pub fn report(groups: &[AggregationGroup]) -> ConcentrationReport {
        let shares = PeriodAggregator::compute_share(groups);
        let index = PeriodAggregator::compute_concentration_index(&shares);
        let top_group = shares
            .iter()
            .filter(|s| s.share_percentage > 0.0)
            .max_by(|a, b| {
                a.share_percentage
                    .partial_cmp(&b.share_percentage)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|s| TopGroup {
                key: s.key.clone(),
                share_percentage: s.share_percentage,
            });

        ConcentrationReport {
            index,
            interpretation: interpret_hhi(index).to_string(),
            group_count: shares.len(),
            top_group,
        }
    }
}
