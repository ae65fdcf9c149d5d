//! Period aggregation primitives
//!
//! The single pass that turns a flat `TradeRecord` slice into chart-ready
//! groups, growth series, shares, and a concentration index.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use services_common::{Dimension, Period, TradeRecord};

/// Sum and count of the records mapped to one grouping key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationGroup {
    /// Distinguishing value of the group (a period, counterparty, or commodity)
    pub key: String,
    /// Sum of record values in millions of USD
    pub total: f64,
    /// Number of contributing records
    pub count: usize,
}

/// One entry of a period-over-period growth series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// Quarter label
    pub period: String,
    /// Total for the quarter
    pub value: f64,
    /// Absolute change against the previous quarter
    pub growth_amount: f64,
    /// Percent change against the previous quarter; zero when there is no
    /// predecessor or the predecessor total is zero
    pub growth_rate: f64,
    /// Whether the move is non-negative
    pub is_positive_growth: bool,
}

/// Share of the grand total held by one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePoint {
    /// Group key
    pub key: String,
    /// Group total in millions of USD
    pub total: f64,
    /// Share of the grand total in percent; zero when the grand total is zero
    pub share_percentage: f64,
}

/// Grouping, ordering, and derived-metric operations over trade records
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Group records along a dimension and sum their values.
    ///
    /// Empty grouping fields land in the `"Unknown"` bucket; non-finite
    /// values contribute zero. Output order is unspecified.
    #[must_use]
    pub fn group_and_sum(records: &[TradeRecord], dimension: Dimension) -> Vec<AggregationGroup> {
        let mut buckets: FxHashMap<&str, (f64, usize)> = FxHashMap::default();
        for record in records {
            let value = if record.value.is_finite() { record.value } else { 0.0 };
            let entry = buckets.entry(record.key_for(dimension)).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
        buckets
            .into_iter()
            .map(|(key, (total, count))| AggregationGroup {
                key: key.to_string(),
                total,
                count,
            })
            .collect()
    }

    /// Order groups whose keys are quarter labels ascending by (year, quarter).
    ///
    /// Labels that do not parse as `YYYYQn` sort before everything else.
    pub fn sort_by_period(groups: &mut [AggregationGroup]) {
        groups.sort_by_key(|group| Period::sort_key(&group.key));
    }

    /// Order groups by total descending and keep the first `limit` entries.
    ///
    /// A zero limit yields an empty result; a limit beyond the group count
    /// returns all groups.
    #[must_use]
    pub fn sort_by_value_descending(
        mut groups: Vec<AggregationGroup>,
        limit: usize,
    ) -> Vec<AggregationGroup> {
        groups.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        groups.truncate(limit);
        groups
    }

    /// Period-over-period growth for an already period-sorted series.
    ///
    /// The first entry has no predecessor and reports zero growth, treated
    /// as non-negative by convention.
    #[must_use]
    pub fn compute_growth_series(sorted_groups: &[AggregationGroup]) -> Vec<GrowthPoint> {
        sorted_groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                if i == 0 {
                    GrowthPoint {
                        period: group.key.clone(),
                        value: group.total,
                        growth_amount: 0.0,
                        growth_rate: 0.0,
                        is_positive_growth: true,
                    }
                } else {
                    let previous = sorted_groups[i - 1].total;
                    let growth_amount = group.total - previous;
                    let growth_rate = if previous == 0.0 {
                        0.0
                    } else {
                        growth_amount / previous * 100.0
                    };
                    GrowthPoint {
                        period: group.key.clone(),
                        value: group.total,
                        growth_amount,
                        growth_rate,
                        is_positive_growth: growth_rate >= 0.0,
                    }
                }
            })
            .collect()
    }

    /// Percentage share of the grand total for every group.
    ///
    /// A zero grand total makes every share zero.
    #[must_use]
    pub fn compute_share(groups: &[AggregationGroup]) -> Vec<SharePoint> {
        let grand_total: f64 = groups.iter().map(|g| g.total).sum();
        groups
            .iter()
            .map(|g| SharePoint {
                key: g.key.clone(),
                total: g.total,
                share_percentage: if grand_total == 0.0 {
                    0.0
                } else {
                    g.total / grand_total * 100.0
                },
            })
            .collect()
    }

    /// Herfindahl-Hirschman concentration index over a share vector.
    ///
    /// Sum of squared fractional shares, in `[0, 1]`; higher values mean
    /// the total is concentrated among fewer groups.
    #[must_use]
    pub fn compute_concentration_index(shares: &[SharePoint]) -> f64 {
        shares
            .iter()
            .map(|s| (s.share_percentage / 100.0).powi(2))
            .sum()
    }
}
