//! Supplemental growth figures layered on the core series
//!
//! Year-over-year comparisons, annualized CAGR, and the insight sentences
//! that feed the narrator.

use serde::{Deserialize, Serialize};
use services_common::{GROWTH_INSIGHT_THRESHOLD_PCT, Period, QUARTERS_PER_YEAR};

use crate::aggregator::{AggregationGroup, PeriodAggregator};

/// One year-over-year comparison point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoyPoint {
    /// Quarter label
    pub period: String,
    /// Total for the quarter
    pub value: f64,
    /// Percent change against the same quarter one year earlier
    pub growth_rate: f64,
}

/// Year-over-year, CAGR, and insight calculations over period-sorted groups
pub struct GrowthAnalyzer;

impl GrowthAnalyzer {
    /// Year-over-year growth for a period-sorted series.
    ///
    /// Quarters without a same-quarter predecessor in the series, or whose
    /// predecessor total is zero, are omitted from the output.
    #[must_use]
    pub fn yoy_growth(sorted_groups: &[AggregationGroup]) -> Vec<YoyPoint> {
        sorted_groups
            .iter()
            .filter_map(|group| {
                let prev_label = Period::previous_year(&group.key)?;
                let previous = sorted_groups.iter().find(|g| g.key == prev_label)?;
                if previous.total == 0.0 {
                    return None;
                }
                Some(YoyPoint {
                    period: group.key.clone(),
                    value: group.total,
                    growth_rate: (group.total - previous.total) / previous.total * 100.0,
                })
            })
            .collect()
    }

    /// Annualized compound growth rate over a period-sorted series, percent.
    ///
    /// Zero for fewer than two points or a non-positive endpoint total.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cagr(sorted_groups: &[AggregationGroup]) -> f64 {
        if sorted_groups.len() < 2 {
            return 0.0;
        }
        let start = sorted_groups[0].total;
        let end = sorted_groups[sorted_groups.len() - 1].total;
        if start <= 0.0 || end <= 0.0 {
            return 0.0;
        }
        let years = sorted_groups.len() as f64 / QUARTERS_PER_YEAR;
        ((end / start).powf(1.0 / years) - 1.0) * 100.0
    }

    /// Insight sentences for quarter-over-quarter moves above the threshold,
    /// plus a CAGR sentence when the annualized rate is positive.
    #[must_use]
    pub fn insights(label: &str, sorted_groups: &[AggregationGroup]) -> Vec<String> {
        let series = PeriodAggregator::compute_growth_series(sorted_groups);
        let mut insights = Vec::new();

        for window in series.windows(2) {
            let point = &window[1];
            if point.growth_rate.abs() > GROWTH_INSIGHT_THRESHOLD_PCT {
                let direction = if point.growth_rate > 0.0 {
                    "increased"
                } else {
                    "decreased"
                };
                insights.push(format!(
                    "{label} {direction} by {:.1}% from {} to {}",
                    point.growth_rate.abs(),
                    window[0].period,
                    point.period
                ));
            }
        }

        let cagr = Self::cagr(sorted_groups);
        if cagr > 0.0 {
            insights.push(format!(
                "{label} show a positive annualized growth rate of {cagr:.1}% over the analyzed period"
            ));
        }

        insights
    }
}
