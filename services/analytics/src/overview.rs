//! Dashboard headline metrics
//!
//! The latest quarter's totals with growth against the preceding quarter,
//! formatted the way the dashboard's stat tiles expect them.

use serde::{Deserialize, Serialize};

use crate::aggregator::AggregationGroup;

/// A headline figure with its growth against the previous quarter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineMetric {
    /// Latest-quarter total in millions of USD
    pub value: f64,
    /// Compact human formatting of the value
    pub formatted: String,
    /// Percent change against the previous quarter
    pub growth_rate: f64,
}

/// Trade balance figure with its deficit/surplus status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceMetric {
    /// Latest-quarter balance in millions of USD
    pub value: f64,
    /// Compact human formatting of the value
    pub formatted: String,
    /// `"deficit"` when negative, `"surplus"` otherwise
    pub status: String,
}

/// Combined-trade figure without a growth component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalMetric {
    /// Latest-quarter total in millions of USD
    pub value: f64,
    /// Compact human formatting of the value
    pub formatted: String,
}

/// Headline metrics for the dashboard overview tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    /// Latest quarter the figures refer to; empty when no data exists
    pub period: String,
    /// Export total with growth
    pub total_exports: HeadlineMetric,
    /// Import total with growth
    pub total_imports: HeadlineMetric,
    /// Exports minus imports
    pub trade_balance: BalanceMetric,
    /// Exports plus imports
    pub total_trade: TotalMetric,
}

impl OverviewMetrics {
    /// All-zero placeholder keeping the payload shape intact
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            period: String::new(),
            total_exports: HeadlineMetric {
                value: 0.0,
                formatted: format_usd_millions(0.0),
                growth_rate: 0.0,
            },
            total_imports: HeadlineMetric {
                value: 0.0,
                formatted: format_usd_millions(0.0),
                growth_rate: 0.0,
            },
            trade_balance: BalanceMetric {
                value: 0.0,
                formatted: format_usd_millions(0.0),
                status: "surplus".to_string(),
            },
            total_trade: TotalMetric {
                value: 0.0,
                formatted: format_usd_millions(0.0),
            },
        }
    }
}

/// Compact human formatting for a million-denominated USD amount
#[must_use]
pub fn format_usd_millions(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1_000.0 {
        format!("{sign}${:.2}B", magnitude / 1_000.0)
    } else if magnitude >= 1.0 {
        format!("{sign}${magnitude:.1}M")
    } else {
        format!("{sign}${:.1}K", magnitude * 1_000.0)
    }
}

/// Computes overview metrics from period-sorted flow totals
pub struct OverviewAnalyzer;

impl OverviewAnalyzer {
    /// Headline metrics from period-sorted export and import groups.
    ///
    /// Missing series contribute zero; two empty series yield the zeroed
    /// placeholder.
    #[must_use]
    pub fn compute(
        exports_sorted: &[AggregationGroup],
        imports_sorted: &[AggregationGroup],
    ) -> OverviewMetrics {
        if exports_sorted.is_empty() && imports_sorted.is_empty() {
            return OverviewMetrics::zeroed();
        }

        let (export_value, export_growth) = latest_with_growth(exports_sorted);
        let (import_value, import_growth) = latest_with_growth(imports_sorted);
        let balance = export_value - import_value;

        let period = exports_sorted
            .last()
            .or(imports_sorted.last())
            .map(|group| group.key.clone())
            .unwrap_or_default();

        OverviewMetrics {
            period,
            total_exports: HeadlineMetric {
                value: export_value,
                formatted: format_usd_millions(export_value),
                growth_rate: export_growth,
            },
            total_imports: HeadlineMetric {
                value: import_value,
                formatted: format_usd_millions(import_value),
                growth_rate: import_growth,
            },
            trade_balance: BalanceMetric {
                value: balance,
                formatted: format_usd_millions(balance),
                status: if balance < 0.0 { "deficit" } else { "surplus" }.to_string(),
            },
            total_trade: TotalMetric {
                value: export_value + import_value,
                formatted: format_usd_millions(export_value + import_value),
            },
        }
    }
}

/// Latest total of a period-sorted series and its growth against the
/// preceding entry; zero growth when there is no predecessor or the
/// predecessor total is zero.
fn latest_with_growth(sorted: &[AggregationGroup]) -> (f64, f64) {
    match sorted {
        [] => (0.0, 0.0),
        [only] => (only.total, 0.0),
        [.., previous, latest] => {
            let growth = if previous.total == 0.0 {
                0.0
            } else {
                (latest.total - previous.total) / previous.total * 100.0
            };
            (latest.total, growth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(key: &str, total: f64) -> AggregationGroup {
        AggregationGroup { key: key.to_string(), total, count: 1 }
    }

    #[test]
    fn test_formatting_thresholds() {
        assert_eq!(format_usd_millions(1_463.62), "$1.46B");
        assert_eq!(format_usd_millions(458.44), "$458.4M");
        assert_eq!(format_usd_millions(0.5), "$500.0K");
        assert_eq!(format_usd_millions(-411.35), "-$411.3M");
        assert_eq!(format_usd_millions(0.0), "$0.0K");
    }

    #[test]
    fn test_overview_latest_quarter() {
        let exports = vec![group("2024Q4", 626.06), group("2025Q1", 458.44)];
        let imports = vec![group("2024Q4", 1_090.55), group("2025Q1", 869.79)];

        let metrics = OverviewAnalyzer::compute(&exports, &imports);

        assert_eq!(metrics.period, "2025Q1");
        assert_eq!(metrics.total_exports.value, 458.44);
        assert!((metrics.total_exports.growth_rate - (-26.77)).abs() < 0.01);
        assert_eq!(metrics.trade_balance.status, "deficit");
        assert!((metrics.trade_balance.value - (-411.35)).abs() < 1e-9);
        assert!((metrics.total_trade.value - 1_328.23).abs() < 1e-9);
    }

    #[test]
    fn test_overview_zeroed_placeholder() {
        let metrics = OverviewAnalyzer::compute(&[], &[]);
        assert_eq!(metrics, OverviewMetrics::zeroed());
        assert_eq!(metrics.trade_balance.status, "surplus");
    }
}
