//! Trade balance rows and deficit summaries

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use services_common::Period;

use crate::aggregator::AggregationGroup;

/// Export/import pairing for one quarter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Quarter label
    pub period: String,
    /// Export total in millions of USD
    pub exports: f64,
    /// Import total in millions of USD
    pub imports: f64,
    /// Exports minus imports
    pub balance: f64,
    /// Whether the balance is negative
    pub deficit: bool,
    /// Magnitude of the deficit; zero in surplus quarters
    pub deficit_amount: f64,
}

/// How often and how deeply the balance runs negative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeficitSummary {
    /// Mean deficit across deficit quarters
    pub average_deficit: f64,
    /// Deepest single-quarter deficit
    pub maximum_deficit: f64,
    /// Number of quarters in deficit
    pub quarters_in_deficit: usize,
    /// Number of quarters considered
    pub total_periods: usize,
    /// Deficit quarters as a percentage of all quarters
    pub deficit_percentage: f64,
}

/// Pairs period-grouped flows into balance rows and summaries
pub struct BalanceAnalyzer;

impl BalanceAnalyzer {
    /// Pair period-grouped export and import totals into balance rows,
    /// ordered ascending by period.
    ///
    /// Periods appearing on only one side contribute zero on the other.
    #[must_use]
    pub fn rows(exports: &[AggregationGroup], imports: &[AggregationGroup]) -> Vec<BalanceRow> {
        let mut periods: FxHashMap<&str, (f64, f64)> = FxHashMap::default();
        for group in exports {
            periods.entry(&group.key).or_default().0 += group.total;
        }
        for group in imports {
            periods.entry(&group.key).or_default().1 += group.total;
        }

        let mut rows: Vec<BalanceRow> = periods
            .into_iter()
            .map(|(period, (exports, imports))| {
                let balance = exports - imports;
                BalanceRow {
                    period: period.to_string(),
                    exports,
                    imports,
                    balance,
                    deficit: balance < 0.0,
                    deficit_amount: if balance < 0.0 { balance.abs() } else { 0.0 },
                }
            })
            .collect();
        rows.sort_by_key(|row| Period::sort_key(&row.period));
        rows
    }

    /// Summarize the deficit pattern of a balance series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(rows: &[BalanceRow]) -> DeficitSummary {
        let deficits: Vec<f64> = rows
            .iter()
            .filter(|row| row.deficit)
            .map(|row| row.deficit_amount)
            .collect();
        let quarters_in_deficit = deficits.len();
        let total_periods = rows.len();

        DeficitSummary {
            average_deficit: if deficits.is_empty() {
                0.0
            } else {
                deficits.iter().sum::<f64>() / deficits.len() as f64
            },
            maximum_deficit: deficits.iter().copied().fold(0.0, f64::max),
            quarters_in_deficit,
            total_periods,
            deficit_percentage: if total_periods == 0 {
                0.0
            } else {
                quarters_in_deficit as f64 / total_periods as f64 * 100.0
            },
        }
    }

    /// Insight sentences over a balance series; empty for empty input.
    #[must_use]
    pub fn insights(rows: &[BalanceRow], summary: &DeficitSummary) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        vec![
            format!(
                "Trade deficit persists in {} out of {} quarters ({:.1}%)",
                summary.quarters_in_deficit, summary.total_periods, summary.deficit_percentage
            ),
            format!("Average quarterly deficit: ${:.1}M", summary.average_deficit),
            format!("Maximum quarterly deficit: ${:.1}M", summary.maximum_deficit),
        ]
    }
}
