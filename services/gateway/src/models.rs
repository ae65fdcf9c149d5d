//! REST API models and chart payload types
//!
//! Monetary floats are rounded to two decimals here, at the serialization
//! boundary, never inside the aggregation core.

use serde::{Deserialize, Serialize, Serializer};
use trade_analytics::{
    BalanceRow, ConcentrationReport, DeficitSummary, GrowthPoint, OverviewMetrics, YoyPoint,
};

/// Round a monetary float to two decimals on the way out
fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// Round a ratio-valued float to four decimals on the way out
fn round4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10_000.0).round() / 10_000.0)
}

/// Generic API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error details (if failed)
    pub error: Option<ErrorResponse>,
    /// Response timestamp
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    /// Create a successful API response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Create an error API response
    #[must_use]
    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Error details carried by failed responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Error for an unrecognized flow path segment
    #[must_use]
    pub fn invalid_flow(flow: &str) -> Self {
        Self {
            error: "INVALID_FLOW".to_string(),
            message: format!("unknown trade flow: {flow}"),
        }
    }
}

/// One chart point of a quarterly series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Quarter label
    pub period: String,
    /// Total for the quarter
    #[serde(serialize_with = "round2")]
    pub value: f64,
    /// Absolute change against the previous quarter
    #[serde(serialize_with = "round2")]
    pub growth_amount: f64,
    /// Percent change against the previous quarter
    #[serde(serialize_with = "round2")]
    pub growth_rate: f64,
    /// Whether the move is non-negative
    pub is_positive_growth: bool,
}

impl From<GrowthPoint> for ChartPoint {
    fn from(point: GrowthPoint) -> Self {
        Self {
            period: point.period,
            value: point.value,
            growth_amount: point.growth_amount,
            growth_rate: point.growth_rate,
            is_positive_growth: point.is_positive_growth,
        }
    }
}

/// Quarterly totals and growth for one flow
#[derive(Debug, Serialize, Deserialize)]
pub struct QuarterlyPayload {
    /// Flow the series belongs to
    pub flow: String,
    /// Whether the backing dataset existed
    pub available: bool,
    /// Period-ascending growth series
    pub series: Vec<ChartPoint>,
}

/// One entry of a top-N ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Counterparty or commodity
    pub key: String,
    /// Total in millions of USD
    #[serde(serialize_with = "round2")]
    pub total: f64,
    /// Share of the grand total, percent
    #[serde(serialize_with = "round2")]
    pub share_percentage: f64,
    /// Number of contributing records
    pub count: usize,
}

/// Top counterparties or commodities for one flow
#[derive(Debug, Serialize, Deserialize)]
pub struct RankingPayload {
    /// Flow the ranking belongs to
    pub flow: String,
    /// Dimension the ranking is over
    pub dimension: String,
    /// Whether the backing dataset existed
    pub available: bool,
    /// Entries ordered by total descending
    pub entries: Vec<RankedEntry>,
}

/// One headline tile of the overview payload
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricPayload {
    /// Value in millions of USD
    #[serde(serialize_with = "round2")]
    pub value: f64,
    /// Compact human formatting
    pub formatted: String,
    /// Percent change against the previous quarter
    #[serde(serialize_with = "round2")]
    pub growth_rate: f64,
}

/// Trade-balance tile with its status tag
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceMetricPayload {
    /// Value in millions of USD
    #[serde(serialize_with = "round2")]
    pub value: f64,
    /// Compact human formatting
    pub formatted: String,
    /// `"deficit"` or `"surplus"`
    pub status: String,
}

/// Combined-trade tile
#[derive(Debug, Serialize, Deserialize)]
pub struct TotalMetricPayload {
    /// Value in millions of USD
    #[serde(serialize_with = "round2")]
    pub value: f64,
    /// Compact human formatting
    pub formatted: String,
}

/// Dashboard overview payload
#[derive(Debug, Serialize, Deserialize)]
pub struct OverviewPayload {
    /// Whether any backing dataset existed
    pub available: bool,
    /// Latest quarter the figures refer to
    pub period: String,
    /// Export tile
    pub total_exports: MetricPayload,
    /// Import tile
    pub total_imports: MetricPayload,
    /// Balance tile
    pub trade_balance: BalanceMetricPayload,
    /// Combined-trade tile
    pub total_trade: TotalMetricPayload,
}

impl OverviewPayload {
    /// Wrap computed metrics into the response shape
    #[must_use]
    pub fn from_metrics(metrics: OverviewMetrics, available: bool) -> Self {
        Self {
            available,
            period: metrics.period,
            total_exports: MetricPayload {
                value: metrics.total_exports.value,
                formatted: metrics.total_exports.formatted,
                growth_rate: metrics.total_exports.growth_rate,
            },
            total_imports: MetricPayload {
                value: metrics.total_imports.value,
                formatted: metrics.total_imports.formatted,
                growth_rate: metrics.total_imports.growth_rate,
            },
            trade_balance: BalanceMetricPayload {
                value: metrics.trade_balance.value,
                formatted: metrics.trade_balance.formatted,
                status: metrics.trade_balance.status,
            },
            total_trade: TotalMetricPayload {
                value: metrics.total_trade.value,
                formatted: metrics.total_trade.formatted,
            },
        }
    }
}

/// One year-over-year comparison entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoyEntry {
    /// Quarter label
    pub period: String,
    /// Total for the quarter
    #[serde(serialize_with = "round2")]
    pub value: f64,
    /// Percent change against the same quarter one year earlier
    #[serde(serialize_with = "round2")]
    pub growth_rate: f64,
}

impl From<YoyPoint> for YoyEntry {
    fn from(point: YoyPoint) -> Self {
        Self {
            period: point.period,
            value: point.value,
            growth_rate: point.growth_rate,
        }
    }
}

/// Export/import pair of series
#[derive(Debug, Serialize, Deserialize)]
pub struct FlowSeries<T> {
    /// Export series
    pub exports: Vec<T>,
    /// Import series
    pub imports: Vec<T>,
}

/// Annualized growth rates per flow
#[derive(Debug, Serialize, Deserialize)]
pub struct CagrPayload {
    /// Exports CAGR, percent
    #[serde(serialize_with = "round2")]
    pub exports: f64,
    /// Imports CAGR, percent
    #[serde(serialize_with = "round2")]
    pub imports: f64,
}

/// Growth analytics payload: QoQ, YoY, CAGR, and insights
#[derive(Debug, Serialize, Deserialize)]
pub struct GrowthPayload {
    /// Whether any backing dataset existed
    pub available: bool,
    /// Quarter-over-quarter series per flow
    pub qoq: FlowSeries<ChartPoint>,
    /// Year-over-year series per flow
    pub yoy: FlowSeries<YoyEntry>,
    /// Annualized growth per flow
    pub cagr: CagrPayload,
    /// Notable-movement sentences
    pub insights: Vec<String>,
}

/// One concentration report entry
#[derive(Debug, Serialize, Deserialize)]
pub struct ConcentrationEntry {
    /// HHI over fractional shares, in `[0, 1]`
    #[serde(serialize_with = "round4")]
    pub index: f64,
    /// Human-readable reading of the index
    pub interpretation: String,
    /// Number of distinct groups contributing
    pub group_count: usize,
    /// Largest contributor, when any group has a positive share
    pub top_group: Option<TopGroupPayload>,
}

/// Largest contributor of a concentration report
#[derive(Debug, Serialize, Deserialize)]
pub struct TopGroupPayload {
    /// Group key
    pub key: String,
    /// Share of the grand total, percent
    #[serde(serialize_with = "round2")]
    pub share_percentage: f64,
}

impl From<ConcentrationReport> for ConcentrationEntry {
    fn from(report: ConcentrationReport) -> Self {
        Self {
            index: report.index,
            interpretation: report.interpretation,
            group_count: report.group_count,
            top_group: report.top_group.map(|top| TopGroupPayload {
                key: top.key,
                share_percentage: top.share_percentage,
            }),
        }
    }
}

/// HHI reports over destinations, sources, and commodities
#[derive(Debug, Serialize, Deserialize)]
pub struct ConcentrationPayload {
    /// Whether any backing dataset existed
    pub available: bool,
    /// Export-destination concentration
    pub export_destinations: ConcentrationEntry,
    /// Import-source concentration
    pub import_sources: ConcentrationEntry,
    /// Export-commodity concentration
    pub export_commodities: ConcentrationEntry,
}

/// One trade-balance chart row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRowPayload {
    /// Quarter label
    pub period: String,
    /// Export total
    #[serde(serialize_with = "round2")]
    pub exports: f64,
    /// Import total
    #[serde(serialize_with = "round2")]
    pub imports: f64,
    /// Exports minus imports
    #[serde(serialize_with = "round2")]
    pub balance: f64,
    /// Whether the balance is negative
    pub deficit: bool,
    /// Magnitude of the deficit; zero in surplus quarters
    #[serde(serialize_with = "round2")]
    pub deficit_amount: f64,
}

impl From<BalanceRow> for BalanceRowPayload {
    fn from(row: BalanceRow) -> Self {
        Self {
            period: row.period,
            exports: row.exports,
            imports: row.imports,
            balance: row.balance,
            deficit: row.deficit,
            deficit_amount: row.deficit_amount,
        }
    }
}

/// Deficit summary of a balance series
#[derive(Debug, Serialize, Deserialize)]
pub struct DeficitSummaryPayload {
    /// Mean deficit across deficit quarters
    #[serde(serialize_with = "round2")]
    pub average_deficit: f64,
    /// Deepest single-quarter deficit
    #[serde(serialize_with = "round2")]
    pub maximum_deficit: f64,
    /// Number of quarters in deficit
    pub quarters_in_deficit: usize,
    /// Number of quarters considered
    pub total_periods: usize,
    /// Deficit quarters as a percentage of all quarters
    #[serde(serialize_with = "round2")]
    pub deficit_percentage: f64,
}

impl From<DeficitSummary> for DeficitSummaryPayload {
    fn from(summary: DeficitSummary) -> Self {
        Self {
            average_deficit: summary.average_deficit,
            maximum_deficit: summary.maximum_deficit,
            quarters_in_deficit: summary.quarters_in_deficit,
            total_periods: summary.total_periods,
            deficit_percentage: summary.deficit_percentage,
        }
    }
}

/// Trade-balance analytics payload
#[derive(Debug, Serialize, Deserialize)]
pub struct BalancePayload {
    /// Whether any backing dataset existed
    pub available: bool,
    /// Period-ascending balance rows
    pub rows: Vec<BalanceRowPayload>,
    /// Deficit summary
    pub summary: DeficitSummaryPayload,
    /// Balance insight sentences
    pub insights: Vec<String>,
}

/// Narration payload; the placeholder keeps the shape when no upstream is
/// configured or the call fails
#[derive(Debug, Serialize, Deserialize)]
pub struct NarrativePayload {
    /// Whether a narrative was generated
    pub available: bool,
    /// The generated text
    pub narrative: Option<String>,
    /// Model that produced it
    pub model: Option<String>,
}

impl NarrativePayload {
    /// Placeholder emitted when narration is unavailable
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            narrative: None,
            model: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_at_serialization() {
        let point = ChartPoint {
            period: "2024Q1".to_string(),
            value: 123.456_789,
            growth_amount: -0.005,
            growth_rate: 33.333_333,
            is_positive_growth: true,
        };
        let json = serde_json::to_value(&point).expect("serializes");

        assert_eq!(json["value"], 123.46);
        assert_eq!(json["growth_rate"], 33.33);
    }

    #[test]
    fn test_concentration_index_rounds_to_four_decimals() {
        let entry = ConcentrationEntry {
            index: 0.182_345_6,
            interpretation: "Moderately concentrated".to_string(),
            group_count: 12,
            top_group: None,
        };
        let json = serde_json::to_value(&entry).expect("serializes");
        assert_eq!(json["index"], 0.1823);
    }
}
