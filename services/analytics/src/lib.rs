//! Trade Analytics
//!
//! Pure, request-scoped aggregation over flat trade-record slices:
//! - grouping and summation by period, counterparty, or commodity
//! - period-over-period growth series, year-over-year comparisons, CAGR
//! - market shares and HHI concentration reporting
//! - trade balance rows and dashboard headline metrics
//!
//! Every operation in this crate is infallible: malformed or degenerate
//! input degrades to zero-valued, well-typed output instead of an error.

pub mod aggregator;
pub mod balance;
pub mod concentration;
pub mod growth;
pub mod overview;

pub use aggregator::{AggregationGroup, GrowthPoint, PeriodAggregator, SharePoint};
pub use balance::{BalanceAnalyzer, BalanceRow, DeficitSummary};
pub use concentration::{ConcentrationAnalyzer, ConcentrationReport, TopGroup};
pub use growth::{GrowthAnalyzer, YoyPoint};
pub use overview::{OverviewAnalyzer, OverviewMetrics};
