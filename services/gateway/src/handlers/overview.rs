//! Dashboard overview handler

use axum::extract::State;
use axum::response::Json;
use services_common::{Dimension, TradeFlow};
use trade_analytics::{OverviewAnalyzer, PeriodAggregator};

use crate::models::{ApiResponse, OverviewPayload};
use crate::state::AppState;

/// Headline metrics for the latest quarter
pub async fn overview(State(state): State<AppState>) -> Json<ApiResponse<OverviewPayload>> {
    let exports = state.datasets.load(TradeFlow::Exports).await;
    let imports = state.datasets.load(TradeFlow::Imports).await;
    let available = exports.is_available() || imports.is_available();

    let mut export_groups =
        PeriodAggregator::group_and_sum(&exports.unwrap_or_default(), Dimension::Period);
    PeriodAggregator::sort_by_period(&mut export_groups);
    let mut import_groups =
        PeriodAggregator::group_and_sum(&imports.unwrap_or_default(), Dimension::Period);
    PeriodAggregator::sort_by_period(&mut import_groups);

    let metrics = OverviewAnalyzer::compute(&export_groups, &import_groups);
    Json(ApiResponse::success(OverviewPayload::from_metrics(
        metrics, available,
    )))
}
