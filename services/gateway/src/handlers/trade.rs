//! Per-flow quarterly series and top-N rankings

use axum::extract::{Path, Query, State};
use axum::response::Json;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use services_common::{Dimension, TradeFlow};
use trade_analytics::PeriodAggregator;

use crate::models::{
    ApiResponse, ChartPoint, ErrorResponse, QuarterlyPayload, RankedEntry, RankingPayload,
};
use crate::state::AppState;

/// Query parameters for ranking endpoints
#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    /// Number of entries to return; falls back to the configured default
    pub limit: Option<usize>,
}

/// Quarterly totals and growth for one flow
pub async fn quarterly(
    State(state): State<AppState>,
    Path(flow): Path<String>,
) -> Json<ApiResponse<QuarterlyPayload>> {
    let Ok(flow) = flow.parse::<TradeFlow>() else {
        return Json(ApiResponse::error(ErrorResponse::invalid_flow(&flow)));
    };

    let dataset = state.datasets.load(flow).await;
    let available = dataset.is_available();

    let mut groups =
        PeriodAggregator::group_and_sum(&dataset.unwrap_or_default(), Dimension::Period);
    PeriodAggregator::sort_by_period(&mut groups);
    let series = PeriodAggregator::compute_growth_series(&groups)
        .into_iter()
        .map(ChartPoint::from)
        .collect();

    Json(ApiResponse::success(QuarterlyPayload {
        flow: flow.to_string(),
        available,
        series,
    }))
}

/// Top counterparties for one flow
pub async fn partners(
    state: State<AppState>,
    flow: Path<String>,
    query: Query<RankingQuery>,
) -> Json<ApiResponse<RankingPayload>> {
    ranking(state, flow, query, Dimension::Counterparty).await
}

/// Top commodities for one flow
pub async fn commodities(
    state: State<AppState>,
    flow: Path<String>,
    query: Query<RankingQuery>,
) -> Json<ApiResponse<RankingPayload>> {
    ranking(state, flow, query, Dimension::Commodity).await
}

async fn ranking(
    State(state): State<AppState>,
    Path(flow): Path<String>,
    Query(query): Query<RankingQuery>,
    dimension: Dimension,
) -> Json<ApiResponse<RankingPayload>> {
    let Ok(flow) = flow.parse::<TradeFlow>() else {
        return Json(ApiResponse::error(ErrorResponse::invalid_flow(&flow)));
    };
    let limit = query.limit.unwrap_or(state.config.top_limit);

    let dataset = state.datasets.load(flow).await;
    let available = dataset.is_available();

    let groups = PeriodAggregator::group_and_sum(&dataset.unwrap_or_default(), dimension);
    // Shares are computed against the full total before truncation
    let shares: FxHashMap<String, f64> = PeriodAggregator::compute_share(&groups)
        .into_iter()
        .map(|share| (share.key, share.share_percentage))
        .collect();
    let entries = PeriodAggregator::sort_by_value_descending(groups, limit)
        .into_iter()
        .map(|group| RankedEntry {
            share_percentage: shares.get(&group.key).copied().unwrap_or(0.0),
            key: group.key,
            total: group.total,
            count: group.count,
        })
        .collect();

    let dimension_name = match dimension {
        Dimension::Period => "period",
        Dimension::Counterparty => "counterparty",
        Dimension::Commodity => "commodity",
    };

    Json(ApiResponse::success(RankingPayload {
        flow: flow.to_string(),
        dimension: dimension_name.to_string(),
        available,
        entries,
    }))
}
