//! Growth, concentration, and trade-balance analytics handlers

use axum::extract::State;
use axum::response::Json;
use services_common::{Dimension, TradeFlow, TradeRecord};
use trade_analytics::{
    AggregationGroup, BalanceAnalyzer, ConcentrationAnalyzer, GrowthAnalyzer, PeriodAggregator,
};

use crate::datasets::Dataset;
use crate::models::{
    ApiResponse, BalancePayload, BalanceRowPayload, CagrPayload, ChartPoint, ConcentrationPayload,
    FlowSeries, GrowthPayload, YoyEntry,
};
use crate::state::AppState;

fn period_sorted(dataset: &Dataset<Vec<TradeRecord>>) -> Vec<AggregationGroup> {
    let records: &[TradeRecord] = match dataset {
        Dataset::Found(records) => records,
        Dataset::NotAvailable => &[],
    };
    let mut groups = PeriodAggregator::group_and_sum(records, Dimension::Period);
    PeriodAggregator::sort_by_period(&mut groups);
    groups
}

/// QoQ, YoY, and CAGR growth for exports and imports
pub async fn growth(State(state): State<AppState>) -> Json<ApiResponse<GrowthPayload>> {
    let exports = state.datasets.load(TradeFlow::Exports).await;
    let imports = state.datasets.load(TradeFlow::Imports).await;
    let available = exports.is_available() || imports.is_available();

    let export_groups = period_sorted(&exports);
    let import_groups = period_sorted(&imports);

    let mut insights = GrowthAnalyzer::insights("Exports", &export_groups);
    insights.extend(GrowthAnalyzer::insights("Imports", &import_groups));

    Json(ApiResponse::success(GrowthPayload {
        available,
        qoq: FlowSeries {
            exports: PeriodAggregator::compute_growth_series(&export_groups)
                .into_iter()
                .map(ChartPoint::from)
                .collect(),
            imports: PeriodAggregator::compute_growth_series(&import_groups)
                .into_iter()
                .map(ChartPoint::from)
                .collect(),
        },
        yoy: FlowSeries {
            exports: GrowthAnalyzer::yoy_growth(&export_groups)
                .into_iter()
                .map(YoyEntry::from)
                .collect(),
            imports: GrowthAnalyzer::yoy_growth(&import_groups)
                .into_iter()
                .map(YoyEntry::from)
                .collect(),
        },
        cagr: CagrPayload {
            exports: GrowthAnalyzer::cagr(&export_groups),
            imports: GrowthAnalyzer::cagr(&import_groups),
        },
        insights,
    }))
}

/// HHI concentration over destinations, sources, and commodities
pub async fn concentration(State(state): State<AppState>) -> Json<ApiResponse<ConcentrationPayload>> {
    let exports = state.datasets.load(TradeFlow::Exports).await;
    let imports = state.datasets.load(TradeFlow::Imports).await;
    let available = exports.is_available() || imports.is_available();

    let export_records = exports.unwrap_or_default();
    let import_records = imports.unwrap_or_default();

    let destinations =
        PeriodAggregator::group_and_sum(&export_records, Dimension::Counterparty);
    let sources = PeriodAggregator::group_and_sum(&import_records, Dimension::Counterparty);
    let commodities = PeriodAggregator::group_and_sum(&export_records, Dimension::Commodity);

    Json(ApiResponse::success(ConcentrationPayload {
        available,
        export_destinations: ConcentrationAnalyzer::report(&destinations).into(),
        import_sources: ConcentrationAnalyzer::report(&sources).into(),
        export_commodities: ConcentrationAnalyzer::report(&commodities).into(),
    }))
}

/// Per-quarter trade balance with deficit summary
pub async fn balance(State(state): State<AppState>) -> Json<ApiResponse<BalancePayload>> {
    let exports = state.datasets.load(TradeFlow::Exports).await;
    let imports = state.datasets.load(TradeFlow::Imports).await;
    let available = exports.is_available() || imports.is_available();

    let export_groups = period_sorted(&exports);
    let import_groups = period_sorted(&imports);

    let rows = BalanceAnalyzer::rows(&export_groups, &import_groups);
    let summary = BalanceAnalyzer::summary(&rows);
    let insights = BalanceAnalyzer::insights(&rows, &summary);

    Json(ApiResponse::success(BalancePayload {
        available,
        rows: rows.into_iter().map(BalanceRowPayload::from).collect(),
        summary: summary.into(),
        insights,
    }))
}
