//! Narration handler
//!
//! Assembles a context from the current analytics and passes it to the
//! chat-completion client. Without a configured upstream, or when the
//! upstream fails, the endpoint degrades to the placeholder payload.

use axum::extract::State;
use axum::response::Json;
use services_common::{Dimension, TradeFlow};
use tracing::warn;
use trade_analytics::{ConcentrationAnalyzer, GrowthAnalyzer, OverviewAnalyzer, PeriodAggregator};
use trade_narrator::NarrativeContext;

use crate::models::{ApiResponse, NarrativePayload};
use crate::state::AppState;

/// Generate a narrative of the current figures
pub async fn narrative(State(state): State<AppState>) -> Json<ApiResponse<NarrativePayload>> {
    let Some(client) = state.narrator.clone() else {
        return Json(ApiResponse::success(NarrativePayload::unavailable()));
    };

    let export_records = state
        .datasets
        .load(TradeFlow::Exports)
        .await
        .unwrap_or_default();
    let import_records = state
        .datasets
        .load(TradeFlow::Imports)
        .await
        .unwrap_or_default();

    let mut export_groups =
        PeriodAggregator::group_and_sum(&export_records, Dimension::Period);
    PeriodAggregator::sort_by_period(&mut export_groups);
    let mut import_groups =
        PeriodAggregator::group_and_sum(&import_records, Dimension::Period);
    PeriodAggregator::sort_by_period(&mut import_groups);

    let metrics = OverviewAnalyzer::compute(&export_groups, &import_groups);

    let mut insights = GrowthAnalyzer::insights("Exports", &export_groups);
    insights.extend(GrowthAnalyzer::insights("Imports", &import_groups));

    let destinations =
        PeriodAggregator::group_and_sum(&export_records, Dimension::Counterparty);
    let destination_report = ConcentrationAnalyzer::report(&destinations);

    let context = NarrativeContext {
        latest_period: metrics.period,
        total_exports: metrics.total_exports.value,
        export_growth_rate: metrics.total_exports.growth_rate,
        total_imports: metrics.total_imports.value,
        import_growth_rate: metrics.total_imports.growth_rate,
        trade_balance: metrics.trade_balance.value,
        insights,
        concentration_summary: Some(format!(
            "export destinations are {} (HHI {:.4})",
            destination_report.interpretation.to_lowercase(),
            destination_report.index
        )),
    };

    match client.narrate(&context).await {
        Ok(narrative) => Json(ApiResponse::success(NarrativePayload {
            available: true,
            narrative: Some(narrative.text),
            model: Some(narrative.model),
        })),
        Err(err) => {
            warn!("narration failed: {}", err);
            Json(ApiResponse::success(NarrativePayload::unavailable()))
        }
    }
}
