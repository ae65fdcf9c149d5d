//! Dashboard Gateway
//!
//! HTTP surface of the trade-statistics backend: handlers read the
//! pre-computed JSON datasets, run the aggregation core, and serialize
//! chart-ready payloads. Absent backing data degrades to zero-valued
//! payloads of the same shape, never an error response.

pub mod config;
pub mod datasets;
pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router with all routes and middleware layers
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/overview", get(handlers::overview::overview))
        .route("/api/trade/:flow/quarterly", get(handlers::trade::quarterly))
        .route("/api/trade/:flow/partners", get(handlers::trade::partners))
        .route(
            "/api/trade/:flow/commodities",
            get(handlers::trade::commodities),
        )
        .route("/api/analytics/growth", get(handlers::analytics::growth))
        .route(
            "/api/analytics/concentration",
            get(handlers::analytics::concentration),
        )
        .route("/api/analytics/balance", get(handlers::analytics::balance))
        .route("/api/narrative", post(handlers::narrative::narrative))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
