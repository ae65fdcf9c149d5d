//! Dashboard Gateway - HTTP server for the trade-statistics dashboard
//!
//! Serves chart-ready aggregations of the externally produced trade
//! datasets and, when configured, narrated summaries of the figures.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_gateway::config::GatewayConfig;
use dashboard_gateway::router;
use dashboard_gateway::state::AppState;

const SERVICE_NAME: &str = "dashboard-gateway";

#[derive(Debug, Parser)]
#[command(name = SERVICE_NAME, about = "Trade-statistics dashboard backend")]
struct Args {
    /// Path to a JSON configuration file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the dataset directory
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            serde_json::from_slice::<GatewayConfig>(&bytes)?
        }
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    info!("Serving datasets from {}", config.data_dir);
    if config.narrator.is_none() {
        info!("Narration upstream not configured; /api/narrative serves placeholders");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_addr, e);
            return Err(e.into());
        }
    };
    info!("{} listening on {}", SERVICE_NAME, bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Initialize tracing with environment filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,tower_http=info", SERVICE_NAME.replace('-', "_")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
