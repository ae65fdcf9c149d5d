//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use trade_narrator::ChatClient;

use crate::config::GatewayConfig;
use crate::datasets::DatasetStore;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration
    pub config: Arc<GatewayConfig>,
    /// Dataset store over the configured data directory
    pub datasets: Arc<DatasetStore>,
    /// Narration client; `None` when no upstream is configured
    pub narrator: Option<Arc<ChatClient>>,
}

impl AppState {
    /// Build state from configuration
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let datasets = Arc::new(DatasetStore::new(&config.data_dir));
        let narrator = match &config.narrator {
            Some(narrator_config) => Some(Arc::new(ChatClient::new(narrator_config.clone())?)),
            None => None,
        };
        Ok(Self {
            config: Arc::new(config),
            datasets,
            narrator,
        })
    }
}
