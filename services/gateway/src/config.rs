//! Gateway configuration

use serde::{Deserialize, Serialize};
use services_common::DEFAULT_TOP_LIMIT;
use trade_narrator::NarratorConfig;

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind address for the HTTP server
    pub bind_addr: String,

    /// Directory holding the pre-computed dataset files
    pub data_dir: String,

    /// Default entry count for top-N rankings
    pub top_limit: usize,

    /// Overall request timeout in seconds
    pub request_timeout_secs: u64,

    /// Narration upstream; absent disables the narrative endpoint
    pub narrator: Option<NarratorConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            data_dir: "./data/processed".to_string(),
            top_limit: DEFAULT_TOP_LIMIT,
            request_timeout_secs: 30,
            narrator: None,
        }
    }
}
