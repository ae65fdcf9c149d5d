//! File-backed dataset access
//!
//! Datasets are flat JSON arrays of trade records produced by the external
//! processing pipeline. A missing or undecodable file is not an error:
//! callers receive `Dataset::NotAvailable` and emit placeholder payloads of
//! the same shape.

use std::path::PathBuf;

use services_common::{TradeFlow, TradeRecord};
use tracing::warn;

/// Availability-tagged dataset payload
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset<T> {
    /// The backing file existed and decoded
    Found(T),
    /// The backing file is missing or unreadable
    NotAvailable,
}

impl<T> Dataset<T> {
    /// The payload, or the zero-valued fallback when absent
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Found(value) => value,
            Self::NotAvailable => T::default(),
        }
    }

    /// Whether the backing file existed and decoded
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Reads trade-record datasets from a directory of JSON files
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    /// Create a store over a dataset directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, flow: TradeFlow) -> PathBuf {
        self.data_dir.join(format!("{}.json", flow.as_str()))
    }

    /// Load the records for a flow; absence and decode failures degrade to
    /// `NotAvailable`.
    pub async fn load(&self, flow: TradeFlow) -> Dataset<Vec<TradeRecord>> {
        let path = self.path_for(flow);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("dataset {} unavailable at {}: {}", flow, path.display(), err);
                return Dataset::NotAvailable;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Dataset::Found(records),
            Err(err) => {
                warn!(
                    "dataset {} at {} failed to decode: {}",
                    flow,
                    path.display(),
                    err
                );
                Dataset::NotAvailable
            }
        }
    }
}
