//! Canonical trade-statistics types shared across services

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ServiceError, UNKNOWN_KEY};

/// Trade flow selecting a backing dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeFlow {
    /// Goods leaving the country
    Exports,
    /// Goods entering the country
    Imports,
    /// Imported goods re-exported onward
    ReExports,
}

impl TradeFlow {
    /// Stable identifier used for dataset file names and route segments
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exports => "exports",
            Self::Imports => "imports",
            Self::ReExports => "re_exports",
        }
    }
}

impl fmt::Display for TradeFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeFlow {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exports" => Ok(Self::Exports),
            "imports" => Ok(Self::Imports),
            "re_exports" | "re-exports" => Ok(Self::ReExports),
            other => Err(ServiceError::InvalidRequest(format!(
                "unknown trade flow: {other}"
            ))),
        }
    }
}

/// Grouping dimension for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Group by quarter label
    Period,
    /// Group by trading-partner country
    Counterparty,
    /// Group by traded product or category
    Commodity,
}

/// One record of the externally produced trade dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Quarter label of the form `YYYYQn`
    #[serde(default)]
    pub period: String,
    /// Trading-partner country; empty means unknown
    #[serde(default)]
    pub counterparty: String,
    /// Traded product or category; empty means unknown
    #[serde(default)]
    pub commodity: String,
    /// Monetary amount in millions of USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl TradeRecord {
    /// Grouping key for a dimension, with empty fields normalized
    #[must_use]
    pub fn key_for(&self, dimension: Dimension) -> &str {
        let key = match dimension {
            Dimension::Period => &self.period,
            Dimension::Counterparty => &self.counterparty,
            Dimension::Commodity => &self.commodity,
        };
        if key.trim().is_empty() { UNKNOWN_KEY } else { key }
    }
}

/// Parsed quarter label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    /// Calendar year
    pub year: u16,
    /// Quarter within the year, 1-4 in well-formed data
    pub quarter: u8,
}

impl Period {
    /// Parse a `YYYYQn` label; `None` for anything else
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let (year, quarter) = label.split_once(['Q', 'q'])?;
        let year = year.trim().parse().ok()?;
        let quarter = quarter.trim().parse().ok()?;
        Some(Self { year, quarter })
    }

    /// Ordering key that never fails; unparseable labels sort first
    #[must_use]
    pub fn sort_key(label: &str) -> (u16, u8) {
        Self::parse(label).map_or((0, 0), |p| (p.year, p.quarter))
    }

    /// Label of the same quarter one year earlier
    #[must_use]
    pub fn previous_year(label: &str) -> Option<String> {
        let p = Self::parse(label)?;
        let year = p.year.checked_sub(1)?;
        Some(format!("{}Q{}", year, p.quarter))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// Deserialize a monetary value, coercing anything non-numeric to zero
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(v) if v.is_finite() => v,
        Raw::Num(_) => 0.0,
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_order() {
        assert_eq!(
            Period::parse("2024Q4"),
            Some(Period { year: 2024, quarter: 4 })
        );
        assert_eq!(Period::parse("garbage"), None);
        assert!(Period::sort_key("2024Q4") < Period::sort_key("2025Q1"));
        assert_eq!(Period::sort_key("not-a-period"), (0, 0));
        assert_eq!(Period::previous_year("2025Q1").as_deref(), Some("2024Q1"));
    }

    #[test]
    fn test_record_key_normalization() {
        let record = TradeRecord {
            period: "2024Q1".to_string(),
            counterparty: "  ".to_string(),
            commodity: String::new(),
            value: 10.0,
        };
        assert_eq!(record.key_for(Dimension::Period), "2024Q1");
        assert_eq!(record.key_for(Dimension::Counterparty), UNKNOWN_KEY);
        assert_eq!(record.key_for(Dimension::Commodity), UNKNOWN_KEY);
    }

    #[test]
    fn test_lenient_value_decoding() {
        let records: Vec<TradeRecord> = serde_json::from_str(
            r#"[
                {"period": "2024Q1", "counterparty": "Kenya", "value": 12.5},
                {"period": "2024Q1", "counterparty": "Uganda", "value": "34.25"},
                {"period": "2024Q1", "counterparty": "Tanzania", "value": "n/a"},
                {"period": "2024Q1", "counterparty": "Burundi", "value": null},
                {"period": "2024Q1", "counterparty": "DRC"}
            ]"#,
        )
        .expect("records decode");

        let values: Vec<f64> = records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![12.5, 34.25, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_flow_round_trip() {
        for flow in [TradeFlow::Exports, TradeFlow::Imports, TradeFlow::ReExports] {
            assert_eq!(flow.as_str().parse::<TradeFlow>().unwrap(), flow);
        }
        assert!("everything".parse::<TradeFlow>().is_err());
    }
}
