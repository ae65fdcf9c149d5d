//! Shared constants

/// Bucket key used when a grouping field is empty or missing
pub const UNKNOWN_KEY: &str = "Unknown";

/// Default number of entries returned by top-N rankings
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Quarters per calendar year, used to annualize growth figures
pub const QUARTERS_PER_YEAR: f64 = 4.0;

/// Quarter-over-quarter move (in percent) large enough to earn an insight sentence
pub const GROWTH_INSIGHT_THRESHOLD_PCT: f64 = 10.0;
