//! Runtime configuration, assembled by the CLI from flags, environment
//! variables and an optional `.env` file.

use std::time::Duration;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_POLLUTION_URL: &str = "https://api.openweathermap.org/data/2.5/air_pollution";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Candidates requested per geocoding call.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;

/// Upstream provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub geocoding_url: String,
    pub pollution_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub candidate_limit: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            pollution_url: DEFAULT_POLLUTION_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// Location cache bounds. Both off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of entries; the oldest insertion is evicted first.
    pub capacity: Option<usize>,
    /// Entries older than this read as misses.
    pub ttl: Option<Duration>,
}
