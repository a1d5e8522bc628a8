//! Geocoding providers.

use super::types::{LocationCandidate, LocationError};
use crate::config::ProviderConfig;
use crate::http;
use tracing::debug;

/// Turns a free-text place name into ranked candidates.
pub trait GeocodingProvider: Send {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationCandidate>, LocationError>;
}

/// Join "city, state, country" skipping empty parts.
pub fn compose_query(city: &str, state: Option<&str>, country: Option<&str>) -> String {
    [Some(city), state, country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

// ─── OpenWeather direct geocoding ───────────────────────────────

pub struct OpenWeatherGeocoder {
    agent: ureq::Agent,
    url: String,
    api_key: Option<String>,
}

impl OpenWeatherGeocoder {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            agent: http::build_agent(config),
            url: config.geocoding_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl GeocodingProvider for OpenWeatherGeocoder {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationCandidate>, LocationError> {
        let key = self.api_key.as_deref().ok_or(LocationError::MissingApiKey)?;
        debug!(query, limit, url = %self.url, "geocoding request");

        let response = self
            .agent
            .get(&self.url)
            .query("q", query)
            .query("limit", &limit.clamp(1, 5).to_string())
            .query("appid", key)
            .call()
            .map_err(|e| LocationError::Network(http::describe_error(e)))?;

        let candidates: Vec<LocationCandidate> = response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

        debug!(query, count = candidates.len(), "geocoding response");
        Ok(candidates)
    }
}
