//! Pollutant measurement providers.
//!
//! Fetches current concentrations for a coordinate. Values come back in
//! µg/m³ and go straight into [`crate::aqi::AqiEngine::compute`].

use crate::aqi::PollutantReading;
use crate::config::ProviderConfig;
use crate::http;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("No measurements available for ({lat}, {lon})")]
    NoData { lat: f64, lon: f64 },

    #[error("No API key configured. Set AIRGAUGE_API_KEY or pass --api-key")]
    MissingApiKey,
}

/// One set of concentrations for a place and time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub reading: PollutantReading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
    /// The provider's own 1–5 index, kept for comparison only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_index: Option<u8>,
}

pub trait PollutionProvider: Send + Sync {
    fn fetch(&self, lat: f64, lon: f64) -> Result<Measurement, MeasurementError>;
}

// ─── OpenWeather air pollution ──────────────────────────────────

#[derive(Deserialize)]
struct AirPollutionResponse {
    #[serde(default)]
    list: Vec<AirPollutionItem>,
}

#[derive(Deserialize)]
struct AirPollutionItem {
    #[serde(default)]
    main: Option<AirPollutionMain>,
    components: PollutantReading,
    #[serde(default)]
    dt: Option<i64>,
}

#[derive(Deserialize)]
struct AirPollutionMain {
    aqi: u8,
}

fn parse_response(body: AirPollutionResponse, lat: f64, lon: f64) -> Result<Measurement, MeasurementError> {
    let item = body
        .list
        .into_iter()
        .next()
        .ok_or(MeasurementError::NoData { lat, lon })?;

    Ok(Measurement {
        reading: item.components,
        observed_at: item.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        provider_index: item.main.map(|m| m.aqi),
    })
}

pub struct OpenWeatherPollution {
    agent: ureq::Agent,
    url: String,
    api_key: Option<String>,
}

impl OpenWeatherPollution {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            agent: http::build_agent(config),
            url: config.pollution_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl PollutionProvider for OpenWeatherPollution {
    fn fetch(&self, lat: f64, lon: f64) -> Result<Measurement, MeasurementError> {
        let key = self.api_key.as_deref().ok_or(MeasurementError::MissingApiKey)?;
        debug!(lat, lon, url = %self.url, "pollution request");

        let response = self
            .agent
            .get(&self.url)
            .query("lat", &lat.to_string())
            .query("lon", &lon.to_string())
            .query("appid", key)
            .call()
            .map_err(|e| MeasurementError::Network(http::describe_error(e)))?;

        let body: AirPollutionResponse = response
            .into_json()
            .map_err(|e| MeasurementError::InvalidResponse(e.to_string()))?;

        parse_response(body, lat, lon)
    }
}
