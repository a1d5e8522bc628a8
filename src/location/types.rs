//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One geocoding match. Field names follow the OpenWeather geocoding
/// payload so provider responses deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2 country code, empty for manual coordinates.
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl LocationCandidate {
    /// "Paris, Île-de-France, FR"
    pub fn display_line(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            parts.push(state);
        }
        if !self.country.is_empty() {
            parts.push(&self.country);
        }
        parts.join(", ")
    }
}

/// Format coordinates as "48.8566°N, 2.3522°E".
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), ns, lon.abs(), ew)
}

/// Location resolution errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Location not found: '{0}'")]
    NotFound(String),

    #[error("No location specified. Use a city name or --lat/--lon")]
    NoInput,

    #[error("Invalid coordinates ({lat}, {lon}). Lat: -90..90, Lon: -180..180")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("No API key configured. Set AIRGAUGE_API_KEY or pass --api-key")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_provider_json() {
        let json = r#"[{"name":"Paris","local_names":{"fr":"Paris"},"lat":48.8588897,"lon":2.3200410,"country":"FR","state":"Ile-de-France"}]"#;
        let parsed: Vec<LocationCandidate> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].state.as_deref(), Some("Ile-de-France"));
        assert_eq!(parsed[0].display_line(), "Paris, Ile-de-France, FR");
    }

    #[test]
    fn test_display_line_without_state() {
        let c = LocationCandidate {
            name: "Oslo".into(),
            state: None,
            country: "NO".into(),
            lat: 59.91,
            lon: 10.75,
        };
        assert_eq!(c.display_line(), "Oslo, NO");
    }

    #[test]
    fn test_format_coords_hemispheres() {
        assert_eq!(format_coords(-33.8688, 151.2093), "33.8688\u{00B0}S, 151.2093\u{00B0}E");
        assert_eq!(format_coords(40.7128, -74.006), "40.7128\u{00B0}N, 74.0060\u{00B0}W");
    }
}
