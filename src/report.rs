//! End-to-end assessment output and its text rendering.

use crate::aqi::{AqiEngine, AqiResult, PollutantReading};
use crate::error::Error;
use crate::location::{format_coords, LocationCandidate};
use crate::measurement::PollutionProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct LocationInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_coords: String,
}

impl From<&LocationCandidate> for LocationInfo {
    fn from(c: &LocationCandidate) -> Self {
        Self {
            name: c.name.clone(),
            state: c.state.clone(),
            country: c.country.clone(),
            latitude: c.lat,
            longitude: c.lon,
            formatted_coords: format_coords(c.lat, c.lon),
        }
    }
}

/// Full output for one place.
#[derive(Debug, Clone, Serialize)]
pub struct AqiReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_index: Option<u8>,
    pub reading: PollutantReading,
    pub result: AqiResult,
}

impl AqiReport {
    /// Report for a reading with no location attached.
    pub fn from_reading(engine: &AqiEngine, reading: PollutantReading) -> Result<Self, Error> {
        let result = engine.compute(&reading)?;
        Ok(Self {
            location: None,
            observed_at: None,
            provider_index: None,
            reading,
            result,
        })
    }
}

/// Fetch the current reading for a location and compute its index.
pub fn assess(
    location: &LocationCandidate,
    provider: &dyn PollutionProvider,
    engine: &AqiEngine,
) -> Result<AqiReport, Error> {
    let measurement = provider.fetch(location.lat, location.lon)?;
    let result = engine.compute(&measurement.reading)?;
    Ok(AqiReport {
        location: Some(LocationInfo::from(location)),
        observed_at: measurement.observed_at,
        provider_index: measurement.provider_index,
        reading: measurement.reading,
        result,
    })
}

/// Human-readable summary for stderr.
pub fn render_summary(report: &AqiReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    if let Some(loc) = &report.location {
        let mut place = loc.name.clone();
        if let Some(state) = &loc.state {
            let _ = write!(place, ", {}", state);
        }
        if !loc.country.is_empty() {
            let _ = write!(place, ", {}", loc.country);
        }
        let _ = writeln!(out, "  {}  ({})", place, loc.formatted_coords);
    }
    if let Some(ts) = report.observed_at {
        let _ = writeln!(out, "  Observed {}", ts.format("%Y-%m-%d %H:%M UTC"));
    }

    let _ = writeln!(
        out,
        "  AQI {}  {}  (dominant: {})",
        result.aqi,
        result.category,
        result.dominant.label()
    );
    let _ = writeln!(out, "  {:<7} {:>12} {:<6} {:>5}", "", "conc.", "unit", "index");
    for s in &result.sub_indices {
        let marker = if s.pollutant == result.dominant { '*' } else { ' ' };
        let clamp = if s.clamped { " (capped)" } else { "" };
        let _ = writeln!(
            out,
            "{} {:<7} {:>12.3} {:<6} {:>5}{}",
            marker,
            s.pollutant.label(),
            s.concentration,
            s.unit.to_string(),
            s.index,
            clamp
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::{AqiCategory, Pollutant};
    use crate::measurement::{Measurement, MeasurementError};

    struct FixedPollution(PollutantReading);

    impl PollutionProvider for FixedPollution {
        fn fetch(&self, _lat: f64, _lon: f64) -> Result<Measurement, MeasurementError> {
            Ok(Measurement {
                reading: self.0.clone(),
                observed_at: DateTime::from_timestamp(1_700_000_000, 0),
                provider_index: Some(1),
            })
        }
    }

    fn paris() -> LocationCandidate {
        LocationCandidate {
            name: "Paris".into(),
            state: None,
            country: "FR".into(),
            lat: 48.8589,
            lon: 2.32,
        }
    }

    #[test]
    fn test_assess_end_to_end() {
        let provider = FixedPollution(
            PollutantReading::new()
                .with(Pollutant::Pm25, 10.0)
                .with(Pollutant::Pm10, 20.0)
                .with(Pollutant::Co, 200.0),
        );
        let report = assess(&paris(), &provider, &AqiEngine::new()).unwrap();
        assert_eq!(report.result.aqi, 42);
        assert_eq!(report.result.category, AqiCategory::Good);
        assert_eq!(report.location.as_ref().unwrap().country, "FR");
        assert_eq!(report.provider_index, Some(1));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"dominant\":\"pm2_5\""), "json: {}", json);
        assert!(json.contains("\"aqi\":42"));
    }

    #[test]
    fn test_assess_propagates_engine_error() {
        let provider = FixedPollution(PollutantReading::new());
        let err = assess(&paris(), &provider, &AqiEngine::new()).unwrap_err();
        assert_eq!(err, Error::Aqi(crate::aqi::AqiError::InsufficientData));
    }

    #[test]
    fn test_summary_marks_dominant() {
        let reading = PollutantReading::new()
            .with(Pollutant::Pm25, 3.0)
            .with(Pollutant::Pm10, 10_000.0);
        let report = AqiReport::from_reading(&AqiEngine::new(), reading).unwrap();
        let text = render_summary(&report);
        assert!(text.contains("AQI 500  Severe  (dominant: PM10)"), "{}", text);
        assert!(text.contains("* PM10"));
        assert!(text.contains("(capped)"));
        assert!(!text.contains("Observed"));
    }
}
