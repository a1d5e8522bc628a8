//! Pollutant identifiers and the raw concentration reading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The six pollutants covered by the EPA breakpoint tables.
///
/// Variant order is the aggregation order: when two pollutants tie for the
/// maximum sub-index, the earlier one is reported as dominant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "pm2_5")]
    Pm25,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "so2")]
    So2,
}

/// Unit a breakpoint table is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ug/m3")]
    MicrogramsPerCubicMeter,
    #[serde(rename = "ppm")]
    PartsPerMillion,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MicrogramsPerCubicMeter => write!(f, "\u{00B5}g/m\u{00B3}"),
            Self::PartsPerMillion => write!(f, "ppm"),
        }
    }
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
    ];

    /// Provider key, e.g. `pm2_5`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pm25 => "pm2_5",
            Self::Pm10 => "pm10",
            Self::Co => "co",
            Self::O3 => "o3",
            Self::No2 => "no2",
            Self::So2 => "so2",
        }
    }

    /// Parse a provider key. Case-insensitive; `pm25` is accepted for PM2.5.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "pm2_5" | "pm25" | "pm2.5" => Some(Self::Pm25),
            "pm10" => Some(Self::Pm10),
            "co" => Some(Self::Co),
            "o3" => Some(Self::O3),
            "no2" => Some(Self::No2),
            "so2" => Some(Self::So2),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::Co => "CO",
            Self::O3 => "O\u{2083}",
            Self::No2 => "NO\u{2082}",
            Self::So2 => "SO\u{2082}",
        }
    }

    /// Molar mass in g/mol for the gases; `None` for particulates.
    pub fn molar_mass(self) -> Option<f64> {
        match self {
            Self::Co => Some(28.01),
            Self::O3 => Some(48.0),
            Self::No2 => Some(46.0055),
            Self::So2 => Some(64.066),
            Self::Pm25 | Self::Pm10 => None,
        }
    }

    /// Unit of this pollutant's breakpoint table.
    pub fn table_unit(self) -> Unit {
        match self {
            Self::Pm25 | Self::Pm10 => Unit::MicrogramsPerCubicMeter,
            _ => Unit::PartsPerMillion,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Raw concentrations in µg/m³ as supplied by the measurement provider.
///
/// Any subset of pollutants may be present. Deserializing from a provider
/// payload keeps only the recognized keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>")]
pub struct PollutantReading(BTreeMap<Pollutant, f64>);

impl PollutantReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, pollutant: Pollutant, ug_m3: f64) -> Self {
        self.0.insert(pollutant, ug_m3);
        self
    }

    pub fn insert(&mut self, pollutant: Pollutant, ug_m3: f64) {
        self.0.insert(pollutant, ug_m3);
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.0.get(&pollutant).copied()
    }

    /// Present pollutants in aggregation order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse `pm2_5=10,pm10=20,co=200`.
    pub fn parse_pairs(s: &str) -> Result<Self, String> {
        let mut reading = Self::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| format!("Expected key=value, got '{}'", part))?;
            let pollutant = Pollutant::from_key(key)
                .ok_or_else(|| format!("Unknown pollutant '{}'", key.trim()))?;
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|e| format!("Invalid value for {}: {}", pollutant, e))?;
            reading.insert(pollutant, value);
        }
        Ok(reading)
    }
}

impl From<BTreeMap<String, f64>> for PollutantReading {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        let map = raw
            .into_iter()
            .filter_map(|(k, v)| Pollutant::from_key(&k).map(|p| (p, v)))
            .collect();
        Self(map)
    }
}

impl FromIterator<(Pollutant, f64)> for PollutantReading {
    fn from_iter<I: IntoIterator<Item = (Pollutant, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
