//! The AQI engine: unit normalization, sub-index interpolation, aggregation.
//!
//! Pure and deterministic. PM values are truncated to the precision of their
//! tables. Gases are converted from µg/m³ to ppm with the 25 °C molar volume
//! (24.45 L/mol) and used unrounded; a converted value that lands between two
//! segments takes the upper segment's low index.

use super::breakpoints::{table_precision, Breakpoint, BreakpointSet, US_EPA};
use super::category::AqiCategory;
use super::pollutant::{Pollutant, PollutantReading, Unit};
use serde::Serialize;
use thiserror::Error;

/// Molar volume of an ideal gas at 25 °C and 1 atm, in litres.
const MOLAR_VOLUME: f64 = 24.45;

/// Upper end of the index scale. Concentrations past every segment map here.
pub const MAX_AQI: u16 = 500;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// A concentration was negative, NaN or infinite.
    #[error("Invalid concentration for {pollutant}: {value} (must be finite and non-negative)")]
    InvalidInput { pollutant: Pollutant, value: f64 },

    /// The reading held no recognized pollutant.
    #[error("Reading contains no recognized pollutant")]
    InsufficientData,
}

/// One pollutant's contribution to the overall index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIndex {
    pub pollutant: Pollutant,
    /// Concentration after normalization, in `unit`.
    pub concentration: f64,
    pub unit: Unit,
    pub index: u16,
    /// True when the concentration was above the table and the index was capped.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiResult {
    pub aqi: u16,
    pub dominant: Pollutant,
    pub category: AqiCategory,
    pub sub_indices: Vec<SubIndex>,
}

impl AqiResult {
    pub fn sub_index(&self, pollutant: Pollutant) -> Option<u16> {
        self.sub_indices
            .iter()
            .find(|s| s.pollutant == pollutant)
            .map(|s| s.index)
    }
}

/// µg/m³ → ppm.
pub fn ug_m3_to_ppm(value: f64, molar_mass: f64) -> f64 {
    (value * MOLAR_VOLUME) / (molar_mass * 1000.0)
}

fn truncate(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).floor() / scale
}

/// Convert a raw µg/m³ concentration into the unit of the pollutant's
/// breakpoint table. PM is truncated to table precision; gases are converted
/// to ppm as-is.
pub fn normalize_concentration(pollutant: Pollutant, ug_m3: f64) -> f64 {
    match pollutant.molar_mass() {
        Some(mass) => ug_m3_to_ppm(ug_m3, mass),
        None => truncate(ug_m3, table_precision(pollutant)),
    }
}

/// Index for a normalized concentration, or `None` when it exceeds the table.
fn lookup(table: &[Breakpoint], c: f64) -> Option<u16> {
    let seg = table.iter().find(|seg| c <= seg.c_high)?;
    if seg.contains(c) {
        Some(seg.interpolate(c))
    } else {
        // Between two segments: snap up to the start of the next one.
        Some(seg.i_low)
    }
}

fn validate(pollutant: Pollutant, value: f64) -> Result<(), AqiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AqiError::InvalidInput { pollutant, value })
    }
}

/// The engine. Holds a reference to immutable breakpoint tables; cheap to copy
/// and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct AqiEngine {
    tables: &'static BreakpointSet,
}

impl Default for AqiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AqiEngine {
    /// Engine over the US EPA tables.
    pub fn new() -> Self {
        Self { tables: &US_EPA }
    }

    pub fn with_tables(tables: &'static BreakpointSet) -> Self {
        Self { tables }
    }

    /// Sub-index for a single pollutant given its raw µg/m³ concentration.
    pub fn sub_index(&self, pollutant: Pollutant, ug_m3: f64) -> Result<SubIndex, AqiError> {
        validate(pollutant, ug_m3)?;
        let concentration = normalize_concentration(pollutant, ug_m3);
        let looked_up = lookup(self.tables.table(pollutant), concentration);
        Ok(SubIndex {
            pollutant,
            concentration,
            unit: pollutant.table_unit(),
            index: looked_up.unwrap_or(MAX_AQI),
            clamped: looked_up.is_none(),
        })
    }

    /// Overall AQI for a reading: the maximum sub-index across every
    /// pollutant present. Ties go to the pollutant listed first in
    /// [`Pollutant::ALL`].
    pub fn compute(&self, reading: &PollutantReading) -> Result<AqiResult, AqiError> {
        if reading.is_empty() {
            return Err(AqiError::InsufficientData);
        }
        for (pollutant, value) in reading.iter() {
            validate(pollutant, value)?;
        }

        let sub_indices = reading
            .iter()
            .map(|(pollutant, value)| self.sub_index(pollutant, value))
            .collect::<Result<Vec<_>, _>>()?;

        let mut best = &sub_indices[0];
        for s in &sub_indices[1..] {
            if s.index > best.index {
                best = s;
            }
        }
        let (aqi, dominant) = (best.index, best.pollutant);

        Ok(AqiResult {
            aqi,
            dominant,
            category: AqiCategory::from_aqi(aqi),
            sub_indices,
        })
    }
}
