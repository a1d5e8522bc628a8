//! Air Quality Index computation.
//!
//! Converts raw µg/m³ concentrations into US EPA sub-indices and the overall
//! index. No I/O; everything here is deterministic.

pub mod breakpoints;
pub mod category;
pub mod engine;
pub mod pollutant;

pub use breakpoints::{Breakpoint, BreakpointSet, US_EPA};
pub use category::AqiCategory;
pub use engine::{normalize_concentration, ug_m3_to_ppm, AqiEngine, AqiError, AqiResult, SubIndex, MAX_AQI};
pub use pollutant::{Pollutant, PollutantReading, Unit};
