//! Crate-level error for the end-to-end lookup → measure → compute flow.

use crate::aqi::AqiError;
use crate::location::LocationError;
use crate::measurement::MeasurementError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error(transparent)]
    Aqi(#[from] AqiError),
}
