//! airgauge: US EPA Air Quality Index for any place name.
//!
//! [`aqi::AqiEngine`] turns raw µg/m³ concentrations into sub-indices and an
//! overall index. [`location::LocationResolver`] turns a place name into
//! coordinates through a geocoding provider, memoizing answers in a
//! [`location::LocationCache`].

pub mod aqi;
pub mod config;
pub mod error;
mod http;
pub mod location;
pub mod measurement;
pub mod report;
pub mod server;

pub use error::Error;
