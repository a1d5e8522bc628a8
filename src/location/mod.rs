//! Location lookup for airgauge.
//!
//! Resolves free-text place names through a geocoding provider, with an
//! in-memory cache so repeated queries do not hit the network.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod types;

pub use cache::LocationCache;
pub use providers::{compose_query, GeocodingProvider, OpenWeatherGeocoder};
pub use resolver::LocationResolver;
pub use types::{format_coords, LocationCandidate, LocationError};
