//! Location resolver: cache in front of a geocoding provider.
//!
//! Flow: normalize → cache → provider → store → return.

use super::cache::{normalize_key, LocationCache};
use super::providers::GeocodingProvider;
use super::types::{LocationCandidate, LocationError};
use crate::config::DEFAULT_CANDIDATE_LIMIT;
use tracing::debug;

pub struct LocationResolver {
    cache: LocationCache,
    provider: Box<dyn GeocodingProvider>,
    limit: usize,
}

impl LocationResolver {
    pub fn new(provider: Box<dyn GeocodingProvider>) -> Self {
        Self::with_cache(provider, LocationCache::new())
    }

    pub fn with_cache(provider: Box<dyn GeocodingProvider>, cache: LocationCache) -> Self {
        Self {
            cache,
            provider,
            limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Candidates requested from the provider per lookup.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }

    /// All candidates for a query. Each distinct normalized query reaches the
    /// provider at most once; an empty answer is remembered too.
    pub fn search(&mut self, query: &str) -> Result<Vec<LocationCandidate>, LocationError> {
        let key = normalize_key(query);
        if key.is_empty() {
            return Err(LocationError::NoInput);
        }

        if let Some(hit) = self.cache.get(&key) {
            debug!(query = %key, count = hit.len(), "location cache hit");
            return Ok(hit.to_vec());
        }

        debug!(query = %key, "location cache miss");
        let candidates = self.provider.search(query.trim(), self.limit)?;
        self.cache.put(&key, candidates.clone());
        Ok(candidates)
    }

    /// Best candidate for a query (the provider's first).
    pub fn resolve(&mut self, query: &str) -> Result<LocationCandidate, LocationError> {
        self.search(query)?
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::NotFound(query.trim().to_string()))
    }

    /// Candidate for raw coordinates.
    pub fn from_manual(lat: f64, lon: f64) -> Result<LocationCandidate, LocationError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::InvalidCoordinates { lat, lon });
        }
        Ok(LocationCandidate {
            name: format!("{:.4}, {:.4}", lat, lon),
            state: None,
            country: String::new(),
            lat,
            lon,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Provider backed by a fixed table, counting calls.
    pub(crate) struct FakeGeocoder {
        pub places: HashMap<String, Vec<LocationCandidate>>,
        pub calls: Arc<AtomicUsize>,
    }

    impl FakeGeocoder {
        pub(crate) fn with_paris() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let mut places = HashMap::new();
            places.insert("paris".to_string(), vec![paris(), paris_texas()]);
            (Self { places, calls: calls.clone() }, calls)
        }
    }

    impl GeocodingProvider for FakeGeocoder {
        fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationCandidate>, LocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.eq_ignore_ascii_case("unreachable-upstream") {
                return Err(LocationError::Network("connection refused".into()));
            }
            let mut found = self.places.get(&query.to_lowercase()).cloned().unwrap_or_default();
            found.truncate(limit);
            Ok(found)
        }
    }

    pub(crate) fn paris() -> LocationCandidate {
        LocationCandidate {
            name: "Paris".into(),
            state: Some("Ile-de-France".into()),
            country: "FR".into(),
            lat: 48.8589,
            lon: 2.3200,
        }
    }

    fn paris_texas() -> LocationCandidate {
        LocationCandidate {
            name: "Paris".into(),
            state: Some("Texas".into()),
            country: "US".into(),
            lat: 33.6609,
            lon: -95.5555,
        }
    }

    #[test]
    fn test_search_fetches_once_per_key() {
        let (geo, calls) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo));

        let first = resolver.search("Paris").unwrap();
        let second = resolver.search("  PARIS ").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_answer_is_cached() {
        let (geo, calls) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo));

        assert_eq!(resolver.search("Atlantis").unwrap(), vec![]);
        assert_eq!(resolver.search("atlantis").unwrap(), vec![]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.cache().len(), 1);
    }

    #[test]
    fn test_resolve_picks_first_candidate() {
        let (geo, _) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo));
        let loc = resolver.resolve("paris").unwrap();
        assert_eq!(loc.country, "FR");
    }

    #[test]
    fn test_resolve_not_found() {
        let (geo, _) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo));
        assert_eq!(
            resolver.resolve(" Atlantis "),
            Err(LocationError::NotFound("Atlantis".into()))
        );
    }

    #[test]
    fn test_empty_query_rejected_before_cache() {
        let (geo, calls) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo));
        assert_eq!(resolver.search("   "), Err(LocationError::NoInput));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_provider_error_not_cached() {
        let (geo, calls) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo));
        assert!(matches!(resolver.search("unreachable-upstream"), Err(LocationError::Network(_))));
        assert!(resolver.search("unreachable-upstream").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_prefilled_cache_skips_provider() {
        let (geo, calls) = FakeGeocoder::with_paris();
        let mut cache = LocationCache::new();
        cache.put("Oslo", vec![]);
        let mut resolver = LocationResolver::with_cache(Box::new(geo), cache);

        assert_eq!(resolver.search(" OSLO").unwrap(), vec![]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_limit_forwarded() {
        let (geo, _) = FakeGeocoder::with_paris();
        let mut resolver = LocationResolver::new(Box::new(geo)).with_limit(1);
        assert_eq!(resolver.search("paris").unwrap().len(), 1);
    }

    #[test]
    fn test_manual_location() {
        let loc = LocationResolver::from_manual(59.33, 18.07).unwrap();
        assert_eq!(loc.name, "59.3300, 18.0700");
        assert!(LocationResolver::from_manual(91.0, 0.0).is_err());
        assert!(LocationResolver::from_manual(0.0, -180.5).is_err());
    }
}
