use crate::aqi::AqiEngine;
use crate::error::Error;
use crate::location::{LocationCandidate, LocationResolver};
use crate::measurement::PollutionProvider;
use crate::report::{self, AqiReport};
use std::sync::{Mutex, MutexGuard};

/// Shared server state. The resolver lock is held across the geocoding
/// fetch, so concurrent requests for the same place trigger one upstream call.
pub struct AppState {
    pub resolver: Mutex<LocationResolver>,
    pub pollution: Box<dyn PollutionProvider>,
    pub engine: AqiEngine,
}

impl AppState {
    pub fn new(resolver: LocationResolver, pollution: Box<dyn PollutionProvider>) -> Self {
        Self {
            resolver: Mutex::new(resolver),
            pollution,
            engine: AqiEngine::new(),
        }
    }

    fn resolver(&self) -> MutexGuard<'_, LocationResolver> {
        self.resolver.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, Error> {
        Ok(self.resolver().search(query)?)
    }

    pub fn resolve(&self, query: &str) -> Result<LocationCandidate, Error> {
        Ok(self.resolver().resolve(query)?)
    }

    pub fn assess(&self, location: &LocationCandidate) -> Result<AqiReport, Error> {
        report::assess(location, self.pollution.as_ref(), &self.engine)
    }
}
