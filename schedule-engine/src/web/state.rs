//! Application state for the web layer.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::destinations::ResultStore;
use crate::domain::{DestinationResult, Station};

/// Shared application state.
///
/// Generic over the transit source so handlers run against the cached
/// client in production and the mock in tests.
pub struct AppState<S> {
    /// Transit data collaborators
    pub source: Arc<S>,

    /// Engine configuration
    pub config: Arc<EngineConfig>,

    /// Last committed destination rows, per slot
    pub destinations: Arc<ResultStore<Vec<DestinationResult>>>,

    /// Last committed station list, per origin and radius
    pub stations: Arc<ResultStore<Vec<Station>>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(config),
            destinations: Arc::new(ResultStore::new()),
            stations: Arc::new(ResultStore::new()),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: Arc::clone(&self.config),
            destinations: Arc::clone(&self.destinations),
            stations: Arc::clone(&self.stations),
        }
    }
}
