//! In-memory transit client for testing without API access.
//!
//! Responses are registered up front; each collaborator call can be given a
//! latency and an HTTP-style failure. Calls are recorded so tests can assert
//! what the engine asked for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{Coordinate, Itinerary, RoutePattern, Station, TimeWindow, Trip};
use crate::source::{NearbyStationSource, RoutePatternSource, RouteTimetableSource, TripPlanner};

use super::error::ClientError;

/// A canned response: data, or the HTTP status of a failure.
#[derive(Debug, Clone)]
struct Canned<T> {
    outcome: Result<T, u16>,
    latency: Duration,
}

impl<T: Clone> Canned<T> {
    async fn serve(&self) -> Result<T, ClientError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.outcome.clone().map_err(|status| ClientError::Api {
            status,
            message: "mock failure".to_string(),
        })
    }
}

/// Everything the engine asked the mock for.
#[derive(Debug, Default)]
struct CallLog {
    plans: Vec<Coordinate>,
    patterns: usize,
    timetables: Vec<TimeWindow>,
    stations: usize,
}

/// Mock client serving registered responses.
///
/// Unregistered plans, patterns and timetables answer with an empty list.
#[derive(Clone, Default)]
pub struct MockTransitClient {
    /// Keyed by destination `lat,lng`.
    plans: HashMap<String, Canned<Vec<Itinerary>>>,

    /// Keyed by `(organization, service)`.
    patterns: HashMap<(String, String), Canned<Vec<RoutePattern>>>,

    /// Keyed by `(route, is_next_day)` of the requested window.
    timetables: HashMap<(String, bool), Canned<Vec<Trip>>>,

    stations: Option<Canned<Vec<Station>>>,

    calls: Arc<Mutex<CallLog>>,
}

impl MockTransitClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer plans to `destination` with `itineraries` after `latency`.
    pub fn with_plan(
        mut self,
        destination: Coordinate,
        itineraries: Vec<Itinerary>,
        latency: Duration,
    ) -> Self {
        self.plans.insert(
            destination.as_place(),
            Canned {
                outcome: Ok(itineraries),
                latency,
            },
        );
        self
    }

    /// Fail plans to `destination` with `status` after `latency`.
    pub fn with_plan_failure(
        mut self,
        destination: Coordinate,
        status: u16,
        latency: Duration,
    ) -> Self {
        self.plans.insert(
            destination.as_place(),
            Canned {
                outcome: Err(status),
                latency,
            },
        );
        self
    }

    pub fn with_patterns(
        mut self,
        organization_id: &str,
        service_id: &str,
        patterns: Vec<RoutePattern>,
    ) -> Self {
        self.patterns.insert(
            (organization_id.to_string(), service_id.to_string()),
            Canned {
                outcome: Ok(patterns),
                latency: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_patterns_failure(
        mut self,
        organization_id: &str,
        service_id: &str,
        status: u16,
    ) -> Self {
        self.patterns.insert(
            (organization_id.to_string(), service_id.to_string()),
            Canned {
                outcome: Err(status),
                latency: Duration::ZERO,
            },
        );
        self
    }

    /// Answer timetable requests for `route_id` whose window has the given
    /// `is_next_day` flag.
    pub fn with_timetable(mut self, route_id: &str, is_next_day: bool, trips: Vec<Trip>) -> Self {
        self.timetables.insert(
            (route_id.to_string(), is_next_day),
            Canned {
                outcome: Ok(trips),
                latency: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_timetable_failure(mut self, route_id: &str, is_next_day: bool, status: u16) -> Self {
        self.timetables.insert(
            (route_id.to_string(), is_next_day),
            Canned {
                outcome: Err(status),
                latency: Duration::ZERO,
            },
        );
        self
    }

    pub fn with_stations(mut self, stations: Vec<Station>, latency: Duration) -> Self {
        self.stations = Some(Canned {
            outcome: Ok(stations),
            latency,
        });
        self
    }

    pub fn with_stations_failure(mut self, status: u16) -> Self {
        self.stations = Some(Canned {
            outcome: Err(status),
            latency: Duration::ZERO,
        });
        self
    }

    /// Destinations planned to, in call order.
    pub async fn plan_calls(&self) -> Vec<Coordinate> {
        self.calls.lock().await.plans.clone()
    }

    pub async fn pattern_calls(&self) -> usize {
        self.calls.lock().await.patterns
    }

    /// Windows requested for timetables, in call order.
    pub async fn timetable_calls(&self) -> Vec<TimeWindow> {
        self.calls.lock().await.timetables.clone()
    }

    pub async fn station_calls(&self) -> usize {
        self.calls.lock().await.stations
    }
}

impl TripPlanner for MockTransitClient {
    async fn plan(
        &self,
        _origin: Coordinate,
        destination: Coordinate,
        _depart_after: DateTime<Utc>,
    ) -> Result<Vec<Itinerary>, ClientError> {
        self.calls.lock().await.plans.push(destination);
        match self.plans.get(&destination.as_place()) {
            Some(canned) => canned.serve().await,
            None => Ok(Vec::new()),
        }
    }
}

impl RoutePatternSource for MockTransitClient {
    async fn list_patterns(
        &self,
        organization_id: &str,
        service_id: &str,
    ) -> Result<Vec<RoutePattern>, ClientError> {
        self.calls.lock().await.patterns += 1;
        let key = (organization_id.to_string(), service_id.to_string());
        match self.patterns.get(&key) {
            Some(canned) => canned.serve().await,
            None => Ok(Vec::new()),
        }
    }
}

impl RouteTimetableSource for MockTransitClient {
    async fn get_timetable(
        &self,
        _organization_id: &str,
        _service_id: &str,
        route_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Trip>, ClientError> {
        self.calls.lock().await.timetables.push(window);
        let key = (route_id.to_string(), window.is_next_day);
        match self.timetables.get(&key) {
            Some(canned) => canned.serve().await,
            None => Ok(Vec::new()),
        }
    }
}

impl NearbyStationSource for MockTransitClient {
    async fn nearby(&self, _origin: Coordinate, _radius: f64) -> Result<Vec<Station>, ClientError> {
        self.calls.lock().await.stations += 1;
        match &self.stations {
            Some(canned) => canned.serve().await,
            None => Ok(Vec::new()),
        }
    }
}
