//! Abstract transit-data collaborators.
//!
//! The engine only needs these capabilities; the concrete wire format is the
//! client's business. Futures are `Send` so the engine can run inside
//! multi-threaded request handlers.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::client::ClientError;
use crate::domain::{Coordinate, Itinerary, RoutePattern, Station, TimeWindow, Trip};
use crate::error::EngineError;

/// Plans point-to-point trips.
pub trait TripPlanner: Send + Sync {
    /// Candidate itineraries from `origin` to `destination` leaving after
    /// `depart_after`. An empty list means no trip was found.
    fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        depart_after: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Itinerary>, ClientError>> + Send;
}

/// Lists the static patterns of every route of a service.
pub trait RoutePatternSource: Send + Sync {
    fn list_patterns(
        &self,
        organization_id: &str,
        service_id: &str,
    ) -> impl Future<Output = Result<Vec<RoutePattern>, ClientError>> + Send;
}

/// Fetches a route's trips within a time window.
pub trait RouteTimetableSource: Send + Sync {
    /// May legitimately return an empty list.
    fn get_timetable(
        &self,
        organization_id: &str,
        service_id: &str,
        route_id: &str,
        window: TimeWindow,
    ) -> impl Future<Output = Result<Vec<Trip>, ClientError>> + Send;
}

/// Finds bike-share stations around a point.
pub trait NearbyStationSource: Send + Sync {
    /// `radius` is in metres.
    fn nearby(
        &self,
        origin: Coordinate,
        radius: f64,
    ) -> impl Future<Output = Result<Vec<Station>, ClientError>> + Send;
}

/// Every collaborator at once, as needed by the HTTP surface.
pub trait TransitSource:
    TripPlanner + RoutePatternSource + RouteTimetableSource + NearbyStationSource + 'static
{
}

impl<T> TransitSource for T where
    T: TripPlanner + RoutePatternSource + RouteTimetableSource + NearbyStationSource + 'static
{
}

/// Run a collaborator call under `limit`, classifying failures.
///
/// A timeout is reported exactly like any other upstream failure.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, EngineError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(EngineError::upstream(operation, e)),
        Err(_) => Err(EngineError::UpstreamUnavailable {
            operation,
            message: format!("timed out after {}s", limit.as_secs_f64()),
        }),
    }
}
