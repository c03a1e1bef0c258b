//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Destination, DestinationResult, RouteInfo, Station};

/// Request to resolve a destination table.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// Display slot the table belongs to; newer requests supersede older
    /// ones for the same slot.
    pub slot: String,

    pub origin: Coordinate,

    pub destinations: Vec<Destination>,

    /// Rows currently on screen. Falls back to the slot's last committed
    /// rows when absent.
    pub previous: Option<Vec<DestinationResult>>,
}

/// Resolved destination table.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub results: Vec<DestinationResult>,
    pub any_succeeded: bool,

    /// True when a newer request for the same slot started meanwhile; the
    /// rows were not committed.
    pub stale: bool,
}

/// Query for a fixed-route schedule.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteScheduleQuery {
    pub organization_id: String,
    pub service_id: String,
    pub route_id: String,
    pub short_name: Option<String>,

    #[serde(default)]
    pub skip_patterns: bool,
}

impl RouteScheduleQuery {
    pub fn route_info(&self) -> RouteInfo {
        RouteInfo {
            organization_id: self.organization_id.clone(),
            service_id: self.service_id.clone(),
            route_id: self.route_id.clone(),
            short_name: self.short_name.clone(),
        }
    }
}

/// Query for stations around a point.
#[derive(Debug, Deserialize)]
pub struct NearbyStationsQuery {
    pub lat: f64,
    pub lng: f64,

    /// Metres
    pub radius: f64,
}

impl NearbyStationsQuery {
    /// Store slot for this lookup. A list is only ever reused for the same
    /// origin and radius.
    pub fn slot(&self) -> String {
        format!("{},{},{}", self.lat, self.lng, self.radius)
    }
}

/// Nearby stations.
#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyStationsResponse {
    pub stations: Vec<Station>,

    /// False when the refresh failed and these are the last known stations.
    pub fresh: bool,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
