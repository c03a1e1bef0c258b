//! Route patterns and their merged form.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A stop served by a route pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRef {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
}

/// One static variant of a route's path, such as express vs. local or
/// inbound vs. outbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePattern {
    pub id: String,

    /// Route this pattern belongs to.
    pub route_id: String,

    pub route_short_name: Option<String>,
    pub headsign: Option<String>,
    pub direction: Option<u8>,

    /// Stops in travel order.
    pub stops: Vec<StopRef>,

    /// Line geometry.
    pub coordinates: Vec<Coordinate>,
}

/// All patterns of a route folded into one stop set and one line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedPattern {
    /// Unique by stop id, in first-seen order.
    pub stops: Vec<StopRef>,

    /// Geometry of the pattern with the most stops.
    pub coordinates: Vec<Coordinate>,
}

impl MergedPattern {
    /// The value of merging no patterns at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty() && self.coordinates.is_empty()
    }

    /// Re-express this merge result as a single pattern of `route_id`.
    pub fn as_pattern(&self, route_id: impl Into<String>) -> RoutePattern {
        let route_id = route_id.into();
        RoutePattern {
            id: format!("{route_id}:merged"),
            route_id,
            route_short_name: None,
            headsign: None,
            direction: None,
            stops: self.stops.clone(),
            coordinates: self.coordinates.clone(),
        }
    }
}
