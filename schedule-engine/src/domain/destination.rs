//! Destinations and their resolved schedule rows.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Leg};

/// A place the rider may want to reach. Identity is the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub coordinates: Coordinate,
}

impl Destination {
    pub fn new(name: impl Into<String>, coordinates: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

/// One row of a destination table.
///
/// `route == None` means the destination could not be reached or its
/// fetch failed. That is an expected terminal state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResult {
    pub name: String,
    pub route: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub travel: Option<String>,
    pub legs: Vec<Leg>,
    pub coordinates: Coordinate,

    /// Whether the row is shown; decided by the destination's position.
    pub display: bool,
}

impl DestinationResult {
    /// A row with no schedule data.
    pub fn placeholder(destination: &Destination, display: bool) -> Self {
        Self {
            name: destination.name.clone(),
            route: None,
            departure: None,
            arrival: None,
            travel: None,
            legs: Vec::new(),
            coordinates: destination.coordinates,
            display,
        }
    }

    /// Whether any schedule field carries data.
    pub fn has_schedule(&self) -> bool {
        self.departure.is_some()
            || self.arrival.is_some()
            || self.travel.is_some()
            || !self.legs.is_empty()
    }
}
