//! Bike-share stations.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A bike-share docking station near a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
    pub bikes_available: Option<u32>,
    pub docks_available: Option<u32>,
}
