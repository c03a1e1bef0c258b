//! Itineraries and their legs.
//!
//! Leg board/alight times are **seconds since midnight of the service day**,
//! not wall-clock milliseconds. Services running past midnight keep counting
//! upward (a 00:30 arrival on a late trip is 88200), so these values can
//! exceed 86400 and must never be compared against epoch timestamps.

use serde::{Deserialize, Serialize};

use super::{Coordinate, DomainError};

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Walk,
    Bicycle,
    Bus,
    Tram,
    Subway,
    Rail,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    Other,
}

impl Mode {
    /// Parse a provider mode string. Unknown modes map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "WALK" => Mode::Walk,
            "BICYCLE" | "BIKE" => Mode::Bicycle,
            "BUS" | "COACH" => Mode::Bus,
            "TRAM" | "STREETCAR" | "LIGHT_RAIL" => Mode::Tram,
            "SUBWAY" | "METRO" => Mode::Subway,
            "RAIL" | "TRAIN" => Mode::Rail,
            "FERRY" => Mode::Ferry,
            "CABLE_CAR" => Mode::CableCar,
            "GONDOLA" => Mode::Gondola,
            "FUNICULAR" => Mode::Funicular,
            _ => Mode::Other,
        }
    }

    /// Whether this mode rides a scheduled vehicle.
    pub fn is_transit(&self) -> bool {
        !matches!(self, Mode::Walk | Mode::Bicycle)
    }
}

/// One end of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,

    /// Stop id, absent for street locations such as the rider's origin.
    pub stop_id: Option<String>,

    pub coordinates: Coordinate,
}

/// Route details carried by transit legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitDetails {
    pub route_short_name: String,
    pub route_color: Option<String>,
    pub route_text_color: Option<String>,
    pub headsign: Option<String>,
}

/// One uninterrupted segment of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub mode: Mode,
    pub duration_seconds: u32,
    pub from: Place,
    pub to: Place,

    /// Seconds since service-day midnight when the leg starts.
    pub board_time: u32,

    /// Seconds since service-day midnight when the leg ends.
    pub alight_time: u32,

    /// Present for transit legs only.
    pub transit: Option<TransitDetails>,
}

impl Leg {
    /// Whether this is a walking leg.
    pub fn is_walk(&self) -> bool {
        self.mode == Mode::Walk
    }

    /// Route short name, for transit legs.
    pub fn route_short_name(&self) -> Option<&str> {
        self.transit.as_ref().map(|t| t.route_short_name.as_str())
    }
}

/// A complete origin to destination trip plan.
///
/// Legs are contiguous in time: each leg boards no earlier than the
/// previous one alights. This is checked on construction and preserved by
/// [`Itinerary::retain_legs`], since removing legs from an ordered sequence
/// keeps it ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<Leg>,
    start_time: i64,
    end_time: i64,
    duration_seconds: u32,
}

impl Itinerary {
    /// Create a validated itinerary.
    ///
    /// `start_time` and `end_time` are epoch milliseconds.
    pub fn new(
        legs: Vec<Leg>,
        start_time: i64,
        end_time: i64,
        duration_seconds: u32,
    ) -> Result<Self, DomainError> {
        if end_time < start_time {
            return Err(DomainError::InvertedItinerary);
        }

        for (index, pair) in legs.windows(2).enumerate() {
            if pair[0].alight_time > pair[1].board_time {
                return Err(DomainError::NonContiguousLegs { index: index + 1 });
            }
        }

        Ok(Self {
            legs,
            start_time,
            end_time,
            duration_seconds,
        })
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Departure, epoch milliseconds.
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Arrival, epoch milliseconds.
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Keep only the legs matching `keep`.
    ///
    /// Aggregate times and duration are left as they are.
    pub fn retain_legs<F>(&mut self, keep: F)
    where
        F: FnMut(&Leg) -> bool,
    {
        self.legs.retain(keep);
    }

    /// Take ownership of the legs.
    pub fn into_legs(self) -> Vec<Leg> {
        self.legs
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    fn place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            stop_id: Some(name.to_lowercase()),
            coordinates: Coordinate::new(45.5, -73.6),
        }
    }

    /// A walk leg between `board` and `board + duration`.
    pub fn walk(board: u32, duration: u32) -> Leg {
        Leg {
            mode: Mode::Walk,
            duration_seconds: duration,
            from: place("A"),
            to: place("B"),
            board_time: board,
            alight_time: board + duration,
            transit: None,
        }
    }

    /// A bus leg on route `route` between `board` and `board + duration`.
    pub fn bus(route: &str, board: u32, duration: u32) -> Leg {
        Leg {
            mode: Mode::Bus,
            duration_seconds: duration,
            from: place("B"),
            to: place("C"),
            board_time: board,
            alight_time: board + duration,
            transit: Some(TransitDetails {
                route_short_name: route.to_string(),
                route_color: Some("009EE0".to_string()),
                route_text_color: Some("FFFFFF".to_string()),
                headsign: Some("Downtown".to_string()),
            }),
        }
    }

    /// An itinerary whose duration is taken from its legs' span.
    pub fn itinerary(legs: Vec<Leg>) -> Itinerary {
        let board = legs.first().map(|l| l.board_time).unwrap_or(0);
        let alight = legs.last().map(|l| l.alight_time).unwrap_or(0);
        let base = 1_710_489_600_000_i64;
        Itinerary::new(
            legs,
            base + i64::from(board) * 1000,
            base + i64::from(alight) * 1000,
            alight - board,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn mode_parsing() {
        assert_eq!(Mode::parse("WALK"), Mode::Walk);
        assert_eq!(Mode::parse("bus"), Mode::Bus);
        assert_eq!(Mode::parse("METRO"), Mode::Subway);
        assert_eq!(Mode::parse("hovercraft"), Mode::Other);
        assert!(Mode::Bus.is_transit());
        assert!(!Mode::Walk.is_transit());
    }

    #[test]
    fn contiguous_legs_accepted() {
        let legs = vec![walk(100, 300), bus("51", 400, 900), walk(1300, 120)];
        let it = Itinerary::new(legs, 0, 1_320_000, 1320).unwrap();
        assert_eq!(it.legs().len(), 3);
    }

    #[test]
    fn overlapping_legs_rejected() {
        let legs = vec![walk(100, 300), bus("51", 350, 900)];
        let err = Itinerary::new(legs, 0, 1_000, 1).unwrap_err();
        assert_eq!(err, DomainError::NonContiguousLegs { index: 1 });
    }

    #[test]
    fn inverted_itinerary_rejected() {
        let err = Itinerary::new(vec![], 10, 5, 0).unwrap_err();
        assert_eq!(err, DomainError::InvertedItinerary);
    }

    #[test]
    fn retain_legs_keeps_aggregates() {
        let mut it = itinerary(vec![walk(0, 60), bus("24", 60, 600)]);
        let duration = it.duration_seconds();
        it.retain_legs(|l| !l.is_walk());
        assert_eq!(it.legs().len(), 1);
        assert_eq!(it.duration_seconds(), duration);
    }

    #[test]
    fn leg_serializes_camel_case() {
        let json = serde_json::to_value(bus("80", 0, 60)).unwrap();
        assert_eq!(json["mode"], "BUS");
        assert_eq!(json["durationSeconds"], 60);
        assert_eq!(json["transit"]["routeShortName"], "80");
    }
}
