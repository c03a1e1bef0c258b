//! Domain types for the schedule engine.
//!
//! Everything here is request-scoped plain data. Types with invariants
//! check them at construction time.

mod coordinate;
mod destination;
mod error;
mod itinerary;
mod pattern;
mod route;
mod station;
mod timetable;

pub use coordinate::Coordinate;
pub use destination::{Destination, DestinationResult};
pub use error::DomainError;
pub use itinerary::{Itinerary, Leg, Mode, Place, TransitDetails};
pub use pattern::{MergedPattern, RoutePattern, StopRef};
pub use route::RouteInfo;
pub use station::Station;
pub use timetable::{Departure, TimeWindow, Trip, count_stop_departures};

#[cfg(test)]
pub(crate) use itinerary::test_support;
