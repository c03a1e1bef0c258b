//! Itinerary selection for destination tables.

mod select;

pub use select::{DEFAULT_MIN_WALK_LEG_SECS, ItinerarySelector, select_best};
