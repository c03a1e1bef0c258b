//! Destination tables: concurrent per-destination trip planning.
//!
//! Each destination is planned independently against one origin. Calls are
//! joined with settle-all semantics so one failing destination never blanks
//! the others, and a failed destination keeps its last known-good row.

mod aggregator;
mod format;
mod generation;
mod stations;

pub use aggregator::{DestinationScheduleAggregator, Resolution, reconcile_previous};
pub use format::{format_clock, format_travel, route_summary};
pub use generation::{Generation, ResultStore};
pub use stations::{StationResolution, resolve_nearby_stations};
