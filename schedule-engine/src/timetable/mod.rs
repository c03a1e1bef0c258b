//! Fixed-route timetables with service-day fallback.

mod fetcher;

pub use fetcher::{RouteData, RouteScheduleFetcher};
