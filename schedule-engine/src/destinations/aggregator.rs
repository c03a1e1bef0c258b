//! Concurrent destination resolution.

use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::domain::{Coordinate, Destination, DestinationResult, Itinerary};
use crate::error::EngineError;
use crate::planner::ItinerarySelector;
use crate::source::{TripPlanner, bounded};

use super::format::{format_clock, format_travel, route_summary};

/// Outcome of resolving a batch of destinations.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// One row per destination, in input order.
    pub results: Vec<DestinationResult>,

    /// Whether any row carries schedule data. When false the caller shows
    /// a "data currently unavailable" banner instead of per-row blanks.
    pub any_succeeded: bool,
}

/// Align previous rows with the current destination list.
///
/// Rows for names no longer present are dropped; destinations without a
/// previous row get an empty placeholder. The result has one row per
/// destination in input order, ready to display before any call lands.
/// With duplicate names in `previous`, the later row wins.
pub fn reconcile_previous(
    destinations: &[Destination],
    previous: &[DestinationResult],
    max_displayed: usize,
) -> Vec<DestinationResult> {
    let by_name: HashMap<&str, &DestinationResult> =
        previous.iter().map(|r| (r.name.as_str(), r)).collect();

    destinations
        .iter()
        .enumerate()
        .map(|(index, destination)| match by_name.get(destination.name.as_str()) {
            Some(row) => (*row).clone(),
            None => DestinationResult::placeholder(destination, index < max_displayed),
        })
        .collect()
}

/// Plans trips from one origin to many destinations at once.
pub struct DestinationScheduleAggregator<'a, P> {
    planner: &'a P,
    config: &'a EngineConfig,
    selector: ItinerarySelector,
}

impl<'a, P: TripPlanner> DestinationScheduleAggregator<'a, P> {
    pub fn new(planner: &'a P, config: &'a EngineConfig) -> Self {
        Self {
            planner,
            config,
            selector: ItinerarySelector::new(config.min_walk_leg_secs),
        }
    }

    /// Resolve every destination against `origin`.
    ///
    /// All requests start together and every one is waited for. Per
    /// destination:
    /// - success: a fresh row from the best itinerary
    /// - no itinerary found: a row with no route
    /// - failure: the previous row if there is one, else a row with no route
    ///
    /// Dropping the returned future cancels every request in flight.
    pub async fn resolve_destinations(
        &self,
        origin: Coordinate,
        destinations: &[Destination],
        previous: &[DestinationResult],
    ) -> Resolution {
        let max_displayed = self.config.max_displayed_destinations;
        let mut results = reconcile_previous(destinations, previous, max_displayed);

        let depart_after = Utc::now();
        let requests = destinations
            .iter()
            .map(|destination| self.resolve_one(origin, destination, depart_after));

        // Settle-all: outcomes come back in request order, not completion order.
        let outcomes = join_all(requests).await;

        for (index, (outcome, destination)) in outcomes.into_iter().zip(destinations).enumerate() {
            let display = index < max_displayed;
            match outcome {
                Ok(Some(itinerary)) => {
                    results[index] = build_result(destination, itinerary, display);
                }
                Ok(None) => {
                    debug!(destination = %destination.name, "No itinerary found");
                    results[index] = DestinationResult::placeholder(destination, display);
                }
                Err(e) => {
                    warn!(
                        destination = %destination.name,
                        error = %e,
                        retained = results[index].has_schedule(),
                        "Destination fetch failed, keeping previous row"
                    );
                }
            }
        }

        let any_succeeded = results.iter().any(DestinationResult::has_schedule);
        debug!(
            destinations = destinations.len(),
            any_succeeded, "Resolved destinations"
        );

        Resolution {
            results,
            any_succeeded,
        }
    }

    /// Plan to one destination and pick the best itinerary.
    ///
    /// `Ok(None)` means the planner answered but found no trip.
    async fn resolve_one(
        &self,
        origin: Coordinate,
        destination: &Destination,
        depart_after: DateTime<Utc>,
    ) -> Result<Option<Itinerary>, EngineError> {
        let itineraries = bounded(
            self.config.request_timeout(),
            "trip planner",
            self.planner
                .plan(origin, destination.coordinates, depart_after),
        )
        .await?;

        if itineraries.is_empty() {
            return Ok(None);
        }

        self.selector.select_best(itineraries).map(Some)
    }
}

fn build_result(
    destination: &Destination,
    itinerary: Itinerary,
    display: bool,
) -> DestinationResult {
    let departure = format_clock(itinerary.start_time(), &Local);
    let arrival = format_clock(itinerary.end_time(), &Local);
    let travel = Some(format_travel(itinerary.duration_seconds()));
    let legs = itinerary.into_legs();

    DestinationResult {
        name: destination.name.clone(),
        route: Some(route_summary(&legs)),
        departure,
        arrival,
        travel,
        legs,
        coordinates: destination.coordinates,
        display,
    }
}
