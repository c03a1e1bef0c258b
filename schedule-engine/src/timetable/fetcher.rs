//! Pattern and timetable retrieval for a single route.
//!
//! When nothing is scheduled in the next few hours the fetcher looks once
//! more, at the rest of tonight's service or at tomorrow's. It never looks
//! further: a persistently empty schedule is reported as empty.

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{MergedPattern, RouteInfo, TimeWindow, Trip, count_stop_departures};
use crate::error::EngineError;
use crate::patterns::{merge_patterns, patterns_for_route};
use crate::source::{RoutePatternSource, RouteTimetableSource, bounded};
use crate::window::TimeWindowCalculator;

/// Everything a fixed-route slide needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    /// `None` when skipped or when the route has no patterns.
    pub pattern: Option<MergedPattern>,

    /// Possibly empty: nothing scheduled in either window.
    pub timetable: Vec<Trip>,

    pub is_next_day: bool,
    pub is_later_today: bool,
}

/// Fetches patterns and timetables for fixed routes.
pub struct RouteScheduleFetcher<'a, S> {
    source: &'a S,
    config: &'a EngineConfig,
    windows: TimeWindowCalculator,
}

impl<'a, S> RouteScheduleFetcher<'a, S>
where
    S: RoutePatternSource + RouteTimetableSource,
{
    pub fn new(source: &'a S, config: &'a EngineConfig) -> Self {
        Self {
            source,
            config,
            windows: TimeWindowCalculator::new(config.window.clone()),
        }
    }

    /// Fetch the merged pattern and the timetable of `route`.
    ///
    /// Upstream failures are returned as errors. An empty timetable is not
    /// an error; it triggers a single fallback to the next service period.
    pub async fn fetch_complete_route_data(
        &self,
        route: &RouteInfo,
        skip_patterns: bool,
    ) -> Result<RouteData, EngineError> {
        let pattern = if skip_patterns {
            None
        } else {
            self.fetch_pattern(route).await?
        };

        let (timetable, window) = self.fetch_timetable(route, false).await?;

        let (timetable, window) = if count_stop_departures(&timetable) > 0 {
            (timetable, window)
        } else {
            debug!(
                route = %route.route_id,
                "No departures in current window, trying next service period"
            );
            self.fetch_timetable(route, true).await?
        };

        Ok(RouteData {
            pattern,
            timetable,
            is_next_day: window.is_next_day,
            is_later_today: window.is_later_today,
        })
    }

    /// Merge the route's patterns, or `None` if it has none.
    async fn fetch_pattern(&self, route: &RouteInfo) -> Result<Option<MergedPattern>, EngineError> {
        let all = bounded(
            self.config.request_timeout(),
            "route patterns",
            self.source
                .list_patterns(&route.organization_id, &route.service_id),
        )
        .await?;

        let patterns = patterns_for_route(all, route);
        if patterns.is_empty() {
            debug!(route = %route.route_id, "Route has no patterns");
            return Ok(None);
        }

        Ok(Some(merge_patterns(&patterns)))
    }

    async fn fetch_timetable(
        &self,
        route: &RouteInfo,
        fetch_next_period: bool,
    ) -> Result<(Vec<Trip>, TimeWindow), EngineError> {
        let window = self.windows.calculate(fetch_next_period);
        window.validate()?;

        let trips = bounded(
            self.config.request_timeout(),
            "route timetable",
            self.source.get_timetable(
                &route.organization_id,
                &route.service_id,
                &route.route_id,
                window,
            ),
        )
        .await?;

        debug!(
            route = %route.route_id,
            trips = trips.len(),
            is_next_day = window.is_next_day,
            "Fetched timetable"
        );

        Ok((trips, window))
    }
}
