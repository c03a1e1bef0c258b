//! Merge several patterns of one route into a single stop set and line.

use std::collections::HashSet;

use crate::domain::{MergedPattern, RouteInfo, RoutePattern};

/// Merge `patterns` into one deduplicated stop set and one geometry.
///
/// Stops are the union over all patterns in input order; the first pattern
/// mentioning a stop id fixes its name and position. The geometry is taken
/// from the pattern with the most stops, the first one on ties. That line
/// need not pass through every merged stop.
///
/// No patterns yields [`MergedPattern::empty`].
pub fn merge_patterns(patterns: &[RoutePattern]) -> MergedPattern {
    let mut reference: Option<&RoutePattern> = None;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stops = Vec::new();

    for pattern in patterns {
        if reference.is_none_or(|r| pattern.stops.len() > r.stops.len()) {
            reference = Some(pattern);
        }

        for stop in &pattern.stops {
            if seen.insert(stop.id.as_str()) {
                stops.push(stop.clone());
            }
        }
    }

    match reference {
        Some(reference) => MergedPattern {
            stops,
            coordinates: reference.coordinates.clone(),
        },
        None => MergedPattern::empty(),
    }
}

/// Keep the patterns belonging to `route`, by route id or short name.
pub fn patterns_for_route(patterns: Vec<RoutePattern>, route: &RouteInfo) -> Vec<RoutePattern> {
    patterns.into_iter().filter(|p| route.owns(p)).collect()
}
