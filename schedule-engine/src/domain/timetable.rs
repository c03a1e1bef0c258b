//! Query windows and timetable trips.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A `[start_time, end_time)` query window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start_time: i64,
    pub end_time: i64,

    /// The window looks past the current service period.
    pub is_next_day: bool,

    /// The window covers late service still belonging to today.
    pub is_later_today: bool,
}

impl TimeWindow {
    /// Check that the window spans a positive interval.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_time >= self.end_time {
            return Err(DomainError::InvalidWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }
}

/// A scheduled departure from one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Seconds since service-day midnight.
    pub scheduled: u32,

    /// Real-time prediction, seconds since service-day midnight.
    pub realtime: Option<u32>,

    /// Epoch seconds of the service day's midnight.
    pub service_day: i64,
}

/// One trip of a route as seen in a timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_id: String,
    pub headsign: Option<String>,

    /// Departures keyed by stop id.
    pub stop_departures: HashMap<String, Departure>,
}

/// Total number of stop departures across `trips`.
///
/// A timetable with trips but no departures counts as empty.
pub fn count_stop_departures(trips: &[Trip]) -> usize {
    trips.iter().map(|t| t.stop_departures.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_validation() {
        let ok = TimeWindow {
            start_time: 0,
            end_time: 10,
            is_next_day: false,
            is_later_today: false,
        };
        assert!(ok.validate().is_ok());

        let bad = TimeWindow {
            start_time: 10,
            end_time: 10,
            ..ok
        };
        assert_eq!(
            bad.validate(),
            Err(DomainError::InvalidWindow { start: 10, end: 10 })
        );
    }

    #[test]
    fn trips_without_departures_count_as_empty() {
        let trips = vec![Trip {
            trip_id: "t1".into(),
            headsign: None,
            stop_departures: HashMap::new(),
        }];
        assert_eq!(count_stop_departures(&trips), 0);
        assert_eq!(count_stop_departures(&[]), 0);
    }
}
