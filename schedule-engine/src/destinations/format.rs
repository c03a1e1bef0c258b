//! Display strings for destination rows.

use chrono::{TimeZone, Timelike};

use crate::domain::Leg;

/// `HH:MM` of `epoch_ms` in `tz`, or `None` if out of range.
pub fn format_clock<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> Option<String> {
    let dt = tz.timestamp_millis_opt(epoch_ms).single()?;
    Some(format!("{:02}:{:02}", dt.hour(), dt.minute()))
}

/// Travel time rounded to the minute: `"25 min"`, `"1 h 0 min"`, `"1 h 5 min"`.
pub fn format_travel(duration_seconds: u32) -> String {
    let mins = duration_seconds.saturating_add(30) / 60;
    match (mins / 60, mins % 60) {
        (0, m) => format!("{m} min"),
        (h, m) => format!("{h} h {m} min"),
    }
}

/// Routes ridden, joined with arrows; `"Walk"` when nothing is ridden.
pub fn route_summary(legs: &[Leg]) -> String {
    let routes: Vec<&str> = legs
        .iter()
        .filter(|l| l.mode.is_transit())
        .filter_map(|l| l.route_short_name())
        .filter(|name| !name.is_empty())
        .collect();

    if routes.is_empty() {
        "Walk".to_string()
    } else {
        routes.join(" → ")
    }
}
