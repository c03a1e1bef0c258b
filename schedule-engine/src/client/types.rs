//! Transit API response DTOs.
//!
//! These types map directly to the provider's JSON responses. They use
//! `Option` liberally because the provider omits fields rather than sending
//! null values in many cases.

use serde::Deserialize;

/// Response from the `plan` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Absent when the planner found no path at all.
    pub plan: Option<PlanDto>,

    /// Planner-side error, e.g. origin outside the network.
    pub error: Option<PlanErrorDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDto {
    #[serde(default)]
    pub itineraries: Vec<ItineraryDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanErrorDto {
    pub id: Option<i32>,
    pub msg: Option<String>,
}

/// One candidate trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDto {
    /// Epoch milliseconds.
    pub start_time: i64,

    /// Epoch milliseconds.
    pub end_time: i64,

    /// Seconds.
    pub duration: f64,

    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// One leg of a candidate trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub mode: String,

    /// Seconds.
    pub duration: f64,

    /// Epoch milliseconds.
    pub start_time: i64,

    /// Epoch milliseconds.
    pub end_time: i64,

    pub from: PlaceDto,
    pub to: PlaceDto,

    pub route_short_name: Option<String>,
    pub route_color: Option<String>,
    pub route_text_color: Option<String>,
    pub headsign: Option<String>,

    /// Service date as `YYYYMMDD`, present on transit legs.
    pub service_date: Option<String>,

    /// Agency UTC offset in milliseconds.
    pub agency_time_zone_offset: Option<i64>,
}

/// A leg endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    pub name: Option<String>,
    pub stop_id: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// A pattern as listed by the `patterns` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDto {
    pub id: String,
    pub route_id: String,
    pub route_short_name: Option<String>,
    pub headsign: Option<String>,
    pub direction_id: Option<u8>,

    #[serde(default)]
    pub stops: Vec<StopDto>,

    /// Line geometry as `[lat, lon]` pairs.
    #[serde(default)]
    pub geometry: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// A trip as listed by the `timetable` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub trip_id: String,
    pub headsign: Option<String>,

    #[serde(default)]
    pub stop_times: Vec<StopTimeDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimeDto {
    pub stop_id: String,

    /// Seconds since service-day midnight.
    pub scheduled_departure: Option<u32>,

    /// Seconds since service-day midnight.
    pub realtime_departure: Option<u32>,

    /// Epoch seconds of service-day midnight.
    pub service_day: i64,
}

/// A bike-share station from the `stations/nearby` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub bikes_available: Option<u32>,
    pub docks_available: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_without_itineraries_parses() {
        let resp: PlanResponse =
            serde_json::from_str(r#"{"plan": {}, "error": {"id": 404, "msg": "PATH_NOT_FOUND"}}"#)
                .unwrap();
        assert!(resp.plan.unwrap().itineraries.is_empty());
        assert_eq!(resp.error.unwrap().id, Some(404));
    }

    #[test]
    fn pattern_parses() {
        let json = r#"{
            "id": "stm:24:0",
            "routeId": "stm:24",
            "routeShortName": "24",
            "directionId": 0,
            "stops": [{"id": "s1", "name": "Sherbrooke", "lat": 45.5, "lon": -73.6}],
            "geometry": [[45.5, -73.6], [45.51, -73.59]]
        }"#;
        let p: PatternDto = serde_json::from_str(json).unwrap();
        assert_eq!(p.route_short_name.as_deref(), Some("24"));
        assert_eq!(p.stops.len(), 1);
        assert_eq!(p.geometry.len(), 2);
    }
}
