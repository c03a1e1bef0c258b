//! Conversion from transit API DTOs to domain types.
//!
//! The planner reports leg times as epoch milliseconds; the domain wants
//! seconds since service-day midnight. All legs of one itinerary are measured
//! from the same midnight so their ordering survives the conversion.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime};
use tracing::warn;

use crate::domain::{
    Coordinate, Departure, DomainError, Itinerary, Leg, Mode, Place, RoutePattern, Station,
    StopRef, TransitDetails, Trip,
};

use super::types::{
    ItineraryDto, LegDto, PatternDto, PlaceDto, PlanResponse, StationDto, TripDto,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a service date
    #[error("invalid service date: {0}")]
    InvalidServiceDate(String),

    /// Timestamp outside the representable range
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),

    /// Converted itinerary violates a domain invariant
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(#[from] DomainError),
}

/// Convert a plan response to itineraries.
///
/// Itineraries that fail to convert are logged and skipped rather than
/// failing the whole plan. No plan at all is an empty list.
pub fn convert_plan(response: &PlanResponse) -> Vec<Itinerary> {
    let Some(plan) = &response.plan else {
        return Vec::new();
    };

    let mut itineraries = Vec::with_capacity(plan.itineraries.len());
    for (index, dto) in plan.itineraries.iter().enumerate() {
        match convert_itinerary(dto) {
            Ok(itinerary) => itineraries.push(itinerary),
            Err(e) => warn!(index, error = %e, "Skipping unconvertible itinerary"),
        }
    }
    itineraries
}

/// Convert a single itinerary.
pub fn convert_itinerary(dto: &ItineraryDto) -> Result<Itinerary, ConversionError> {
    let offset_ms = dto
        .legs
        .iter()
        .find_map(|l| l.agency_time_zone_offset)
        .unwrap_or(0);

    // A walk to the first stop can begin before the service day of the
    // ride it feeds, so measure from whichever midnight comes first.
    let earliest_ms = dto
        .legs
        .iter()
        .map(|l| l.start_time)
        .fold(dto.start_time, i64::min);
    let start_date = local_date(earliest_ms, offset_ms)?;
    let service_date = match dto.legs.iter().find_map(|l| l.service_date.as_deref()) {
        Some(s) => parse_service_date(s)?.min(start_date),
        None => start_date,
    };
    let midnight_ms = service_midnight_ms(service_date, offset_ms);

    let legs = dto
        .legs
        .iter()
        .map(|leg| convert_leg(leg, midnight_ms))
        .collect::<Result<Vec<_>, _>>()?;

    let itinerary = Itinerary::new(
        legs,
        dto.start_time,
        dto.end_time,
        whole_seconds(dto.duration),
    )?;
    Ok(itinerary)
}

fn convert_leg(dto: &LegDto, midnight_ms: i64) -> Result<Leg, ConversionError> {
    let mode = Mode::parse(&dto.mode);

    let transit = mode.is_transit().then(|| TransitDetails {
        route_short_name: dto.route_short_name.clone().unwrap_or_default(),
        route_color: dto.route_color.clone(),
        route_text_color: dto.route_text_color.clone(),
        headsign: dto.headsign.clone(),
    });

    Ok(Leg {
        mode,
        duration_seconds: whole_seconds(dto.duration),
        from: convert_place(&dto.from),
        to: convert_place(&dto.to),
        board_time: seconds_since(midnight_ms, dto.start_time)?,
        alight_time: seconds_since(midnight_ms, dto.end_time)?,
        transit,
    })
}

fn convert_place(dto: &PlaceDto) -> Place {
    Place {
        name: dto.name.clone().unwrap_or_default(),
        stop_id: dto.stop_id.clone(),
        coordinates: Coordinate::new(dto.lat, dto.lon),
    }
}

/// Convert a pattern listing.
pub fn convert_pattern(dto: &PatternDto) -> Result<RoutePattern, ConversionError> {
    let stops = dto
        .stops
        .iter()
        .map(|s| {
            let id = s.id.clone().ok_or(ConversionError::MissingField("stop id"))?;
            Ok(StopRef {
                id,
                name: s.name.clone().unwrap_or_default(),
                coordinates: Coordinate::new(s.lat, s.lon),
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    Ok(RoutePattern {
        id: dto.id.clone(),
        route_id: dto.route_id.clone(),
        route_short_name: dto.route_short_name.clone(),
        headsign: dto.headsign.clone(),
        direction: dto.direction_id,
        stops,
        coordinates: dto
            .geometry
            .iter()
            .map(|[lat, lon]| Coordinate::new(*lat, *lon))
            .collect(),
    })
}

/// Convert a timetable trip. Stop times without a scheduled departure
/// (e.g. drop-off only at the terminus) are left out.
pub fn convert_trip(dto: &TripDto) -> Trip {
    let stop_departures: HashMap<String, Departure> = dto
        .stop_times
        .iter()
        .filter_map(|st| {
            let scheduled = st.scheduled_departure?;
            Some((
                st.stop_id.clone(),
                Departure {
                    scheduled,
                    realtime: st.realtime_departure,
                    service_day: st.service_day,
                },
            ))
        })
        .collect();

    Trip {
        trip_id: dto.trip_id.clone(),
        headsign: dto.headsign.clone(),
        stop_departures,
    }
}

pub fn convert_station(dto: &StationDto) -> Station {
    Station {
        id: dto.id.clone(),
        name: dto.name.clone().unwrap_or_else(|| dto.id.clone()),
        coordinates: Coordinate::new(dto.lat, dto.lon),
        bikes_available: dto.bikes_available,
        docks_available: dto.docks_available,
    }
}

fn parse_service_date(s: &str) -> Result<NaiveDate, ConversionError> {
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .map_err(|_| ConversionError::InvalidServiceDate(s.to_string()))
}

/// Calendar date of `epoch_ms` at the agency's UTC offset.
fn local_date(epoch_ms: i64, offset_ms: i64) -> Result<NaiveDate, ConversionError> {
    DateTime::from_timestamp_millis(epoch_ms + offset_ms)
        .map(|dt| dt.date_naive())
        .ok_or(ConversionError::TimestampOutOfRange(epoch_ms))
}

/// Epoch milliseconds of local midnight starting `date`.
fn service_midnight_ms(date: NaiveDate, offset_ms: i64) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() - offset_ms
}

fn seconds_since(midnight_ms: i64, epoch_ms: i64) -> Result<u32, ConversionError> {
    let secs = (epoch_ms - midnight_ms).div_euclid(1000);
    u32::try_from(secs).map_err(|_| ConversionError::TimestampOutOfRange(epoch_ms))
}

fn whole_seconds(secs: f64) -> u32 {
    if secs.is_finite() && secs > 0.0 {
        secs.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::{PlanDto, StopDto, StopTimeDto};
    use chrono::{TimeZone, Utc};

    const OFFSET_MS: i64 = -4 * 3_600_000;

    /// Epoch ms of `hh:mm` on 2024-03-15 at UTC-4.
    fn local_ms(hour: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, min, 0)
            .unwrap()
            .timestamp_millis()
            - OFFSET_MS
    }

    fn place(name: &str) -> PlaceDto {
        PlaceDto {
            name: Some(name.to_string()),
            stop_id: None,
            lat: 45.5,
            lon: -73.6,
        }
    }

    fn leg(mode: &str, start: i64, end: i64, service_date: Option<&str>) -> LegDto {
        LegDto {
            mode: mode.to_string(),
            duration: ((end - start) / 1000) as f64,
            start_time: start,
            end_time: end,
            from: place("from"),
            to: place("to"),
            route_short_name: (mode != "WALK").then(|| "24".to_string()),
            route_color: None,
            route_text_color: None,
            headsign: None,
            service_date: service_date.map(String::from),
            agency_time_zone_offset: Some(OFFSET_MS),
        }
    }

    #[test]
    fn leg_times_are_seconds_since_service_midnight() {
        let dto = ItineraryDto {
            start_time: local_ms(8, 0),
            end_time: local_ms(8, 30),
            duration: 1800.0,
            legs: vec![
                leg("WALK", local_ms(8, 0), local_ms(8, 5), None),
                leg("BUS", local_ms(8, 5), local_ms(8, 30), Some("20240315")),
            ],
        };

        let it = convert_itinerary(&dto).unwrap();
        assert_eq!(it.legs()[0].board_time, 8 * 3600);
        assert_eq!(it.legs()[1].board_time, 8 * 3600 + 300);
        assert_eq!(it.legs()[1].alight_time, 8 * 3600 + 1800);
        assert_eq!(it.legs()[1].route_short_name(), Some("24"));
        assert!(it.legs()[0].transit.is_none());
        assert_eq!(it.duration_seconds(), 1800);
    }

    #[test]
    fn after_midnight_counts_past_one_day() {
        // Late trip on the 15th's service arriving 00:30 on the 16th.
        let start = local_ms(23, 50);
        let end = start + 40 * 60 * 1000;
        let dto = ItineraryDto {
            start_time: start,
            end_time: end,
            duration: 2400.0,
            legs: vec![leg("BUS", start, end, Some("20240315"))],
        };

        let it = convert_itinerary(&dto).unwrap();
        assert_eq!(it.legs()[0].alight_time, 24 * 3600 + 30 * 60);
    }

    #[test]
    fn walk_before_midnight_feeds_next_service_day() {
        // Walk 23:55 -> 00:05 on the 14th/15th, then a bus on the 15th's service.
        let walk_start = local_ms(0, 0) - 5 * 60 * 1000;
        let bus_start = local_ms(0, 5);
        let bus_end = local_ms(0, 25);
        let dto = ItineraryDto {
            start_time: walk_start,
            end_time: bus_end,
            duration: 1800.0,
            legs: vec![
                leg("WALK", walk_start, bus_start, None),
                leg("BUS", bus_start, bus_end, Some("20240315")),
            ],
        };

        let it = convert_itinerary(&dto).unwrap();
        assert_eq!(it.legs()[0].board_time, 23 * 3600 + 55 * 60);
        assert_eq!(it.legs()[1].board_time, 24 * 3600 + 5 * 60);
        assert_eq!(it.legs()[1].alight_time, 24 * 3600 + 25 * 60);

        let plan = PlanResponse {
            plan: Some(PlanDto {
                itineraries: vec![dto],
            }),
            error: None,
        };
        assert_eq!(convert_plan(&plan).len(), 1);
    }

    #[test]
    fn bad_service_date_is_rejected() {
        let dto = ItineraryDto {
            start_time: local_ms(8, 0),
            end_time: local_ms(8, 10),
            duration: 600.0,
            legs: vec![leg("BUS", local_ms(8, 0), local_ms(8, 10), Some("15/03/2024"))],
        };
        assert!(matches!(
            convert_itinerary(&dto),
            Err(ConversionError::InvalidServiceDate(_))
        ));
    }

    #[test]
    fn overlapping_legs_are_skipped_from_plan() {
        let good = ItineraryDto {
            start_time: local_ms(8, 0),
            end_time: local_ms(8, 10),
            duration: 600.0,
            legs: vec![leg("BUS", local_ms(8, 0), local_ms(8, 10), None)],
        };
        let bad = ItineraryDto {
            start_time: local_ms(8, 0),
            end_time: local_ms(8, 20),
            duration: 1200.0,
            legs: vec![
                leg("BUS", local_ms(8, 0), local_ms(8, 15), None),
                leg("WALK", local_ms(8, 10), local_ms(8, 20), None),
            ],
        };
        let response = PlanResponse {
            plan: Some(PlanDto {
                itineraries: vec![bad, good],
            }),
            error: None,
        };

        let plan = convert_plan(&response);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].duration_seconds(), 600);
    }

    #[test]
    fn missing_plan_is_empty() {
        let response = PlanResponse {
            plan: None,
            error: None,
        };
        assert!(convert_plan(&response).is_empty());
    }

    #[test]
    fn pattern_requires_stop_ids() {
        let dto = PatternDto {
            id: "p".into(),
            route_id: "r".into(),
            route_short_name: None,
            headsign: None,
            direction_id: None,
            stops: vec![StopDto {
                id: None,
                name: None,
                lat: 0.0,
                lon: 0.0,
            }],
            geometry: vec![],
        };
        assert!(matches!(
            convert_pattern(&dto),
            Err(ConversionError::MissingField("stop id"))
        ));
    }

    #[test]
    fn trip_skips_stop_times_without_departure() {
        let dto = TripDto {
            trip_id: "t1".into(),
            headsign: Some("Angrignon".into()),
            stop_times: vec![
                StopTimeDto {
                    stop_id: "a".into(),
                    scheduled_departure: Some(3600),
                    realtime_departure: None,
                    service_day: 1_710_475_200,
                },
                StopTimeDto {
                    stop_id: "b".into(),
                    scheduled_departure: None,
                    realtime_departure: None,
                    service_day: 1_710_475_200,
                },
            ],
        };

        let trip = convert_trip(&dto);
        assert_eq!(trip.stop_departures.len(), 1);
        assert_eq!(trip.stop_departures["a"].scheduled, 3600);
    }
}
