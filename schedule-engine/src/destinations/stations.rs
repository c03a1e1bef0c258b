//! Nearby bike-share stations.
//!
//! Same policy as destination rows: a failed refresh keeps the last list
//! rather than blanking the screen.

use tracing::warn;

use crate::config::EngineConfig;
use crate::domain::{Coordinate, Station};
use crate::error::EngineError;
use crate::source::{NearbyStationSource, bounded};

/// Stations around an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct StationResolution {
    pub stations: Vec<Station>,

    /// False when the fetch failed and `stations` is the previous list.
    pub fresh: bool,
}

/// Fetch stations within `radius` metres of `origin`.
///
/// Only malformed input is an error; upstream failures fall back to
/// `previous`.
pub async fn resolve_nearby_stations<S: NearbyStationSource>(
    source: &S,
    config: &EngineConfig,
    origin: Coordinate,
    radius: f64,
    previous: &[Station],
) -> Result<StationResolution, EngineError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(EngineError::InvalidInput(format!(
            "radius must be positive, got {radius}"
        )));
    }
    if !origin.is_valid() {
        return Err(EngineError::InvalidInput(format!("invalid origin {origin}")));
    }

    let fetched = bounded(
        config.request_timeout(),
        "nearby stations",
        source.nearby(origin, radius),
    )
    .await;

    match fetched {
        Ok(stations) => Ok(StationResolution {
            stations,
            fresh: true,
        }),
        Err(e) => {
            warn!(error = %e, kept = previous.len(), "Station fetch failed, keeping previous list");
            Ok(StationResolution {
                stations: previous.to_vec(),
                fresh: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::MockTransitClient;

    fn station(id: &str) -> Station {
        Station {
            id: id.into(),
            name: format!("Station {id}"),
            coordinates: Coordinate::new(45.5, -73.6),
            bikes_available: Some(4),
            docks_available: Some(11),
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(45.5, -73.57)
    }

    #[tokio::test]
    async fn fresh_stations() {
        let client = MockTransitClient::new().with_stations(vec![station("1")], Duration::ZERO);
        let config = EngineConfig::default();

        let res = resolve_nearby_stations(&client, &config, origin(), 500.0, &[])
            .await
            .unwrap();
        assert!(res.fresh);
        assert_eq!(res.stations, vec![station("1")]);
    }

    #[tokio::test]
    async fn failure_keeps_previous() {
        let client = MockTransitClient::new().with_stations_failure(503);
        let config = EngineConfig::default();
        let previous = vec![station("old")];

        let res = resolve_nearby_stations(&client, &config, origin(), 500.0, &previous)
            .await
            .unwrap();
        assert!(!res.fresh);
        assert_eq!(res.stations, previous);
    }

    #[tokio::test]
    async fn bad_radius_is_invalid_input() {
        let client = MockTransitClient::new();
        let config = EngineConfig::default();

        for radius in [0.0, -5.0, f64::NAN] {
            let err = resolve_nearby_stations(&client, &config, origin(), radius, &[])
                .await
                .unwrap_err();
            assert!(matches!(err, EngineError::InvalidInput(_)));
        }
        assert_eq!(client.station_calls().await, 0);
    }
}
