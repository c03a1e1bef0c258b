//! Transit API HTTP client.
//!
//! Provides async methods for the provider's plan, pattern, timetable and
//! bike-share endpoints. Handles authentication, concurrency limiting, and
//! conversion to domain types.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, Itinerary, RoutePattern, Station, TimeWindow, Trip};
use crate::source::{NearbyStationSource, RoutePatternSource, RouteTimetableSource, TripPlanner};

use super::convert::{convert_pattern, convert_plan, convert_station, convert_trip};
use super::error::ClientError;
use super::types::{PatternDto, PlanResponse, StationDto, TripDto};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL of the provider
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new config for the given provider.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transit API client.
///
/// Uses a semaphore to limit concurrent requests, since destination fan-out
/// can otherwise burst past the provider's rate limit.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| ClientError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert("x-api-key", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// GET `path` with `query` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ClientError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Transit API request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ClientError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Plan a trip between two points.
    pub async fn plan_trip(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        depart_after: DateTime<Utc>,
    ) -> Result<Vec<Itinerary>, ClientError> {
        let response: PlanResponse = self
            .get_json(
                "/plan",
                &[
                    ("fromPlace", origin.as_place()),
                    ("toPlace", destination.as_place()),
                    ("time", depart_after.timestamp_millis().to_string()),
                ],
            )
            .await?;

        if let Some(error) = &response.error {
            debug!(
                id = ?error.id,
                msg = error.msg.as_deref().unwrap_or(""),
                "Planner reported no path"
            );
        }

        Ok(convert_plan(&response))
    }

    /// List every pattern of a service.
    pub async fn get_patterns(
        &self,
        organization_id: &str,
        service_id: &str,
    ) -> Result<Vec<RoutePattern>, ClientError> {
        let path = format!("/organizations/{organization_id}/services/{service_id}/patterns");
        let patterns: Vec<PatternDto> = self.get_json(&path, &[]).await?;

        let patterns = patterns
            .iter()
            .map(convert_pattern)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(patterns)
    }

    /// Trips of one route within `window`.
    pub async fn get_route_timetable(
        &self,
        organization_id: &str,
        service_id: &str,
        route_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Trip>, ClientError> {
        let path = format!(
            "/organizations/{organization_id}/services/{service_id}/routes/{route_id}/timetable"
        );
        let trips: Vec<TripDto> = self
            .get_json(
                &path,
                &[
                    ("startTime", window.start_time.to_string()),
                    ("endTime", window.end_time.to_string()),
                ],
            )
            .await?;

        Ok(trips.iter().map(convert_trip).collect())
    }

    /// Bike-share stations within `radius` metres of `origin`.
    pub async fn get_nearby_stations(
        &self,
        origin: Coordinate,
        radius: f64,
    ) -> Result<Vec<Station>, ClientError> {
        let stations: Vec<StationDto> = self
            .get_json(
                "/stations/nearby",
                &[
                    ("lat", origin.lat.to_string()),
                    ("lng", origin.lng.to_string()),
                    ("radius", radius.to_string()),
                ],
            )
            .await?;

        Ok(stations.iter().map(convert_station).collect())
    }
}

impl TripPlanner for TransitClient {
    async fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        depart_after: DateTime<Utc>,
    ) -> Result<Vec<Itinerary>, ClientError> {
        self.plan_trip(origin, destination, depart_after).await
    }
}

impl RoutePatternSource for TransitClient {
    async fn list_patterns(
        &self,
        organization_id: &str,
        service_id: &str,
    ) -> Result<Vec<RoutePattern>, ClientError> {
        self.get_patterns(organization_id, service_id).await
    }
}

impl RouteTimetableSource for TransitClient {
    async fn get_timetable(
        &self,
        organization_id: &str,
        service_id: &str,
        route_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Trip>, ClientError> {
        self.get_route_timetable(organization_id, service_id, route_id, window)
            .await
    }
}

impl NearbyStationSource for TransitClient {
    async fn nearby(&self, origin: Coordinate, radius: f64) -> Result<Vec<Station>, ClientError> {
        self.get_nearby_stations(origin, radius).await
    }
}
