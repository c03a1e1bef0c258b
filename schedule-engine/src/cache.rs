//! Caching layer for transit API responses.
//!
//! Route patterns are static per organization and service, and a pattern
//! listing is the largest response the engine fetches, so listings are
//! cached. Plans and timetables depend on the current time and are always
//! fetched fresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::client::{ClientError, TransitClient};
use crate::domain::{Coordinate, Itinerary, RoutePattern, Station, TimeWindow, Trip};
use crate::source::{NearbyStationSource, RoutePatternSource, RouteTimetableSource, TripPlanner};

/// Cache key for pattern listings: (organization, service).
type PatternKey = (String, String);

/// Cached pattern listing.
type PatternEntry = Arc<Vec<RoutePattern>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 200,
        }
    }
}

/// Transit client with pattern caching.
///
/// Implements every collaborator trait, delegating to the wrapped client.
pub struct CachedTransitClient {
    client: TransitClient,
    patterns: MokaCache<PatternKey, PatternEntry>,
}

impl CachedTransitClient {
    /// Create a new cached client.
    pub fn new(client: TransitClient, cache_config: &CacheConfig) -> Self {
        let patterns = MokaCache::builder()
            .time_to_live(cache_config.ttl)
            .max_capacity(cache_config.max_capacity)
            .build();

        Self { client, patterns }
    }

    /// Get pattern listings, using cache if available.
    pub async fn get_patterns(
        &self,
        organization_id: &str,
        service_id: &str,
    ) -> Result<PatternEntry, ClientError> {
        let key = (organization_id.to_string(), service_id.to_string());

        if let Some(cached) = self.patterns.get(&key).await {
            return Ok(cached);
        }

        let patterns = self.client.get_patterns(organization_id, service_id).await?;
        debug!(
            organization = organization_id,
            service = service_id,
            patterns = patterns.len(),
            "Caching pattern listing"
        );

        let entry = Arc::new(patterns);
        self.patterns.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.patterns.invalidate_all();
    }
}

impl TripPlanner for CachedTransitClient {
    async fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        depart_after: DateTime<Utc>,
    ) -> Result<Vec<Itinerary>, ClientError> {
        self.client.plan_trip(origin, destination, depart_after).await
    }
}

impl RoutePatternSource for CachedTransitClient {
    async fn list_patterns(
        &self,
        organization_id: &str,
        service_id: &str,
    ) -> Result<Vec<RoutePattern>, ClientError> {
        let entry = self.get_patterns(organization_id, service_id).await?;
        Ok(entry.as_ref().clone())
    }
}

impl RouteTimetableSource for CachedTransitClient {
    async fn get_timetable(
        &self,
        organization_id: &str,
        service_id: &str,
        route_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Trip>, ClientError> {
        self.client
            .get_route_timetable(organization_id, service_id, route_id, window)
            .await
    }
}

impl NearbyStationSource for CachedTransitClient {
    async fn nearby(&self, origin: Coordinate, radius: f64) -> Result<Vec<Station>, ClientError> {
        self.client.get_nearby_stations(origin, radius).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

    use super::*;
    use crate::client::ClientConfig;

    /// Serve a one-pattern listing, counting hits; `fail` answers 503.
    async fn fake_provider(fail: bool) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/organizations/:org/services/:svc/patterns",
                get(move |State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if fail {
                        return Err(StatusCode::SERVICE_UNAVAILABLE);
                    }
                    Ok(Json(serde_json::json!([{
                        "id": "p1",
                        "routeId": "747",
                        "routeShortName": "747",
                        "stops": [{ "id": "s1", "name": "Berri", "lat": 45.51, "lon": -73.56 }],
                        "geometry": [[45.51, -73.56]],
                    }])))
                }),
            )
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), hits)
    }

    fn cached(base_url: &str) -> CachedTransitClient {
        let client = TransitClient::new(ClientConfig::new(base_url, "test-key")).unwrap();
        CachedTransitClient::new(client, &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 200);
    }

    #[tokio::test]
    async fn patterns_fetched_once_per_service() {
        let (base_url, hits) = fake_provider(false).await;
        let client = cached(&base_url);

        let first = client.list_patterns("stm", "bus").await.unwrap();
        let second = client.list_patterns("stm", "bus").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].route_id, "747");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        client.list_patterns("stm", "metro").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let (base_url, hits) = fake_provider(false).await;
        let client = cached(&base_url);

        client.list_patterns("stm", "bus").await.unwrap();
        client.invalidate_cache();
        client.list_patterns("stm", "bus").await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let (base_url, hits) = fake_provider(true).await;
        let client = cached(&base_url);

        for _ in 0..2 {
            let err = client.list_patterns("stm", "bus").await.unwrap_err();
            assert!(matches!(err, ClientError::Api { status: 503, .. }));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
