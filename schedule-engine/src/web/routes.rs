//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::destinations::{DestinationScheduleAggregator, resolve_nearby_stations};
use crate::domain::Coordinate;
use crate::error::EngineError;
use crate::source::TransitSource;
use crate::timetable::{RouteData, RouteScheduleFetcher};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: TransitSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/destinations/resolve", post(resolve_destinations::<S>))
        .route("/routes/schedule", get(route_schedule::<S>))
        .route("/stations/nearby", get(nearby_stations::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a destination table for one display slot.
async fn resolve_destinations<S: TransitSource>(
    State(state): State<AppState<S>>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    if !req.origin.is_valid() {
        return Err(AppError::BadRequest {
            message: format!("invalid origin {}", req.origin),
        });
    }
    if let Some(bad) = req.destinations.iter().find(|d| !d.coordinates.is_valid()) {
        return Err(AppError::BadRequest {
            message: format!("invalid coordinates for destination {}", bad.name),
        });
    }

    let generation = state.destinations.begin(&req.slot);
    let previous = match req.previous {
        Some(rows) => rows,
        None => state.destinations.get(&req.slot).unwrap_or_default(),
    };

    let aggregator = DestinationScheduleAggregator::new(state.source.as_ref(), &state.config);
    let resolution = aggregator
        .resolve_destinations(req.origin, &req.destinations, &previous)
        .await;

    let stale = match state
        .destinations
        .commit(&generation, resolution.results.clone())
    {
        Ok(()) => false,
        Err(e) => {
            debug!(error = %e, "Discarding superseded destination rows");
            true
        }
    };

    Ok(Json(ResolveResponse {
        results: resolution.results,
        any_succeeded: resolution.any_succeeded,
        stale,
    }))
}

/// Pattern and timetable of a fixed route.
async fn route_schedule<S: TransitSource>(
    State(state): State<AppState<S>>,
    Query(query): Query<RouteScheduleQuery>,
) -> Result<Json<RouteData>, AppError> {
    let route = query.route_info();
    let fetcher = RouteScheduleFetcher::new(state.source.as_ref(), &state.config);
    let data = fetcher
        .fetch_complete_route_data(&route, query.skip_patterns)
        .await?;

    Ok(Json(data))
}

/// Bike-share stations around a point.
async fn nearby_stations<S: TransitSource>(
    State(state): State<AppState<S>>,
    Query(query): Query<NearbyStationsQuery>,
) -> Result<Json<NearbyStationsResponse>, AppError> {
    let origin = Coordinate::new(query.lat, query.lng);
    let slot = query.slot();
    let generation = state.stations.begin(&slot);
    let previous = state.stations.get(&slot).unwrap_or_default();

    let resolution = resolve_nearby_stations(
        state.source.as_ref(),
        &state.config,
        origin,
        query.radius,
        &previous,
    )
    .await?;

    if resolution.fresh {
        if let Err(e) = state.stations.commit(&generation, resolution.stations.clone()) {
            debug!(error = %e, "Discarding superseded station list");
        }
    }

    Ok(Json(NearbyStationsResponse {
        stations: resolution.stations,
        fresh: resolution.fresh,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidInput(message) => AppError::BadRequest { message },
            EngineError::UpstreamUnavailable { .. } => AppError::BadGateway {
                message: e.to_string(),
            },
            EngineError::StaleGeneration { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
