//! Transit data provider client.
//!
//! This module provides an HTTP client for a REST trip-planning provider,
//! implementing the engine's collaborator traits.
//!
//! Key characteristics of the provider:
//! - Plan legs carry epoch-millisecond times, converted here to seconds
//!   since service-day midnight
//! - Patterns are static per organization/service and safe to cache
//! - A timetable request may succeed with no trips at all

mod convert;
mod error;
mod http;
mod mock;
mod types;

pub use convert::ConversionError;
pub use error::ClientError;
pub use http::{ClientConfig, TransitClient};
pub use mock::MockTransitClient;
pub use types::{
    ItineraryDto, LegDto, PatternDto, PlaceDto, PlanResponse, StationDto, StopDto, StopTimeDto,
    TripDto,
};
