//! JSON API over the schedule engine.
//!
//! Exposes destination resolution, fixed-route schedules and nearby
//! stations to the display editor and preview renderers.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
