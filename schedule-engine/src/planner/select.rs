//! Itinerary selection.
//!
//! Picks the fastest of the candidates a trip planner returned and hides
//! short walking legs that only clutter a destination table.

use crate::domain::Itinerary;
use crate::error::EngineError;

/// Walk legs shorter than this are dropped from the selected itinerary.
pub const DEFAULT_MIN_WALK_LEG_SECS: u32 = 240;

/// Chooses one itinerary among candidates.
#[derive(Debug, Clone)]
pub struct ItinerarySelector {
    min_walk_leg_secs: u32,
}

impl ItinerarySelector {
    pub fn new(min_walk_leg_secs: u32) -> Self {
        Self { min_walk_leg_secs }
    }

    /// Select the itinerary with the smallest duration.
    ///
    /// Ties go to the earliest candidate. The winner's walk legs under the
    /// threshold are removed; its start, end and duration are left as the
    /// planner reported them.
    pub fn select_best(&self, itineraries: Vec<Itinerary>) -> Result<Itinerary, EngineError> {
        let mut candidates = itineraries.into_iter();
        let mut best = candidates.next().ok_or_else(|| {
            EngineError::InvalidInput("no itineraries to select from".to_string())
        })?;

        for candidate in candidates {
            if candidate.duration_seconds() < best.duration_seconds() {
                best = candidate;
            }
        }

        let threshold = self.min_walk_leg_secs;
        best.retain_legs(|leg| !(leg.is_walk() && leg.duration_seconds < threshold));

        Ok(best)
    }
}

impl Default for ItinerarySelector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WALK_LEG_SECS)
    }
}

/// Select with the default walk threshold.
pub fn select_best(itineraries: Vec<Itinerary>) -> Result<Itinerary, EngineError> {
    ItinerarySelector::default().select_best(itineraries)
}
