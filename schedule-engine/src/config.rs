//! Engine configuration.

use std::time::Duration;

/// Parameters of the service-day window arithmetic.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Length of the default "from now" window (minutes).
    pub lookahead_mins: i64,

    /// Local hour at which the service day rolls over.
    /// Hours before this still belong to the previous day's late service.
    pub service_day_start_hour: u32,
}

impl WindowConfig {
    /// Returns the lookahead as a Duration.
    pub fn lookahead(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.lookahead_mins)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lookahead_mins: 180, // 3 hours
            service_day_start_hour: 4,
        }
    }
}

/// Configuration for schedule resolution.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on any single upstream call (seconds).
    pub request_timeout_secs: u64,

    /// Walk legs shorter than this are hidden from the selected itinerary.
    pub min_walk_leg_secs: u32,

    /// Destinations at or beyond this position are not displayed.
    pub max_displayed_destinations: usize,

    pub window: WindowConfig,
}

impl EngineConfig {
    /// Set the per-call timeout.
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set the short-walk threshold.
    pub fn with_min_walk_leg(mut self, secs: u32) -> Self {
        self.min_walk_leg_secs = secs;
        self
    }

    /// Set how many destinations are displayed.
    pub fn with_max_displayed(mut self, n: usize) -> Self {
        self.max_displayed_destinations = n;
        self
    }

    /// Set the window parameters.
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            min_walk_leg_secs: 240,
            max_displayed_destinations: 5,
            window: WindowConfig::default(),
        }
    }
}
