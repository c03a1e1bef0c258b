//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from transport errors raised by the transit client.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Time window does not span a positive interval
    #[error("invalid time window: start {start} is not before end {end}")]
    InvalidWindow { start: i64, end: i64 },

    /// A leg boards before the previous leg alights
    #[error("leg {index} boards before the previous leg alights")]
    NonContiguousLegs { index: usize },

    /// Itinerary ends before it starts
    #[error("itinerary ends before it starts")]
    InvertedItinerary,
}
