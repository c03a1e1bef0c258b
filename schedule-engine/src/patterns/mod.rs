//! Route pattern merging.
//!
//! A route usually has several patterns (directions, short turns, express
//! variants). Maps show one line and every stop any variant serves.

mod merge;

pub use merge::{merge_patterns, patterns_for_route};
