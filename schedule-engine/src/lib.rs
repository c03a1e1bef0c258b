//! Transit schedule resolution engine.
//!
//! Answers two questions for a signage display: "when is the next trip from
//! here to each of these places?" and "what does this fixed route look like,
//! and when does it run next?" Upstream calls are made concurrently, partial
//! failures keep the last good data, and an empty evening timetable rolls
//! over to the next service day.

pub mod cache;
pub mod client;
pub mod config;
pub mod destinations;
pub mod domain;
pub mod error;
pub mod patterns;
pub mod planner;
pub mod source;
pub mod timetable;
pub mod web;
pub mod window;
