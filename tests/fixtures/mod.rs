//! Test fixtures for tour-planner.
//!
//! Provides realistic test data including:
//! - Real Chinese prefecture-level city seats
//! - Rating, rank and per-attraction records for them

pub mod china_cities;

pub use china_cities::*;
