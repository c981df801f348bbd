//! tour-planner
//!
//! Budget-constrained greedy itinerary planning over a complete graph of
//! candidate cities.

pub mod aggregate;
pub mod attributes;
pub mod config;
pub mod cost;
pub mod error;
pub mod graph;
pub mod haversine;
pub mod planner;
pub mod polyline;
pub mod solver;
pub mod traits;

pub use config::PlannerConfig;
pub use error::{DataWarning, PlanError};
pub use planner::{TripPlan, plan_trip, plan_trip_with};
