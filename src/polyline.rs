//! Route geometry for map renderers.
//!
//! Legs are straight lines between city seats, so a route's geometry is
//! just its stop coordinates in order. Encoding into whatever format a
//! renderer wants happens outside the planner.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::graph::RouteGraph;
use crate::haversine::Coordinate;
use crate::solver::Route;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a polyline from coordinates in drawing order.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Stop coordinates of `route`, including the closing return.
    pub fn from_route(graph: &RouteGraph, route: &Route) -> Result<Self, PlanError> {
        let points = route
            .stops()
            .iter()
            .map(|name| {
                graph
                    .city_by_name(name)
                    .map(|city| city.coordinate)
                    .ok_or_else(|| PlanError::UnknownCity(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline, returning its points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Consecutive point pairs, one per drawn segment.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Bounding box as `(min, max)` corners, `None` when empty.
    pub fn bounds(&self) -> Option<(Coordinate, Coordinate)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (
                Coordinate::new(min.lon.min(p.lon), min.lat.min(p.lat)),
                Coordinate::new(max.lon.max(p.lon), max.lat.max(p.lat)),
            )
        }))
    }
}
