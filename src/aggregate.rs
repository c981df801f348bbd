//! Route summaries recomputed from the graph.
//!
//! [`summarize`] sums a finished route strictly from graph data. It does
//! not trust the totals the solver accumulated, which makes it the
//! independent check for them.

use serde::Serialize;

use crate::error::PlanError;
use crate::graph::{CityName, Leg, RouteGraph};
use crate::solver::{Route, RouteTotals};

/// One stop of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedStop {
    pub city: CityName,
    /// Leg from the previous stop; `None` for the origin.
    pub arrival: Option<Leg>,
    /// Zero for the closing return to the origin.
    pub visit_hours: f64,
    /// Zero for the closing return to the origin.
    pub admission_cost: f64,
    pub attraction_count: u32,
    pub highlight: Option<String>,
    /// True for the closing return to the origin.
    pub returning: bool,
}

/// Read-only summary of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub totals: RouteTotals,
    pub visited_city_count: usize,
    pub closed: bool,
    pub stops: Vec<PlannedStop>,
}

impl RoutePlan {
    /// Returns visit plus travel hours.
    pub fn total_hours(&self) -> f64 {
        self.totals.total_hours
    }

    /// Returns the summed leg fares.
    pub fn total_travel_cost(&self) -> f64 {
        self.totals.travel_cost
    }

    /// Returns the summed admission costs.
    pub fn total_admission_cost(&self) -> f64 {
        self.totals.admission_cost
    }

    /// Returns travel plus admission cost.
    pub fn total_cost(&self) -> f64 {
        self.totals.total_cost()
    }

    /// Returns the number of known attractions along the route.
    pub fn attraction_count(&self) -> u32 {
        self.totals.attraction_count
    }

    /// Whether these totals agree with `other` within `tolerance` hours or
    /// currency units.
    pub fn matches(&self, other: &RouteTotals, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
        close(self.totals.total_hours, other.total_hours)
            && close(self.totals.travel_cost, other.travel_cost)
            && close(self.totals.admission_cost, other.admission_cost)
            && self.totals.attraction_count == other.attraction_count
    }
}

/// Sums visit and travel data along `route`.
///
/// Fails if a stop is not in `graph`, two consecutive stops have no edge,
/// or a closed route does not end at its origin.
pub fn summarize(graph: &RouteGraph, route: &Route) -> Result<RoutePlan, PlanError> {
    if route.is_closed() && !route.returns_to_origin() {
        return Err(PlanError::UnclosedLoop);
    }

    let mut totals = RouteTotals::default();
    let mut stops = Vec::with_capacity(route.len());
    let mut previous: Option<usize> = None;
    let last = route.len().saturating_sub(1);

    for (position, name) in route.stops().iter().enumerate() {
        let index = graph
            .index_of(name)
            .ok_or_else(|| PlanError::UnknownCity(name.clone()))?;
        let city = &graph.cities()[index];

        let arrival = match previous {
            Some(from) => {
                let leg = graph.leg(from, index).ok_or_else(|| PlanError::MissingLeg {
                    from: graph.cities()[from].name.clone(),
                    to: name.clone(),
                })?;
                totals.total_hours += leg.travel_hours;
                totals.travel_cost += leg.travel_cost;
                Some(*leg)
            }
            None => None,
        };

        let returning = route.is_closed() && position == last && position > 0;
        let (visit_hours, admission_cost, attraction_count) = if returning {
            (0.0, 0.0, 0)
        } else {
            (
                city.attributes.visit_hours,
                city.attributes.admission_cost,
                city.attributes.attraction_count,
            )
        };
        totals.total_hours += visit_hours;
        totals.admission_cost += admission_cost;
        totals.attraction_count += attraction_count;

        stops.push(PlannedStop {
            city: name.clone(),
            arrival,
            visit_hours,
            admission_cost,
            attraction_count,
            highlight: city.highlight.clone(),
            returning,
        });
        previous = Some(index);
    }

    Ok(RoutePlan {
        totals,
        visited_city_count: route.visited().len(),
        closed: route.is_closed(),
        stops,
    })
}
