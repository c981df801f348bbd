//! End-to-end planning: build the graph, select a route, summarize it.

use tracing::{info, warn};

use crate::aggregate::{RoutePlan, summarize};
use crate::attributes::AttributeEstimator;
use crate::config::PlannerConfig;
use crate::error::{DataWarning, PlanError};
use crate::graph::{GraphBuilder, RouteGraph};
use crate::haversine::Haversine;
use crate::polyline::Polyline;
use crate::solver::{Route, solve};
use crate::traits::{AttractionProfile, DistanceProvider, Place};

/// Tolerance for comparing running totals with the recomputed summary.
const TOTALS_TOLERANCE: f64 = 1e-6;

/// Everything downstream reporting and rendering needs.
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub graph: RouteGraph,
    pub route: Route,
    pub plan: RoutePlan,
    /// Data problems from graph construction and origin selection.
    pub warnings: Vec<DataWarning>,
}

impl TripPlan {
    /// Stop coordinates of the selected route.
    pub fn polyline(&self) -> Result<Polyline, PlanError> {
        Polyline::from_route(&self.graph, &self.route)
    }
}

/// Plans a trip using great-circle distances.
pub fn plan_trip<P, A>(
    places: &[P],
    profiles: &[A],
    config: &PlannerConfig,
) -> Result<TripPlan, PlanError>
where
    P: Place,
    A: AttractionProfile,
{
    plan_trip_with(places, profiles, config, Haversine)
}

/// Plans a trip with a caller-supplied distance provider.
pub fn plan_trip_with<P, A, M>(
    places: &[P],
    profiles: &[A],
    config: &PlannerConfig,
    distances: M,
) -> Result<TripPlan, PlanError>
where
    P: Place,
    A: AttractionProfile,
    M: DistanceProvider + Sync,
{
    let builder = GraphBuilder::with_distances(
        AttributeEstimator::new(config.estimator.clone()),
        config.cost,
        distances,
    );
    let build = builder.build(places, profiles, config.select.start_city.as_deref());
    let mut warnings = build.warnings;
    let graph = build.graph;

    let selection = solve(&graph, &config.select)?;
    warnings.extend(selection.warnings);

    let plan = summarize(&graph, &selection.route)?;
    if !plan.matches(&selection.totals, TOTALS_TOLERANCE) {
        warn!(
            running = ?selection.totals,
            recomputed = ?plan.totals,
            "route totals disagree"
        );
    }

    info!(
        route = ?selection.route.stops(),
        hours = plan.total_hours(),
        travel_cost = plan.total_travel_cost(),
        admission_cost = plan.total_admission_cost(),
        attractions = plan.attraction_count(),
        "trip planned"
    );

    Ok(TripPlan {
        graph,
        route: selection.route,
        plan,
        warnings,
    })
}
