//! Budget-constrained greedy route selection.
//!
//! Starting from an origin, the route repeatedly moves to the unvisited
//! city with the best cost-efficiency score whose travel and visit still
//! fit in the trip-hours budget, then optionally returns to the origin.
//!
//! This is a myopic heuristic. It never backtracks or reconsiders an
//! earlier stop, trading optimality for a single O(n²) pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::{DataWarning, PlanError};
use crate::graph::{CityName, RouteGraph};

/// Default trip-hours ceiling (six days).
const DEFAULT_BUDGET_HOURS: f64 = 144.0;

/// Cities with major international airports, in order of preference.
pub const DEFAULT_GATEWAYS: [&str; 11] = [
    "北京", "上海", "广州", "成都", "昆明", "西安", "重庆", "杭州", "南京", "厦门", "武汉",
];

/// How a candidate next stop is ranked. Higher scores win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Attractiveness per unit of incremental cost.
    #[default]
    ValuePerCost,
    /// Cheapest incremental cost first, ignoring attractiveness. Tends to
    /// fit the most cities into the budget.
    InverseCost,
}

impl SelectionStrategy {
    /// Score for moving to a city.
    ///
    /// Zero incremental cost scores infinity, except under `ValuePerCost`
    /// for a city with no attractiveness, which scores zero.
    pub fn score(&self, attractiveness: f64, travel_cost: f64, admission_cost: f64) -> f64 {
        let cost = travel_cost + admission_cost;
        if cost <= 0.0 {
            let worthless = attractiveness.is_nan() || attractiveness <= 0.0;
            return match self {
                SelectionStrategy::ValuePerCost if worthless => 0.0,
                _ => f64::INFINITY,
            };
        }
        match self {
            SelectionStrategy::ValuePerCost => attractiveness / cost,
            SelectionStrategy::InverseCost => 1.0 / cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    /// Ceiling on visit plus travel hours.
    pub budget_hours: f64,
    /// Preferred origin. Falls back to `gateways` when not in the graph.
    pub start_city: Option<CityName>,
    pub gateways: Vec<CityName>,
    pub strategy: SelectionStrategy,
    /// Append a return leg to the origin when the budget allows it.
    pub close_loop: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            budget_hours: DEFAULT_BUDGET_HOURS,
            start_city: None,
            gateways: DEFAULT_GATEWAYS.iter().map(|s| s.to_string()).collect(),
            strategy: SelectionStrategy::default(),
            close_loop: true,
        }
    }
}

/// Ordered stops. The first stop is the origin; a closed route ends with
/// the origin again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    stops: Vec<CityName>,
    closed: bool,
}

impl Route {
    /// Creates a route from stop names. `closed` marks the last stop as
    /// the return to the origin; [`Route::returns_to_origin`] tells whether
    /// the stops actually allow that.
    pub fn new(stops: Vec<CityName>, closed: bool) -> Self {
        Self { stops, closed }
    }

    /// Returns every stop in order, including the closing return.
    pub fn stops(&self) -> &[CityName] {
        &self.stops
    }

    /// Returns the first stop, `None` for an empty route.
    pub fn origin(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    /// Returns the number of stops, including the closing return.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns true if the route is flagged as ending at its origin.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// True when the route has at least two stops and ends where it
    /// started.
    pub fn returns_to_origin(&self) -> bool {
        self.stops.len() >= 2 && self.stops.first() == self.stops.last()
    }

    /// Stops that are visited, i.e. without the closing return.
    pub fn visited(&self) -> &[CityName] {
        match self.stops.split_last() {
            Some((_, rest)) if self.closed => rest,
            _ => &self.stops,
        }
    }
}

/// Time and money spent along a route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RouteTotals {
    pub total_hours: f64,
    pub travel_cost: f64,
    pub admission_cost: f64,
    pub attraction_count: u32,
}

impl RouteTotals {
    /// Returns travel plus admission cost.
    pub fn total_cost(&self) -> f64 {
        self.travel_cost + self.admission_cost
    }
}

/// Result of [`solve`].
#[derive(Debug, Clone)]
pub struct Selection {
    pub route: Route,
    /// Totals accumulated while the route was built.
    pub totals: RouteTotals,
    pub warnings: Vec<DataWarning>,
}

/// Picks the origin: the requested start city if it is in the graph, else
/// the first gateway in the graph, else the first city.
pub fn resolve_origin(
    graph: &RouteGraph,
    options: &SelectOptions,
    warnings: &mut Vec<DataWarning>,
) -> Result<usize, PlanError> {
    if graph.is_empty() {
        return Err(PlanError::NoEligibleCities);
    }

    if let Some(start) = &options.start_city {
        if let Some(index) = graph.index_of(start) {
            return Ok(index);
        }
    }

    let origin = options
        .gateways
        .iter()
        .find_map(|gateway| graph.index_of(gateway))
        .unwrap_or(0);

    if let Some(start) = &options.start_city {
        let fallback = graph.cities()[origin].name.clone();
        warn!(city = %start, fallback = %fallback, "start city not eligible");
        warnings.push(DataWarning::UnknownStartCity {
            city: start.clone(),
            fallback,
        });
    }

    Ok(origin)
}

/// Builds a route over `graph` within `options.budget_hours`.
///
/// Candidates are scanned in graph enumeration order and only a strictly
/// higher score replaces the current best, so ties go to the city that was
/// supplied first. The graph is never modified.
pub fn solve(graph: &RouteGraph, options: &SelectOptions) -> Result<Selection, PlanError> {
    let budget = options.budget_hours;
    if !(budget.is_finite() && budget > 0.0) {
        return Err(PlanError::InvalidBudget(budget));
    }

    let mut warnings = Vec::new();
    let origin = resolve_origin(graph, options, &mut warnings)?;
    let cities = graph.cities();
    let origin_city = &cities[origin];

    let mut visited = vec![false; cities.len()];
    visited[origin] = true;
    let mut stops = vec![origin];
    let mut current = origin;
    let mut totals = RouteTotals {
        total_hours: origin_city.attributes.visit_hours,
        travel_cost: 0.0,
        admission_cost: origin_city.attributes.admission_cost,
        attraction_count: origin_city.attributes.attraction_count,
    };

    if totals.total_hours > budget {
        warn!(
            city = %origin_city.name,
            visit_hours = totals.total_hours,
            budget_hours = budget,
            "origin visit exceeds budget"
        );
        warnings.push(DataWarning::OriginExceedsBudget {
            city: origin_city.name.clone(),
            visit_hours: totals.total_hours,
            budget_hours: budget,
        });
    }

    debug!(origin = %origin_city.name, strategy = ?options.strategy, budget, "starting route");

    while totals.total_hours < budget {
        let mut best: Option<(usize, f64)> = None;

        for (candidate, city) in cities.iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            let Some(leg) = graph.leg(current, candidate) else {
                continue;
            };

            let arrival = totals.total_hours + leg.travel_hours + city.attributes.visit_hours;
            if arrival > budget {
                trace!(city = %city.name, arrival, "over budget");
                continue;
            }

            let score = options.strategy.score(
                city.attributes.attractiveness,
                leg.travel_cost,
                city.attributes.admission_cost,
            );
            if score.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }

        let Some((next, score)) = best else {
            debug!(hours = totals.total_hours, "no candidate fits the remaining budget");
            break;
        };

        let Some(leg) = graph.leg(current, next) else {
            break;
        };
        let city = &cities[next];
        totals.total_hours += leg.travel_hours + city.attributes.visit_hours;
        totals.travel_cost += leg.travel_cost;
        totals.admission_cost += city.attributes.admission_cost;
        totals.attraction_count += city.attributes.attraction_count;
        visited[next] = true;
        stops.push(next);
        current = next;

        debug!(city = %city.name, score, hours = totals.total_hours, "added stop");
    }

    let mut closed = false;
    if options.close_loop && stops.len() > 1 && current != origin {
        if let Some(leg) = graph.leg(current, origin) {
            if totals.total_hours + leg.travel_hours <= budget {
                totals.total_hours += leg.travel_hours;
                totals.travel_cost += leg.travel_cost;
                stops.push(origin);
                closed = true;
            } else {
                debug!("no time left to return to origin");
            }
        }
    }

    let route = Route::new(
        stops.into_iter().map(|i| cities[i].name.clone()).collect(),
        closed,
    );

    info!(
        stops = route.len(),
        closed,
        hours = totals.total_hours,
        cost = totals.total_cost(),
        "route selected"
    );

    Ok(Selection {
        route,
        totals,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeEstimator, CityEvidence};
    use crate::cost::TravelCostModel;
    use crate::haversine::Coordinate;
    use crate::traits::{CityProfile, DistanceProvider, GeoRecord};
    use crate::graph::GraphBuilder;

    /// One degree of longitude is exactly 100 km.
    struct LineDistance;

    impl DistanceProvider for LineDistance {
        fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
            (from.lon - to.lon).abs() * 100.0
        }
    }

    /// Cities on a line at the given longitudes, scored on the rating tiers.
    fn line_graph(cities: &[(&str, f64, f64)]) -> RouteGraph {
        let places: Vec<GeoRecord> = cities
            .iter()
            .map(|(name, lon, _)| GeoRecord::new(*name, *lon, 0.0))
            .collect();
        let profiles: Vec<CityProfile> = cities
            .iter()
            .map(|(name, _, score)| CityProfile::new(*name, CityEvidence::Score(Some(*score))))
            .collect();
        GraphBuilder::with_distances(
            AttributeEstimator::default(),
            TravelCostModel::default(),
            LineDistance,
        )
        .build(&places, &profiles, None)
        .graph
    }

    fn options(budget_hours: f64) -> SelectOptions {
        SelectOptions {
            budget_hours,
            gateways: Vec::new(),
            ..SelectOptions::default()
        }
    }

    fn stops(selection: &Selection) -> Vec<&str> {
        selection.route.stops().iter().map(String::as_str).collect()
    }

    /// A(8h) at 0 km, B(6h) at 500 km, C(6h) at 1000 km.
    fn three_cities() -> RouteGraph {
        line_graph(&[("A", 0.0, 4.6), ("B", 5.0, 4.1), ("C", 10.0, 4.1)])
    }

    #[test]
    fn three_city_scenario_open() {
        let graph = three_cities();
        let selection = solve(
            &graph,
            &SelectOptions {
                close_loop: false,
                ..options(20.0)
            },
        )
        .unwrap();

        assert_eq!(stops(&selection), vec!["A", "B"]);
        assert!(!selection.route.is_closed());
        assert_eq!(selection.totals.total_hours, 16.0);
        assert_eq!(selection.totals.travel_cost, 245.0);
        assert_eq!(selection.totals.admission_cost, 150.0 + 120.0);
    }

    #[test]
    fn three_city_scenario_closed() {
        let graph = three_cities();
        let selection = solve(&graph, &options(20.0)).unwrap();

        assert_eq!(stops(&selection), vec!["A", "B", "A"]);
        assert!(selection.route.is_closed());
        assert_eq!(selection.route.visited(), &["A".to_string(), "B".to_string()]);
        assert_eq!(selection.totals.total_hours, 18.0);
        assert_eq!(selection.totals.travel_cost, 490.0);
        // Returning does not pay admission again.
        assert_eq!(selection.totals.admission_cost, 270.0);
        assert_eq!(selection.totals.total_cost(), 760.0);
    }

    #[test]
    fn no_closing_leg_when_out_of_time() {
        let graph = three_cities();
        // 16h after B; the 2h return would need 18h.
        let selection = solve(&graph, &options(17.0)).unwrap();
        assert_eq!(stops(&selection), vec!["A", "B"]);
        assert!(!selection.route.is_closed());
    }

    #[test]
    fn single_city_graph() {
        let graph = line_graph(&[("A", 0.0, 4.6)]);
        let selection = solve(&graph, &options(144.0)).unwrap();

        assert_eq!(stops(&selection), vec!["A"]);
        assert_eq!(selection.totals.total_hours, 8.0);
        assert_eq!(selection.totals.travel_cost, 0.0);
        assert!(!selection.route.is_closed());
    }

    #[test]
    fn empty_graph_is_a_configuration_error() {
        let graph = line_graph(&[]);
        assert_eq!(
            solve(&graph, &options(144.0)).unwrap_err(),
            PlanError::NoEligibleCities
        );
    }

    #[test]
    fn invalid_budgets_rejected() {
        let graph = three_cities();
        for budget in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                solve(&graph, &options(budget)),
                Err(PlanError::InvalidBudget(_))
            ));
        }
    }

    #[test]
    fn origin_over_budget_still_yields_route() {
        let graph = three_cities();
        let selection = solve(&graph, &options(5.0)).unwrap();
        assert_eq!(stops(&selection), vec!["A"]);
        assert_eq!(
            selection.warnings,
            vec![DataWarning::OriginExceedsBudget {
                city: "A".into(),
                visit_hours: 8.0,
                budget_hours: 5.0
            }]
        );
    }

    #[test]
    fn start_city_is_honored() {
        let graph = three_cities();
        let selection = solve(
            &graph,
            &SelectOptions {
                start_city: Some("C".into()),
                ..options(20.0)
            },
        )
        .unwrap();
        assert_eq!(selection.route.origin(), Some("C"));
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn gateway_fallback_for_unknown_start() {
        let graph = three_cities();
        let selection = solve(
            &graph,
            &SelectOptions {
                start_city: Some("拉萨".into()),
                gateways: vec!["X".into(), "B".into(), "C".into()],
                ..options(20.0)
            },
        )
        .unwrap();

        assert_eq!(selection.route.origin(), Some("B"));
        assert_eq!(
            selection.warnings,
            vec![DataWarning::UnknownStartCity {
                city: "拉萨".into(),
                fallback: "B".into()
            }]
        );
    }

    #[test]
    fn first_city_when_no_gateway_present() {
        let graph = three_cities();
        let selection = solve(
            &graph,
            &SelectOptions {
                gateways: SelectOptions::default().gateways,
                ..options(20.0)
            },
        )
        .unwrap();
        assert_eq!(selection.route.origin(), Some("A"));
    }

    #[test]
    fn strategies_can_disagree() {
        // From A: B is cheap and dull, C is far but excellent.
        let graph = line_graph(&[("A", 0.0, 4.6), ("B", 1.0, 0.5), ("C", 3.0, 5.0)]);

        // B: 0.5 / (65 + 80) = 0.0034, C: 5.0 / (155 + 150) = 0.0164.
        let by_value = solve(
            &graph,
            &SelectOptions {
                close_loop: false,
                ..options(18.0)
            },
        )
        .unwrap();
        assert_eq!(stops(&by_value)[1], "C");

        let by_cost = solve(
            &graph,
            &SelectOptions {
                strategy: SelectionStrategy::InverseCost,
                close_loop: false,
                ..options(18.0)
            },
        )
        .unwrap();
        assert_eq!(stops(&by_cost)[1], "B");
    }

    #[test]
    fn ties_go_to_first_enumerated_city() {
        // B and C are mirror images around A.
        let graph = line_graph(&[("A", 0.0, 4.6), ("C", -5.0, 4.1), ("B", 5.0, 4.1)]);
        let selection = solve(
            &graph,
            &SelectOptions {
                close_loop: false,
                ..options(16.0)
            },
        )
        .unwrap();
        assert_eq!(stops(&selection), vec!["A", "C"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let graph = line_graph(&[
            ("A", 0.0, 4.6),
            ("B", 2.0, 4.1),
            ("C", 4.0, 3.6),
            ("D", 6.0, 4.9),
            ("E", 8.0, 3.0),
        ]);
        let first = solve(&graph, &options(60.0)).unwrap();
        for _ in 0..5 {
            let again = solve(&graph, &options(60.0)).unwrap();
            assert_eq!(again.route, first.route);
            assert_eq!(again.totals, first.totals);
        }
    }

    #[test]
    fn strategy_scores() {
        assert_eq!(SelectionStrategy::ValuePerCost.score(4.0, 150.0, 50.0), 0.02);
        assert_eq!(SelectionStrategy::InverseCost.score(4.0, 150.0, 50.0), 0.005);
        assert_eq!(SelectionStrategy::InverseCost.score(4.0, 0.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn zero_cost_needs_attractiveness_to_win() {
        assert_eq!(SelectionStrategy::ValuePerCost.score(4.0, 0.0, 0.0), f64::INFINITY);
        assert_eq!(SelectionStrategy::ValuePerCost.score(0.0, 0.0, 0.0), 0.0);
        assert_eq!(SelectionStrategy::ValuePerCost.score(f64::NAN, 0.0, 0.0), 0.0);
        assert!(
            SelectionStrategy::ValuePerCost.score(0.0, 0.0, 0.0)
                < SelectionStrategy::ValuePerCost.score(3.0, 200.0, 100.0)
        );
        assert_eq!(SelectionStrategy::InverseCost.score(0.0, 0.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn visited_drops_only_the_closing_return() {
        let closed = Route::new(vec!["A".into(), "B".into(), "A".into()], true);
        assert_eq!(closed.visited(), &["A".to_string(), "B".to_string()]);
        assert!(closed.returns_to_origin());

        let open = Route::new(vec!["A".into(), "B".into()], false);
        assert_eq!(open.visited(), open.stops());
        assert!(!open.returns_to_origin());
    }

    #[test]
    fn degenerate_closed_routes_do_not_panic() {
        let empty = Route::new(Vec::new(), true);
        assert!(empty.visited().is_empty());
        assert!(!empty.returns_to_origin());
        assert_eq!(empty.origin(), None);

        let single = Route::new(vec!["A".into()], true);
        assert!(single.visited().is_empty());
        assert!(!single.returns_to_origin());
    }

    #[test]
    fn options_from_json() {
        let options: SelectOptions =
            serde_json::from_str(r#"{"budget_hours": 72, "strategy": "inverse_cost"}"#).unwrap();
        assert_eq!(options.budget_hours, 72.0);
        assert_eq!(options.strategy, SelectionStrategy::InverseCost);
        assert!(options.close_loop);
        assert_eq!(options.gateways.len(), 11);
        assert_eq!(options.gateways[0], "北京");
    }
}
