//! Complete weighted graph over the eligible cities of one planning run.
//!
//! Every pair of distinct cities gets an edge, so construction is O(n²) in
//! time and memory. That is fine for a country's prefecture-level cities
//! (a few hundred); it is the scaling limit of the planner.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::attributes::{AttributeEstimator, CityAttributes, CityEvidence};
use crate::cost::TravelCostModel;
use crate::error::DataWarning;
use crate::haversine::{Coordinate, Haversine};
use crate::traits::{AttractionProfile, DistanceProvider, Place};

pub type CityName = String;

/// A graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub name: CityName,
    pub coordinate: Coordinate,
    pub attributes: CityAttributes,
    /// Attraction to label the city with on maps and reports.
    pub highlight: Option<String>,
}

/// A graph edge: the estimated transit between two cities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leg {
    pub distance_km: f64,
    pub travel_hours: f64,
    pub travel_cost: f64,
}

impl Leg {
    const NONE: Leg = Leg {
        distance_km: 0.0,
        travel_hours: 0.0,
        travel_cost: 0.0,
    };

    /// Converts a distance into a leg with the model's time and fare.
    pub fn from_distance(distance_km: f64, cost: &TravelCostModel) -> Self {
        let (travel_hours, travel_cost) = cost.estimate(distance_km);
        Self {
            distance_km,
            travel_hours,
            travel_cost,
        }
    }
}

/// Immutable complete graph. Cities are enumerated in the order they were
/// accepted by the builder, and that order is what route selection scans.
#[derive(Debug, Clone, Serialize)]
pub struct RouteGraph {
    cities: Vec<City>,
    #[serde(skip)]
    index: HashMap<CityName, usize>,
    /// Symmetric n×n matrix; the diagonal is unused.
    legs: Vec<Vec<Leg>>,
}

impl RouteGraph {
    fn new(cities: Vec<City>, legs: Vec<Vec<Leg>>) -> Self {
        let index = cities
            .iter()
            .enumerate()
            .map(|(i, city)| (city.name.clone(), i))
            .collect();
        Self {
            cities,
            index,
            legs,
        }
    }

    /// Returns the number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if no city survived construction.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns the cities in enumeration order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Returns the city at `index`, if any.
    pub fn city(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// Returns the enumeration index of the named city.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the named city, if it is in the graph.
    pub fn city_by_name(&self, name: &str) -> Option<&City> {
        self.index_of(name).map(|i| &self.cities[i])
    }

    /// Returns true if the named city is in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The edge between two distinct cities. There are no self-loops.
    pub fn leg(&self, from: usize, to: usize) -> Option<&Leg> {
        if from == to {
            return None;
        }
        self.legs.get(from).and_then(|row| row.get(to))
    }

    /// The edge between two named cities.
    pub fn leg_between(&self, from: &str, to: &str) -> Option<&Leg> {
        self.leg(self.index_of(from)?, self.index_of(to)?)
    }

    /// Every undirected edge once, as `(i, j, leg)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &Leg)> + '_ {
        self.legs.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .skip(i + 1)
                .map(move |(j, leg)| (i, j, leg))
        })
    }

    /// Returns the number of undirected edges, n(n-1)/2.
    pub fn edge_count(&self) -> usize {
        let n = self.cities.len();
        n * n.saturating_sub(1) / 2
    }
}

/// A built graph and the data problems met on the way.
#[derive(Debug, Clone)]
pub struct GraphBuild {
    pub graph: RouteGraph,
    pub warnings: Vec<DataWarning>,
}

/// Builds a [`RouteGraph`] from the geographic reference set and the
/// attractiveness records.
#[derive(Debug, Clone)]
pub struct GraphBuilder<M = Haversine> {
    estimator: AttributeEstimator,
    cost: TravelCostModel,
    distances: M,
}

impl GraphBuilder<Haversine> {
    /// Creates a builder using great-circle distances.
    pub fn new(estimator: AttributeEstimator, cost: TravelCostModel) -> Self {
        Self::with_distances(estimator, cost, Haversine)
    }
}

impl<M> GraphBuilder<M>
where
    M: DistanceProvider + Sync,
{
    /// Creates a builder with a caller-supplied distance provider.
    pub fn with_distances(estimator: AttributeEstimator, cost: TravelCostModel, distances: M) -> Self {
        Self {
            estimator,
            cost,
            distances,
        }
    }

    /// Returns the cost model used for every leg.
    pub fn cost_model(&self) -> &TravelCostModel {
        &self.cost
    }

    /// Builds the graph.
    ///
    /// A city becomes a node when it has an attractiveness record, a valid
    /// coordinate in `places` and at least one known attraction. Only the
    /// first record per city name counts. `anchor` names a city that should
    /// be present even without an attractiveness record (the requested
    /// start city); it is added with missing-score defaults.
    pub fn build<P, A>(&self, places: &[P], profiles: &[A], anchor: Option<&str>) -> GraphBuild
    where
        P: Place,
        A: AttractionProfile,
    {
        let mut coordinates: HashMap<&str, Option<Coordinate>> = HashMap::new();
        for place in places {
            coordinates
                .entry(place.name())
                .or_insert_with(|| place.coordinate());
        }

        let mut warnings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cities = Vec::new();

        for profile in profiles {
            let name = profile.city();
            if !seen.insert(name) {
                warn!(city = name, "duplicate attractiveness record ignored");
                warnings.push(DataWarning::DuplicateCity { city: name.into() });
                continue;
            }
            if let Some(city) = self.node(
                name,
                &coordinates,
                profile.evidence(),
                profile.highlight(),
                &mut warnings,
            ) {
                cities.push(city);
            }
        }

        if let Some(anchor) = anchor.filter(|name| !seen.contains(name)) {
            debug!(city = anchor, "adding start city without attractiveness record");
            if let Some(city) = self.node(
                anchor,
                &coordinates,
                &CityEvidence::Score(None),
                None,
                &mut warnings,
            ) {
                cities.push(city);
            }
        }

        let legs = self.legs(&cities);
        let graph = RouteGraph::new(cities, legs);
        info!(
            cities = graph.len(),
            edges = graph.edge_count(),
            warnings = warnings.len(),
            "built route graph"
        );

        GraphBuild { graph, warnings }
    }

    fn node(
        &self,
        name: &str,
        coordinates: &HashMap<&str, Option<Coordinate>>,
        evidence: &CityEvidence,
        highlight: Option<&str>,
        warnings: &mut Vec<DataWarning>,
    ) -> Option<City> {
        let Some(coordinate) = coordinates.get(name).copied().flatten() else {
            warn!(city = name, reason = "missing coordinate", "excluding city");
            warnings.push(DataWarning::MissingCoordinate { city: name.into() });
            return None;
        };
        if !coordinate.is_valid() {
            warn!(
                city = name,
                lon = coordinate.lon,
                lat = coordinate.lat,
                reason = "invalid coordinate",
                "excluding city"
            );
            warnings.push(DataWarning::InvalidCoordinate {
                city: name.into(),
                lon: coordinate.lon,
                lat: coordinate.lat,
            });
            return None;
        }

        let estimate = self.estimator.estimate(name, evidence, warnings)?;
        debug!(
            city = name,
            visit_hours = estimate.attributes.visit_hours,
            admission_cost = estimate.attributes.admission_cost,
            attractiveness = estimate.attributes.attractiveness,
            "added city"
        );

        Some(City {
            name: name.to_string(),
            coordinate,
            attributes: estimate.attributes,
            highlight: highlight.map(str::to_string).or(estimate.highlight),
        })
    }

    /// Pairwise legs. Rows of the upper triangle are independent, so they
    /// are computed in parallel and mirrored afterwards.
    fn legs(&self, cities: &[City]) -> Vec<Vec<Leg>> {
        let n = cities.len();
        let upper: Vec<Vec<Leg>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| {
                        let distance = self
                            .distances
                            .distance_km(cities[i].coordinate, cities[j].coordinate);
                        Leg::from_distance(distance, &self.cost)
                    })
                    .collect()
            })
            .collect();

        let mut legs = vec![vec![Leg::NONE; n]; n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, leg) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                legs[i][j] = leg;
                legs[j][i] = leg;
            }
        }
        legs
    }
}
