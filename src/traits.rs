//! Input seams for the route planner.
//!
//! The planner does not read files. Callers implement these traits for
//! whatever their CSV/GeoJSON loaders produce, or use the plain record
//! types below.

use serde::{Deserialize, Serialize};

use crate::attributes::CityEvidence;
use crate::haversine::Coordinate;

/// Distance between two coordinates in kilometers.
///
/// Implementations must be symmetric and return 0 for identical points.
pub trait DistanceProvider {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64;
}

/// An entry of the geographic reference set.
pub trait Place {
    fn name(&self) -> &str;

    /// City seat location. `None` excludes the city from planning.
    fn coordinate(&self) -> Option<Coordinate>;
}

/// What is known about a city's attractiveness.
pub trait AttractionProfile {
    fn city(&self) -> &str;

    fn evidence(&self) -> &CityEvidence;

    /// Name of the attraction to label the city with, if any.
    fn highlight(&self) -> Option<&str> {
        None
    }
}

/// Plain geographic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

impl GeoRecord {
    /// Creates a located record from longitude and latitude.
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: Some(Coordinate::new(lon, lat)),
        }
    }

    /// A city known by name only.
    pub fn unlocated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinate: None,
        }
    }
}

impl Place for GeoRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// Plain attractiveness record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityProfile {
    pub city: String,
    pub evidence: CityEvidence,
    pub highlight: Option<String>,
}

impl CityProfile {
    /// Creates a profile without a highlight.
    pub fn new(city: impl Into<String>, evidence: CityEvidence) -> Self {
        Self {
            city: city.into(),
            evidence,
            highlight: None,
        }
    }

    /// Sets the attraction to label the city with.
    pub fn with_highlight(mut self, highlight: impl Into<String>) -> Self {
        self.highlight = Some(highlight.into());
        self
    }
}

impl AttractionProfile for CityProfile {
    fn city(&self) -> &str {
        &self.city
    }

    fn evidence(&self) -> &CityEvidence {
        &self.evidence
    }

    fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }
}
