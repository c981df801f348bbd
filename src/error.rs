//! Planner error and warning types.
//!
//! `PlanError` aborts a planning run. `DataWarning` records input problems
//! that were recovered from with a documented fallback.

use crate::graph::CityName;

/// Fatal planning failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Nothing survived graph construction, so there is no origin.
    #[error("no eligible city to start the route from")]
    NoEligibleCities,

    /// The trip-hours ceiling is not a positive finite number.
    #[error("budget must be a positive number of hours, got {0}")]
    InvalidBudget(f64),

    /// A route names a city that is not in the graph.
    #[error("city {0} is not in the route graph")]
    UnknownCity(CityName),

    /// Two consecutive route stops have no edge between them.
    #[error("no leg between {from} and {to}")]
    MissingLeg { from: CityName, to: CityName },

    /// A route flagged closed whose last stop is not its origin.
    #[error("closed route must end at its origin")]
    UnclosedLoop,
}

/// Recoverable data-quality problems found while planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataWarning {
    /// The city has no entry, or no point, in the geographic reference set.
    #[error("{city}: no coordinate, excluded")]
    MissingCoordinate { city: CityName },

    /// The coordinate is NaN or out of range.
    #[error("{city}: invalid coordinate ({lon}, {lat}), excluded")]
    InvalidCoordinate { city: CityName, lon: f64, lat: f64 },

    /// An admission string had neither a number nor a free marker.
    #[error("{city}: unparsable admission {text:?}, using {fallback}")]
    UnparsableAdmission {
        city: CityName,
        text: String,
        fallback: f64,
    },

    /// No usable score or rank; the tier table's missing-score row applies.
    #[error("{city}: no score, using tier defaults")]
    MissingScore { city: CityName },

    /// Real-attraction data was supplied but empty.
    #[error("{city}: no known attractions, excluded")]
    NoAttractions { city: CityName },

    /// A second attractiveness record for an already-seen city.
    #[error("{city}: duplicate record ignored")]
    DuplicateCity { city: CityName },

    /// The requested start city is not in the graph.
    #[error("start city {city} is not eligible, falling back to {fallback}")]
    UnknownStartCity { city: CityName, fallback: CityName },

    /// The origin's own visit already uses up the budget.
    #[error("{city}: visit of {visit_hours}h exceeds the {budget_hours}h budget")]
    OriginExceedsBudget {
        city: CityName,
        visit_hours: f64,
        budget_hours: f64,
    },
}

impl DataWarning {
    /// The city the warning is about.
    pub fn city(&self) -> &str {
        match self {
            DataWarning::MissingCoordinate { city }
            | DataWarning::InvalidCoordinate { city, .. }
            | DataWarning::UnparsableAdmission { city, .. }
            | DataWarning::MissingScore { city }
            | DataWarning::NoAttractions { city }
            | DataWarning::DuplicateCity { city }
            | DataWarning::UnknownStartCity { city, .. }
            | DataWarning::OriginExceedsBudget { city, .. } => city,
        }
    }
}
