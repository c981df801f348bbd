//! Planner configuration.
//!
//! Every field has a default matching the documented constants, and every
//! struct accepts partial JSON so a caller only spells out what it changes.

use serde::{Deserialize, Serialize};

use crate::attributes::EstimatorConfig;
use crate::cost::TravelCostModel;
use crate::solver::SelectOptions;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub select: SelectOptions,
    pub cost: TravelCostModel,
    pub estimator: EstimatorConfig,
}

impl PlannerConfig {
    /// Defaults for planning over a ranked top-50 city table.
    pub fn ranked() -> Self {
        Self {
            estimator: EstimatorConfig::ranked(),
            ..Self::default()
        }
    }

    /// Sets the trip-hours ceiling.
    pub fn with_budget(mut self, budget_hours: f64) -> Self {
        self.select.budget_hours = budget_hours;
        self
    }

    /// Sets the preferred origin.
    pub fn with_start_city(mut self, city: impl Into<String>) -> Self {
        self.select.start_city = Some(city.into());
        self
    }
}
