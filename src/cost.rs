//! Closed-form transit estimates.

use serde::{Deserialize, Serialize};

/// Assumed average high-speed-rail speed.
const DEFAULT_SPEED_KMH: f64 = 250.0;

/// Flat fare charged on every leg.
const DEFAULT_BASE_FARE: f64 = 20.0;

/// Fare per kilometer on top of the base fare.
const DEFAULT_PER_KM_RATE: f64 = 0.45;

/// Converts a leg distance into travel time and fare.
///
/// The coefficients are tuning knobs, not physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelCostModel {
    pub speed_kmh: f64,
    pub base_fare: f64,
    pub per_km_rate: f64,
}

impl Default for TravelCostModel {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            base_fare: DEFAULT_BASE_FARE,
            per_km_rate: DEFAULT_PER_KM_RATE,
        }
    }
}

impl TravelCostModel {
    /// Creates a cost model from a speed in km/h, a flat fare and a per-km rate.
    pub fn new(speed_kmh: f64, base_fare: f64, per_km_rate: f64) -> Self {
        Self {
            speed_kmh,
            base_fare,
            per_km_rate,
        }
    }

    /// Hours spent covering `distance_km`.
    pub fn travel_hours(&self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh
    }

    /// Fare for a leg of `distance_km`.
    pub fn travel_cost(&self, distance_km: f64) -> f64 {
        self.base_fare + distance_km * self.per_km_rate
    }

    /// `(travel_hours, travel_cost)` for a leg of the given length.
    pub fn estimate(&self, distance_km: f64) -> (f64, f64) {
        (self.travel_hours(distance_km), self.travel_cost(distance_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_coefficients() {
        let model = TravelCostModel::default();
        assert_eq!(model.speed_kmh, 250.0);
        assert_eq!(model.base_fare, 20.0);
        assert_eq!(model.per_km_rate, 0.45);
    }

    #[test]
    fn known_legs() {
        let model = TravelCostModel::default();
        assert_eq!(model.estimate(500.0), (2.0, 245.0));
        assert_eq!(model.estimate(1000.0), (4.0, 470.0));
    }

    #[test]
    fn zero_distance_still_pays_base_fare() {
        let model = TravelCostModel::default();
        assert_eq!(model.estimate(0.0), (0.0, 20.0));
    }

    #[test]
    fn custom_coefficients() {
        let model = TravelCostModel::new(100.0, 0.0, 1.0);
        assert_eq!(model.estimate(300.0), (3.0, 300.0));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let model: TravelCostModel = serde_json::from_str(r#"{"speed_kmh": 300.0}"#).unwrap();
        assert_eq!(model.speed_kmh, 300.0);
        assert_eq!(model.base_fare, 20.0);
        assert_eq!(model.per_km_rate, 0.45);
    }

    proptest! {
        #[test]
        fn estimates_are_monotonic(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
            let model = TravelCostModel::default();
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(model.travel_hours(short) <= model.travel_hours(long));
            prop_assert!(model.travel_cost(short) <= model.travel_cost(long));
        }
    }
}
