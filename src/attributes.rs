//! Per-city visit duration, admission cost and attractiveness.
//!
//! Cities arrive with one of three kinds of evidence: a score (usually the
//! best attraction rating), a position in a ranked summary table, or the
//! full list of known attractions with their admission texts. All three
//! resolve durations through the same [`TierTable`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DataWarning;

/// First number embedded in an admission text, e.g. "门票120元" or the
/// full-width "门票１２０元".
static PRICE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9０-９]+(?:[.．][0-9０-９]+)?").expect("price pattern is valid")
});

/// Values assigned to a city by the tier its score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValues {
    pub visit_hours: f64,
    pub admission_cost: f64,
    /// Estimated number of attractions a visit covers.
    pub attraction_count: u32,
}

impl TierValues {
    pub const fn new(visit_hours: f64, admission_cost: f64, attraction_count: u32) -> Self {
        Self {
            visit_hours,
            admission_cost,
            attraction_count,
        }
    }
}

/// A row of the tier table: scores at or above `threshold` get `values`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTier {
    pub threshold: f64,
    #[serde(flatten)]
    pub values: TierValues,
}

impl ScoreTier {
    pub const fn new(threshold: f64, values: TierValues) -> Self {
        Self { threshold, values }
    }
}

/// Ordered score tiers with a floor row and a missing-score row.
///
/// Rows are kept in descending threshold order and scanned first match
/// wins, so every score lands in exactly one row: the first tier it
/// reaches, otherwise `floor`. Absent or NaN scores use `missing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TierTableParts")]
pub struct TierTable {
    tiers: Vec<ScoreTier>,
    floor: TierValues,
    missing: TierValues,
}

#[derive(Deserialize)]
struct TierTableParts {
    tiers: Vec<ScoreTier>,
    floor: TierValues,
    missing: Option<TierValues>,
}

impl From<TierTableParts> for TierTable {
    fn from(parts: TierTableParts) -> Self {
        let missing = parts.missing.unwrap_or(parts.floor);
        TierTable::new(parts.tiers, parts.floor, missing)
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::rating()
    }
}

impl TierTable {
    /// Creates a table, sorting `tiers` by descending threshold.
    pub fn new(mut tiers: Vec<ScoreTier>, floor: TierValues, missing: TierValues) -> Self {
        tiers.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        Self {
            tiers,
            floor,
            missing,
        }
    }

    /// Tiers for 0-5 attraction ratings.
    pub fn rating() -> Self {
        let floor = TierValues::new(3.0, 80.0, 1);
        Self::new(
            vec![
                ScoreTier::new(4.5, TierValues::new(8.0, 150.0, 1)),
                ScoreTier::new(4.0, TierValues::new(6.0, 120.0, 1)),
                ScoreTier::new(3.5, TierValues::new(4.0, 100.0, 1)),
            ],
            floor,
            floor,
        )
    }

    /// Tiers for rank-derived scores of a top-50 table.
    ///
    /// With a rank ceiling of 51, ranks 1-10 score 41 and above, ranks
    /// 11-20 score 31-40, ranks 21-30 score 21-30.
    pub fn rank() -> Self {
        Self::new(
            vec![
                ScoreTier::new(41.0, TierValues::new(24.0, 500.0, 15)),
                ScoreTier::new(31.0, TierValues::new(18.0, 400.0, 12)),
                ScoreTier::new(21.0, TierValues::new(12.0, 300.0, 10)),
            ],
            TierValues::new(8.0, 200.0, 8),
            TierValues::new(6.0, 300.0, 8),
        )
    }

    /// Returns the tiers, highest threshold first.
    pub fn tiers(&self) -> &[ScoreTier] {
        &self.tiers
    }

    /// Returns the values for scores below every threshold.
    pub fn floor(&self) -> &TierValues {
        &self.floor
    }

    /// Returns the values for cities without a usable score.
    pub fn missing(&self) -> &TierValues {
        &self.missing
    }

    /// Values for `score`: the first tier it reaches, else the floor.
    /// `None` and NaN use the missing row.
    pub fn lookup(&self, score: Option<f64>) -> &TierValues {
        match score {
            Some(score) if !score.is_nan() => self
                .tiers
                .iter()
                .find(|tier| score >= tier.threshold)
                .map(|tier| &tier.values)
                .unwrap_or(&self.floor),
            _ => &self.missing,
        }
    }
}

/// Outcome of reading an admission text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    Price(f64),
    Free,
    Unknown,
}

/// Reads an admission text.
///
/// The first embedded number wins, even over a free marker, so
/// "免费，索道80元" is a price of 80.
pub fn parse_admission<S: AsRef<str>>(text: &str, free_markers: &[S]) -> Admission {
    if let Some(price) = PRICE_REGEX
        .find(text)
        .and_then(|m| to_ascii_number(m.as_str()).parse::<f64>().ok())
    {
        return Admission::Price(price);
    }

    let lowered = text.to_lowercase();
    if free_markers
        .iter()
        .any(|marker| lowered.contains(&marker.as_ref().to_lowercase()))
    {
        return Admission::Free;
    }

    Admission::Unknown
}

/// Folds full-width digits and the full-width full stop to ASCII.
fn to_ascii_number(matched: &str) -> String {
    matched
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '．' => '.',
            _ => c,
        })
        .collect()
}

/// A single known attraction of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionRecord {
    pub name: String,
    pub rating: Option<f64>,
    /// Free-form admission text as scraped, e.g. "门票120元" or "免费".
    pub admission: Option<String>,
}

impl AttractionRecord {
    /// Creates an unrated record without admission text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: None,
            admission: None,
        }
    }

    /// Sets the rating.
    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the admission text.
    pub fn admission(mut self, text: impl Into<String>) -> Self {
        self.admission = Some(text.into());
        self
    }
}

/// Attractiveness evidence for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityEvidence {
    /// A score on the tier table's scale, typically the best rating.
    Score(Option<f64>),
    /// Position in a ranked summary table (1 = best), with the table's
    /// admission text for the city if it has one.
    Rank {
        rank: Option<u32>,
        admission: Option<String>,
    },
    /// Every known attraction. `score` overrides the tier input; without
    /// it the best attraction rating is used.
    Attractions {
        score: Option<f64>,
        records: Vec<AttractionRecord>,
    },
}

/// Derived per-city attributes stored on graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityAttributes {
    pub visit_hours: f64,
    pub admission_cost: f64,
    pub attractiveness: f64,
    pub attraction_count: u32,
}

/// Attributes plus the attraction to label the city with.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub attributes: CityAttributes,
    pub highlight: Option<String>,
}

/// Estimator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub tiers: TierTable,
    /// Rank-derived score is `rank_ceiling - rank`.
    pub rank_ceiling: u32,
    /// Substituted for an attraction whose admission text is unparsable.
    pub default_attraction_cost: f64,
    /// City admission when none of its attractions carries price text.
    pub missing_attractions_cost: f64,
    pub free_markers: Vec<String>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            tiers: TierTable::rating(),
            rank_ceiling: 51,
            default_attraction_cost: 50.0,
            missing_attractions_cost: 300.0,
            free_markers: vec!["免费".to_string(), "free".to_string()],
        }
    }
}

impl EstimatorConfig {
    /// Defaults for a ranked top-50 city table.
    pub fn ranked() -> Self {
        Self {
            tiers: TierTable::rank(),
            ..Self::default()
        }
    }
}

/// Resolves [`CityEvidence`] into [`CityAttributes`].
#[derive(Debug, Clone, Default)]
pub struct AttributeEstimator {
    config: EstimatorConfig,
}

impl AttributeEstimator {
    /// Creates an estimator with the given settings.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Returns the estimator settings.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimates a city's attributes, pushing any recovered problems onto
    /// `warnings`. Returns `None` when the city has no known attractions.
    pub fn estimate(
        &self,
        city: &str,
        evidence: &CityEvidence,
        warnings: &mut Vec<DataWarning>,
    ) -> Option<Estimate> {
        match evidence {
            CityEvidence::Score(score) => {
                let score = score.filter(|s| s.is_finite());
                let values = self.tier_values(city, score, warnings);
                Some(Estimate {
                    attributes: CityAttributes {
                        visit_hours: values.visit_hours,
                        admission_cost: values.admission_cost,
                        attractiveness: score.unwrap_or(0.0),
                        attraction_count: values.attraction_count,
                    },
                    highlight: None,
                })
            }
            CityEvidence::Rank { rank, admission } => {
                let score = rank.map(|rank| self.config.rank_ceiling.saturating_sub(rank) as f64);
                let values = self.tier_values(city, score, warnings);
                let admission_cost = match admission {
                    Some(text) => self.admission_or(city, text, values.admission_cost, warnings),
                    None => values.admission_cost,
                };
                Some(Estimate {
                    attributes: CityAttributes {
                        visit_hours: values.visit_hours,
                        admission_cost,
                        attractiveness: score.unwrap_or(0.0),
                        attraction_count: values.attraction_count,
                    },
                    highlight: None,
                })
            }
            CityEvidence::Attractions { score, records } => {
                if records.is_empty() {
                    warn!(city, reason = "no attractions", "excluding city");
                    warnings.push(DataWarning::NoAttractions { city: city.into() });
                    return None;
                }

                let best = best_rated(records);
                let score = score
                    .filter(|s| s.is_finite())
                    .or_else(|| best.and_then(|record| record.rating));
                let values = self.tier_values(city, score, warnings);

                let admission_cost = if records.iter().all(|record| record.admission.is_none()) {
                    self.config.missing_attractions_cost
                } else {
                    records
                        .iter()
                        .filter_map(|record| record.admission.as_deref())
                        .map(|text| {
                            self.admission_or(
                                city,
                                text,
                                self.config.default_attraction_cost,
                                warnings,
                            )
                        })
                        .sum()
                };

                Some(Estimate {
                    attributes: CityAttributes {
                        visit_hours: values.visit_hours,
                        admission_cost,
                        attractiveness: score.unwrap_or(0.0),
                        attraction_count: records.len() as u32,
                    },
                    highlight: best.map(|record| record.name.clone()),
                })
            }
        }
    }

    fn tier_values(
        &self,
        city: &str,
        score: Option<f64>,
        warnings: &mut Vec<DataWarning>,
    ) -> TierValues {
        if score.is_none() {
            warn!(city, reason = "missing score", "using tier defaults");
            warnings.push(DataWarning::MissingScore { city: city.into() });
        }
        *self.config.tiers.lookup(score)
    }

    fn admission_or(
        &self,
        city: &str,
        text: &str,
        fallback: f64,
        warnings: &mut Vec<DataWarning>,
    ) -> f64 {
        match parse_admission(text, &self.config.free_markers) {
            Admission::Price(price) => price,
            Admission::Free => 0.0,
            Admission::Unknown => {
                warn!(city, text, fallback, "unparsable admission");
                warnings.push(DataWarning::UnparsableAdmission {
                    city: city.into(),
                    text: text.to_string(),
                    fallback,
                });
                fallback
            }
        }
    }
}

/// Highest-rated record, first one on ties. Unrated and NaN ratings never win.
fn best_rated(records: &[AttractionRecord]) -> Option<&AttractionRecord> {
    let mut best: Option<(&AttractionRecord, f64)> = None;
    for record in records {
        let Some(rating) = record.rating.filter(|r| !r.is_nan()) else {
            continue;
        };
        if best.is_none_or(|(_, top)| rating > top) {
            best = Some((record, rating));
        }
    }
    best.map(|(record, _)| record)
}
