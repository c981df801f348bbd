//! Real Chinese city seats and attraction data for realistic fixtures.
//!
//! Coordinates are the municipal government seats, rounded to three
//! decimals. Ratings and prices are representative, not live data.

#![allow(dead_code)]

use tour_planner::attributes::{AttractionRecord, CityEvidence};
use tour_planner::traits::{CityProfile, GeoRecord};

/// A named city seat.
#[derive(Debug, Clone)]
pub struct Seat {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
}

impl Seat {
    pub const fn new(name: &'static str, lon: f64, lat: f64) -> Self {
        Self { name, lon, lat }
    }

    pub fn record(&self) -> GeoRecord {
        GeoRecord::new(self.name, self.lon, self.lat)
    }
}

// ============================================================================
// Geographic reference set
// ============================================================================

pub const SEATS: &[Seat] = &[
    Seat::new("北京", 116.407, 39.904),
    Seat::new("上海", 121.474, 31.230),
    Seat::new("广州", 113.264, 23.129),
    Seat::new("深圳", 114.058, 22.543),
    Seat::new("成都", 104.066, 30.572),
    Seat::new("重庆", 106.551, 29.563),
    Seat::new("昆明", 102.833, 24.880),
    Seat::new("西安", 108.940, 34.341),
    Seat::new("杭州", 120.155, 30.274),
    Seat::new("南京", 118.797, 32.060),
    Seat::new("厦门", 118.089, 24.480),
    Seat::new("武汉", 114.305, 30.593),
    Seat::new("桂林", 110.290, 25.274),
    Seat::new("长沙", 112.938, 28.228),
    Seat::new("黄山", 118.338, 29.715),
    Seat::new("泰安", 117.087, 36.200),
    Seat::new("张家界", 110.479, 29.117),
    Seat::new("丽江", 100.227, 26.855),
    Seat::new("拉萨", 91.117, 29.653),
    Seat::new("青岛", 120.383, 36.067),
    Seat::new("苏州", 120.585, 31.299),
    Seat::new("三亚", 109.512, 18.252),
    Seat::new("大理", 100.268, 25.606),
    Seat::new("洛阳", 112.454, 34.619),
    Seat::new("哈尔滨", 126.535, 45.803),
];

pub fn geo_records() -> Vec<GeoRecord> {
    SEATS.iter().map(Seat::record).collect()
}

// ============================================================================
// Rating mode: best-rated mountain per city
// ============================================================================

pub const MOUNTAINS: &[(&str, &str, f64)] = &[
    ("黄山", "黄山风景区", 4.8),
    ("泰安", "泰山", 4.7),
    ("张家界", "天门山", 4.7),
    ("洛阳", "老君山", 4.7),
    ("丽江", "玉龙雪山", 4.6),
    ("成都", "青城山", 4.6),
    ("青岛", "崂山", 4.6),
    ("广州", "白云山", 4.6),
    ("北京", "香山", 4.5),
    ("桂林", "尧山", 4.5),
    ("大理", "苍山", 4.5),
    ("昆明", "西山", 4.4),
    ("西安", "骊山", 4.4),
    ("杭州", "吴山", 4.3),
    ("长沙", "岳麓山", 4.6),
    ("重庆", "歌乐山", 3.9),
    ("武汉", "珞珈山", 3.4),
];

pub fn mountain_profiles() -> Vec<CityProfile> {
    MOUNTAINS
        .iter()
        .map(|(city, mountain, rating)| {
            CityProfile::new(*city, CityEvidence::Score(Some(*rating))).with_highlight(*mountain)
        })
        .collect()
}

// ============================================================================
// Rank mode: top cities for foreign tourists
// ============================================================================

pub const TOP_CITIES: &[(&str, Option<&str>)] = &[
    ("北京", Some("免费")),
    ("上海", Some("具体收费情况以现场公示为主")),
    ("西安", Some("门票120元")),
    ("成都", None),
    ("杭州", Some("免费")),
    ("桂林", Some("漓江游船215元")),
    ("重庆", None),
    ("丽江", Some("古城维护费50元")),
    ("昆明", None),
    ("三亚", None),
    ("厦门", Some("鼓浪屿轮渡35元")),
    ("苏州", Some("拙政园80元")),
    ("南京", None),
    ("张家界", Some("门票225元")),
    ("黄山", Some("门票190元")),
    ("拉萨", Some("布达拉宫200元")),
    ("大理", None),
    ("青岛", None),
    ("哈尔滨", Some("免费")),
    ("洛阳", Some("龙门石窟90元")),
    ("长沙", None),
    ("武汉", None),
    ("泰安", Some("门票115元")),
];

pub fn ranked_profiles() -> Vec<CityProfile> {
    TOP_CITIES
        .iter()
        .enumerate()
        .map(|(i, (city, admission))| {
            CityProfile::new(
                *city,
                CityEvidence::Rank {
                    rank: Some(i as u32 + 1),
                    admission: admission.map(str::to_string),
                },
            )
        })
        .collect()
}

// ============================================================================
// Real-attraction mode: Guangzhou
// ============================================================================

pub fn guangzhou_attractions() -> Vec<AttractionRecord> {
    vec![
        AttractionRecord::new("广州塔").rating(4.7).admission("150元起"),
        AttractionRecord::new("陈家祠").rating(4.6).admission("门票10元"),
        AttractionRecord::new("白云山").rating(4.6).admission("5元"),
        AttractionRecord::new("沙面").rating(4.5).admission("免费"),
        AttractionRecord::new("长隆野生动物世界").rating(4.8).admission("具体收费情况以现场公示为主"),
        AttractionRecord::new("越秀公园").rating(4.4),
    ]
}

/// Guangzhou with its real attraction list, keeping its rank-table score.
pub fn guangzhou_profile(rank_score: f64) -> CityProfile {
    CityProfile::new(
        "广州",
        CityEvidence::Attractions {
            score: Some(rank_score),
            records: guangzhou_attractions(),
        },
    )
}
