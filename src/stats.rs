// Aggregations behind the four statistical charts (leaves, stem, roots, water)

use crate::data::{parse_number, PlantRecord};
use serde::{Deserialize, Serialize};

pub const SEASONS: [&str; 4] = ["Spring", "Summer", "Fall", "Winter"];
pub const FOLIAGE_TYPES: [&str; 3] = ["Deciduous", "Evergreen", "Semi-evergreen"];
pub const GROWTH_RATES: [&str; 3] = ["Fast", "Moderate", "Slow"];
pub const SOIL_TYPES: [&str; 3] = ["Light", "Medium", "Heavy"];
pub const WATER_LEVELS: [&str; 4] = ["Drought", "Moist", "Wet", "Waterlogged"];

/// Upper bound of the water tolerance radar axes
pub const WATER_SCALE: f64 = 5.0;

/// One stacked bar series of the leaves chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stack: String,
    /// Count per season, in [`SEASONS`] order
    pub data: [usize; 4],
}

/// Mean height and spread per growth rate, in [`GROWTH_RATES`] order.
/// An empty growth-rate bucket holds NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemData {
    #[serde(deserialize_with = "nan_from_null")]
    pub height: [f64; 3],
    #[serde(deserialize_with = "nan_from_null")]
    pub spread: [f64; 3],
}

/// A pie slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    pub value: usize,
    pub name: String,
}

/// Tolerance ratios per water level, in [`WATER_LEVELS`] order
pub type WaterData = [f64; 4];

/// NaN is written as `null` by serde_json; read it back as NaN.
pub(crate) fn nan_from_null<'de, D, const N: usize>(deserializer: D) -> Result<[f64; N], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    let len = values.len();
    let values: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
    values
        .try_into()
        .map_err(|_| serde::de::Error::invalid_length(len, &"a fixed-size numeric array"))
}

/// Foliage counts per season.
///
/// The dataset has no per-season foliage information, so every season
/// repeats the same count.
pub fn process_leaves_data(records: &[PlantRecord]) -> Vec<LeafSeries> {
    FOLIAGE_TYPES
        .iter()
        .map(|foliage| {
            let count = records
                .iter()
                .filter(|r| r.foliage.as_deref() == Some(*foliage))
                .count();
            LeafSeries {
                name: foliage.to_string(),
                kind: "bar".to_string(),
                stack: "total".to_string(),
                data: SEASONS.map(|_| count),
            }
        })
        .collect()
}

/// Mean of a size column over the records of one growth rate.
/// Unparsable sizes count as zero; an empty bucket divides by zero.
fn mean_size(bucket: &[&PlantRecord], field: fn(&PlantRecord) -> Option<&str>) -> f64 {
    let total: f64 = bucket.iter().map(|r| parse_number(field(r)).unwrap_or(0.0)).sum();
    total / bucket.len() as f64
}

pub fn process_stem_data(records: &[PlantRecord]) -> StemData {
    let buckets: Vec<Vec<&PlantRecord>> = GROWTH_RATES
        .iter()
        .map(|rate| {
            records
                .iter()
                .filter(|r| r.growth_rate.as_deref() == Some(*rate))
                .collect()
        })
        .collect();

    let mut height = [f64::NAN; 3];
    let mut spread = [f64::NAN; 3];
    for (i, bucket) in buckets.iter().enumerate() {
        height[i] = mean_size(bucket, |r| r.height.as_deref());
        spread[i] = mean_size(bucket, |r| r.width.as_deref());
    }

    StemData { height, spread }
}

/// Soil suitability counts. A record may count toward several soil types.
pub fn process_roots_data(records: &[PlantRecord]) -> Vec<NamedValue> {
    SOIL_TYPES
        .iter()
        .map(|soil| NamedValue {
            value: records
                .iter()
                .filter(|r| r.soils.as_deref().is_some_and(|s| s.contains(soil)))
                .count(),
            name: soil.to_string(),
        })
        .collect()
}

/// Share of records mentioning each water level, scaled to 0..=5.
/// With no records every ratio is NaN.
pub fn process_water_data(records: &[PlantRecord]) -> WaterData {
    let total = records.len() as f64;
    WATER_LEVELS.map(|level| {
        let needle = level.to_lowercase();
        let matching = records
            .iter()
            .filter(|r| {
                r.water_requirements
                    .as_deref()
                    .is_some_and(|w| w.to_lowercase().contains(&needle))
            })
            .count();
        matching as f64 / total * WATER_SCALE
    })
}
