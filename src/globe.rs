//! Globe scatter projection.
//!
//! Each plant with usable coordinates or a recognisable habitat becomes one
//! point on a sphere of radius [`GLOBE_RADIUS`].

use crate::data::PlantRecord;
use crate::region::{normalize_region, Region};
use crate::zones::parse_zone_range;
use serde::{Deserialize, Serialize};

pub const GLOBE_RADIUS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobePoint {
    pub name: String,
    /// Cartesian position `[x, y, z]`
    pub value: [f64; 3],
    pub properties: GlobeProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobeProperties {
    /// Raw `HardinessZones` text
    pub hardiness_zone: Option<String>,
    #[serde(rename = "type")]
    pub plant_type: Option<String>,
    pub region: Option<String>,
    pub min_zone: Option<u8>,
    pub max_zone: Option<u8>,
    pub has_exact_coordinates: bool,
}

impl GlobeProperties {
    /// True when the parsed zone range includes `zone`. Unknown ranges never match.
    pub fn covers_zone(&self, zone: u8) -> bool {
        match (self.min_zone, self.max_zone) {
            (Some(min), Some(max)) => min <= zone && zone <= max,
            _ => false,
        }
    }
}

/// Map degrees of longitude/latitude onto a sphere of the given radius
pub fn project_to_sphere(longitude: f64, latitude: f64, radius: f64) -> [f64; 3] {
    let lon = longitude.to_radians();
    let lat = latitude.to_radians();

    let x = radius * lat.cos() * lon.cos();
    let y = radius * lat.sin();
    let z = radius * lat.cos() * lon.sin();

    [x, y, z]
}

/// Build one globe point per qualifying record, in input order
pub fn process_globe_data(records: &[PlantRecord]) -> Vec<GlobePoint> {
    records.iter().filter_map(globe_point).collect()
}

fn globe_point(record: &PlantRecord) -> Option<GlobePoint> {
    let exact = record.coordinates();
    let region = normalize_region(record.habitat_range.as_deref());

    if exact.is_none() && region.is_none() {
        log::warn!(
            "Plant missing both coordinates and region: {}",
            record.name()
        );
        return None;
    }

    // A bare region name ("Asia") matches no alias but still has a table entry
    let table_region = region
        .as_ref()
        .and_then(|r| r.canonical().or_else(|| Region::from_name(r.as_str())));
    let (longitude, latitude) = exact
        .or_else(|| table_region.map(Region::coordinates))
        .unwrap_or((0.0, 0.0));

    let zones = parse_zone_range(record.hardiness_zones.as_deref());

    Some(GlobePoint {
        name: record.name().to_string(),
        value: project_to_sphere(longitude, latitude, GLOBE_RADIUS),
        properties: GlobeProperties {
            hardiness_zone: record.hardiness_zones.clone(),
            plant_type: record.plant_type.clone(),
            region: region.map(|r| r.into_string()),
            min_zone: zones.map(|z| z.min),
            max_zone: zones.map(|z| z.max),
            has_exact_coordinates: exact.is_some(),
        },
    })
}
