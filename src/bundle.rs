use crate::data::{self, PlantRecord};
use crate::globe::{process_globe_data, GlobePoint};
use crate::region::standardize_region;
use crate::stats::{
    nan_from_null, process_leaves_data, process_roots_data, process_stem_data,
    process_water_data, LeafSeries, NamedValue, StemData, WaterData,
};
use crate::zones::parse_zone_range;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every dataset the dashboard charts need, derived from one set of records.
///
/// `globe` is optional only so that a bundle read back from JSON without a
/// globe list can be told apart; bundles built here always carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    #[serde(default)]
    pub globe: Option<Vec<GlobePoint>>,
    pub leaves: Vec<LeafSeries>,
    pub stem: StemData,
    pub roots: Vec<NamedValue>,
    #[serde(deserialize_with = "nan_from_null")]
    pub water: WaterData,
    pub regions: Vec<String>,
    pub hardiness_zones: Vec<u8>,
    /// Source rows, kept so charts can be recomputed after filtering
    #[serde(default)]
    pub records: Vec<PlantRecord>,
}

impl ChartBundle {
    /// Run every projector over `records` and collect the filter vocabularies
    pub fn from_records(records: Vec<PlantRecord>) -> Self {
        let mut regions = BTreeSet::new();
        let mut zones = BTreeSet::new();

        for record in &records {
            if let Some(region) = standardize_region(record.habitat_range.as_deref()) {
                regions.insert(region);
            }
            if let Some(range) = parse_zone_range(record.hardiness_zones.as_deref()) {
                zones.extend(range.zones());
            }
        }

        let bundle = ChartBundle {
            globe: Some(process_globe_data(&records)),
            leaves: process_leaves_data(&records),
            stem: process_stem_data(&records),
            roots: process_roots_data(&records),
            water: process_water_data(&records),
            regions: regions.into_iter().collect(),
            hardiness_zones: zones.into_iter().collect(),
            records,
        };

        log::info!("Processed data summary: {}", bundle.summary());
        bundle
    }

    pub fn globe_len(&self) -> usize {
        self.globe.as_ref().map_or(0, Vec::len)
    }

    /// One-line cardinality summary for diagnostics
    pub fn summary(&self) -> String {
        format!(
            "regions={} zones={} globePoints={} leavesData={} stemData=[height, spread] \
             rootsData={} waterData={}",
            self.regions.len(),
            self.hardiness_zones.len(),
            self.globe_len(),
            self.leaves.len(),
            self.roots.len(),
            self.water.len(),
        )
    }
}

/// Parse CSV text and build the full chart bundle
pub fn process_plant_data(csv_text: &str) -> Result<ChartBundle> {
    let records = data::load_csv(csv_text).context("Failed to parse plant CSV")?;
    Ok(ChartBundle::from_records(records))
}

/// Build the chart bundle from a JSON array of plant objects
pub fn process_plant_json(json_text: &str) -> Result<ChartBundle> {
    let value: serde_json::Value =
        serde_json::from_str(json_text).context("Failed to parse plant JSON")?;
    let records = data::records_from_json(&value)?;
    Ok(ChartBundle::from_records(records))
}
