use crate::bundle::ChartBundle;
use crate::data::PlantRecord;
use crate::globe::GlobePoint;
use crate::stats::{process_leaves_data, process_roots_data, process_stem_data, process_water_data};
use std::collections::HashSet;

/// Region / hardiness zone selection. A `None` dimension keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub region: Option<String>,
    pub zone: Option<u8>,
}

impl FilterSelection {
    pub fn new(region: Option<String>, zone: Option<u8>) -> Self {
        // An empty region string selects nothing in particular
        let region = region.filter(|r| !r.is_empty());
        Self { region, zone }
    }

    pub fn matches(&self, point: &GlobePoint) -> bool {
        let zone_match = self
            .zone
            .map_or(true, |zone| point.properties.covers_zone(zone));
        let region_match = self.region.as_deref().map_or(true, |wanted| {
            point
                .properties
                .region
                .as_deref()
                .is_some_and(|region| region.contains(wanted))
        });
        zone_match && region_match
    }
}

/// Narrow a bundle to the selected region and zone.
///
/// Globe points are filtered directly. The four statistical charts are
/// recomputed over the source records whose names appear among the kept
/// points. The input is never modified; a bundle without a globe list is
/// returned as an unchanged copy.
pub fn filter_plant_data(bundle: &ChartBundle, selection: &FilterSelection) -> ChartBundle {
    let Some(globe) = bundle.globe.as_ref() else {
        log::error!(
            "Invalid data passed to filter_plant_data: no globe points ({} records)",
            bundle.records.len()
        );
        return bundle.clone();
    };

    let kept: Vec<GlobePoint> = globe
        .iter()
        .filter(|point| selection.matches(point))
        .cloned()
        .collect();

    let names: HashSet<&str> = kept.iter().map(|p| p.name.as_str()).collect();
    let subset: Vec<PlantRecord> = bundle
        .records
        .iter()
        .filter(|record| names.contains(record.name()))
        .cloned()
        .collect();

    if bundle.records.is_empty() && !kept.is_empty() {
        log::warn!(
            "Bundle has {} matching globe points but no source records; \
             chart statistics are computed over zero rows",
            kept.len()
        );
    }

    log::debug!(
        "Filter {:?} kept {} of {} globe points ({} records)",
        selection,
        kept.len(),
        globe.len(),
        subset.len()
    );

    ChartBundle {
        globe: Some(kept),
        leaves: process_leaves_data(&subset),
        stem: process_stem_data(&subset),
        roots: process_roots_data(&subset),
        water: process_water_data(&subset),
        regions: bundle.regions.clone(),
        hardiness_zones: bundle.hardiness_zones.clone(),
        records: bundle.records.clone(),
    }
}
