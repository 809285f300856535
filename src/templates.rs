//! Chart option templates for the dashboard.
//!
//! The five option objects follow the ECharts option schema and are handed
//! to the renderer as JSON. Where the renderer would normally take a
//! callback (tooltip text, point colour) the value is computed here per
//! point by a plain function and stored on the data item instead.

use crate::bundle::ChartBundle;
use crate::config::TemplateOptions;
use crate::globe::GlobePoint;
use crate::stats::{FOLIAGE_TYPES, GROWTH_RATES, SEASONS, SOIL_TYPES, WATER_LEVELS, WATER_SCALE};
use serde::Serialize;
use serde_json::{json, Value};

/// Colours from cold to hot, shared by the visual map and [`zone_color`]
pub const ZONE_COLORS: [&str; 4] = ["#3498db", "#2ecc71", "#f1c40f", "#e74c3c"];

const UNKNOWN: &str = "Unknown";

/// Point colour by minimum hardiness zone. An unknown zone is drawn as hot.
pub fn zone_color(min_zone: Option<u8>) -> &'static str {
    match min_zone {
        Some(z) if z <= 3 => ZONE_COLORS[0],
        Some(z) if z <= 6 => ZONE_COLORS[1],
        Some(z) if z <= 9 => ZONE_COLORS[2],
        _ => ZONE_COLORS[3],
    }
}

fn region_label(point: &GlobePoint) -> &str {
    point.properties.region.as_deref().unwrap_or(UNKNOWN)
}

fn zone_label(point: &GlobePoint) -> &str {
    point.properties.hardiness_zone.as_deref().unwrap_or(UNKNOWN)
}

/// HTML tooltip shown on hover
pub fn tooltip_text(point: &GlobePoint) -> String {
    format!(
        "{}<br/>Region: {}<br/>Zone: {}",
        point.name,
        region_label(point),
        zone_label(point)
    )
}

/// Plain-text label shown on emphasis
pub fn emphasis_label(point: &GlobePoint) -> String {
    format!(
        "{}\nZone: {}\nRegion: {}",
        point.name,
        zone_label(point),
        region_label(point)
    )
}

/// The five chart option objects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub globe: Value,
    pub leaves: Value,
    pub stem: Value,
    pub roots: Value,
    pub water: Value,
}

impl ChartOptions {
    /// Templates with empty series data
    pub fn templates(opts: &TemplateOptions) -> Self {
        Self {
            globe: globe_template(opts),
            leaves: leaves_template(),
            stem: stem_template(),
            roots: roots_template(),
            water: water_template(),
        }
    }
}

pub fn globe_template(opts: &TemplateOptions) -> Value {
    json!({
        "backgroundColor": "transparent",
        "tooltip": {},
        "visualMap": {
            "show": true,
            "min": 0,
            "max": 1,
            "inRange": { "color": ZONE_COLORS },
            "text": ["Cold", "Hot"],
            "calculable": true,
            "left": "left",
            "top": "bottom"
        },
        "globe": {
            "baseTexture": opts.asset("earth.jpg"),
            "heightTexture": opts.asset("bathymetry_bw_composite_4k.jpg"),
            "displacementScale": 0.1,
            "shading": "lambert",
            "light": {
                "ambient": { "intensity": 0.3 },
                "main": { "intensity": 1.5, "shadow": true, "shadowQuality": "high" }
            },
            "layers": [
                { "type": "blend", "blendTo": "emission", "texture": opts.asset("night.jpg") },
                {
                    "type": "overlay",
                    "texture": opts.asset("clouds.png"),
                    "shading": "lambert",
                    "distance": 5
                }
            ],
            "viewControl": {
                "autoRotate": opts.auto_rotate,
                "autoRotateSpeed": opts.auto_rotate_speed,
                "distance": 100,
                "alpha": 30,
                "beta": 0,
                "center": [0, 0, 0],
                "minAlpha": 10,
                "maxAlpha": 90,
                "minBeta": -90,
                "maxBeta": 90,
                "minDistance": 50,
                "maxDistance": 200,
                "animation": true,
                "animationDurationUpdate": 1000,
                "damping": 0.8,
                "rotateSensitivity": 0.5,
                "zoomSensitivity": 0.5
            },
            "postEffect": {
                "enable": true,
                "bloom": { "enable": true, "bloomIntensity": 0.1 },
                "SSAO": { "enable": true, "quality": "medium", "radius": 2, "intensity": 1.5 }
            },
            "temporalSuperSampling": { "enable": true, "motionBlurFactor": 0.5 }
        },
        "series": [{
            "type": "scatter3D",
            "coordinateSystem": "globe",
            "data": [],
            "symbolSize": 6,
            "itemStyle": { "opacity": 0.8 },
            "emphasis": {
                "itemStyle": {
                    "color": "#fff",
                    "borderColor": "#000",
                    "borderWidth": 2,
                    "opacity": 1
                },
                "label": {
                    "show": true,
                    "position": "top",
                    "backgroundColor": "rgba(0,0,0,0.7)",
                    "padding": [5, 10],
                    "borderRadius": 4,
                    "color": "#fff",
                    "fontSize": 12
                }
            }
        }]
    })
}

pub fn leaves_template() -> Value {
    let series: Vec<Value> = FOLIAGE_TYPES
        .iter()
        .map(|name| json!({ "name": name, "type": "bar", "stack": "total", "data": [] }))
        .collect();

    json!({
        "title": { "text": "Leaf Characteristics", "left": "center" },
        "tooltip": { "trigger": "axis", "axisPointer": { "type": "shadow" } },
        "legend": { "data": FOLIAGE_TYPES, "top": "10%" },
        "grid": { "left": "3%", "right": "4%", "bottom": "3%", "containLabel": true },
        "xAxis": { "type": "category", "data": SEASONS },
        "yAxis": { "type": "value", "name": "Number of Species" },
        "series": series
    })
}

pub fn stem_template() -> Value {
    json!({
        "title": { "text": "Growth Patterns", "left": "center" },
        "tooltip": { "trigger": "axis" },
        "legend": { "data": ["Height", "Spread"], "top": "10%" },
        "xAxis": { "type": "category", "data": GROWTH_RATES },
        "yAxis": { "type": "value", "name": "Average Size (m)" },
        "series": [
            { "name": "Height", "type": "line", "data": [] },
            { "name": "Spread", "type": "line", "data": [] }
        ]
    })
}

pub fn roots_template() -> Value {
    let slices: Vec<Value> = SOIL_TYPES
        .iter()
        .map(|name| json!({ "value": 0, "name": name }))
        .collect();

    json!({
        "title": { "text": "Soil Requirements", "left": "center" },
        "tooltip": { "trigger": "item" },
        "legend": { "orient": "vertical", "left": "left" },
        "series": [{
            "name": "Soil Types",
            "type": "pie",
            "radius": "50%",
            "data": slices,
            "emphasis": {
                "itemStyle": {
                    "shadowBlur": 10,
                    "shadowOffsetX": 0,
                    "shadowColor": "rgba(0, 0, 0, 0.5)"
                }
            }
        }]
    })
}

pub fn water_template() -> Value {
    let indicators: Vec<Value> = WATER_LEVELS
        .iter()
        .map(|name| json!({ "name": name, "max": WATER_SCALE }))
        .collect();

    json!({
        "title": { "text": "Water Requirements", "left": "center" },
        "tooltip": { "trigger": "axis" },
        "radar": { "indicator": indicators },
        "series": [{
            "type": "radar",
            "data": [{ "value": [], "name": "Water Tolerance" }]
        }]
    })
}

/// Globe series item with its colour, tooltip and label resolved
fn globe_item(point: &GlobePoint) -> Value {
    json!({
        "name": point.name,
        "value": point.value,
        "properties": point.properties,
        "itemStyle": { "color": zone_color(point.properties.min_zone) },
        "tooltip": { "formatter": tooltip_text(point) },
        "label": { "formatter": emphasis_label(point) }
    })
}

/// Fill every template's series with the bundle's data
pub fn populate_options(bundle: &ChartBundle, opts: &TemplateOptions) -> ChartOptions {
    let mut options = ChartOptions::templates(opts);

    let items: Vec<Value> = bundle.globe.iter().flatten().map(globe_item).collect();
    options.globe["series"][0]["data"] = Value::Array(items);

    if let Some(series) = options.leaves["series"].as_array_mut() {
        for (slot, leaf) in series.iter_mut().zip(&bundle.leaves) {
            slot["data"] = json!(leaf.data);
        }
    }

    options.stem["series"][0]["data"] = json!(bundle.stem.height);
    options.stem["series"][1]["data"] = json!(bundle.stem.spread);

    options.roots["series"][0]["data"] = json!(bundle.roots);

    options.water["series"][0]["data"][0]["value"] = json!(bundle.water);

    options
}

/// Access to the live option object of a rendered chart
pub trait ChartHandle {
    fn option(&self) -> Value;
    fn set_option(&mut self, option: Value);
}

/// A detached option object acts as its own handle
impl ChartHandle for Value {
    fn option(&self) -> Value {
        self.clone()
    }

    fn set_option(&mut self, option: Value) {
        *self = option;
    }
}

/// Stop the globe spinning while docked. Without a chart this does nothing.
pub fn update_globe_rotation<H: ChartHandle + ?Sized>(chart: Option<&mut H>, docked: bool) {
    if let Some(chart) = chart {
        let mut option = chart.option();
        option["globe"]["viewControl"]["autoRotate"] = Value::Bool(!docked);
        chart.set_option(option);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::process_plant_data;
    use crate::globe::GlobeProperties;

    fn point(min_zone: Option<u8>, region: Option<&str>, zone: Option<&str>) -> GlobePoint {
        GlobePoint {
            name: "Rowan".to_string(),
            value: [1.0, 2.0, 3.0],
            properties: GlobeProperties {
                hardiness_zone: zone.map(str::to_string),
                plant_type: None,
                region: region.map(str::to_string),
                min_zone,
                max_zone: None,
                has_exact_coordinates: false,
            },
        }
    }

    #[test]
    fn test_zone_color_bands() {
        assert_eq!(zone_color(Some(1)), "#3498db");
        assert_eq!(zone_color(Some(3)), "#3498db");
        assert_eq!(zone_color(Some(4)), "#2ecc71");
        assert_eq!(zone_color(Some(6)), "#2ecc71");
        assert_eq!(zone_color(Some(9)), "#f1c40f");
        assert_eq!(zone_color(Some(10)), "#e74c3c");
        assert_eq!(zone_color(None), "#e74c3c");
    }

    #[test]
    fn test_tooltip_and_label() {
        let p = point(Some(4), Some("UK"), Some("4 to 7"));
        assert_eq!(tooltip_text(&p), "Rowan<br/>Region: UK<br/>Zone: 4 to 7");
        assert_eq!(emphasis_label(&p), "Rowan\nZone: 4 to 7\nRegion: UK");

        let bare = point(None, None, None);
        assert_eq!(tooltip_text(&bare), "Rowan<br/>Region: Unknown<br/>Zone: Unknown");
    }

    #[test]
    fn test_templates_are_empty() {
        let options = ChartOptions::templates(&TemplateOptions::default());
        assert_eq!(options.globe["series"][0]["data"], json!([]));
        assert_eq!(options.globe["globe"]["baseTexture"], "./assets/earth.jpg");
        assert_eq!(options.leaves["xAxis"]["data"], json!(["Spring", "Summer", "Fall", "Winter"]));
        assert_eq!(options.leaves["series"].as_array().unwrap().len(), 3);
        assert_eq!(options.roots["series"][0]["data"][1], json!({"value": 0, "name": "Medium"}));
        assert_eq!(
            options.water["radar"]["indicator"][3],
            json!({"name": "Waterlogged", "max": 5.0})
        );
    }

    #[test]
    fn test_populate_options() {
        let csv = "\
CommonName,HabitatRange,HardinessZones,Foliage,GrowthRate,Height,Width,Soils,WaterRequirements
Rowan,Britain,2 to 8,Deciduous,Fast,10,5,Light,Moist
";
        let bundle = process_plant_data(csv).unwrap();
        let options = populate_options(&bundle, &TemplateOptions::default());

        let item = &options.globe["series"][0]["data"][0];
        assert_eq!(item["name"], "Rowan");
        assert_eq!(item["itemStyle"]["color"], "#3498db");
        assert_eq!(item["properties"]["region"], "UK");
        assert_eq!(item["tooltip"]["formatter"], "Rowan<br/>Region: UK<br/>Zone: 2 to 8");

        assert_eq!(options.leaves["series"][0]["data"], json!([1, 1, 1, 1]));
        assert_eq!(options.stem["series"][0]["data"][0], json!(10.0));
        assert!(options.stem["series"][0]["data"][1].is_null());
        assert_eq!(options.roots["series"][0]["data"][0], json!({"value": 1, "name": "Light"}));
        assert_eq!(options.water["series"][0]["data"][0]["value"][1], json!(5.0));
    }

    #[test]
    fn test_update_globe_rotation() {
        let mut globe = globe_template(&TemplateOptions::default());
        update_globe_rotation(Some(&mut globe), true);
        assert_eq!(globe["globe"]["viewControl"]["autoRotate"], false);
        update_globe_rotation(Some(&mut globe), false);
        assert_eq!(globe["globe"]["viewControl"]["autoRotate"], true);
        update_globe_rotation::<Value>(None, true);
    }

    struct RecordingChart {
        option: Value,
        updates: usize,
    }

    impl ChartHandle for RecordingChart {
        fn option(&self) -> Value {
            self.option.clone()
        }

        fn set_option(&mut self, option: Value) {
            self.option = option;
            self.updates += 1;
        }
    }

    #[test]
    fn test_update_globe_rotation_through_handle() {
        let mut chart = RecordingChart {
            option: globe_template(&TemplateOptions::default()),
            updates: 0,
        };
        update_globe_rotation(Some(&mut chart), true);
        assert_eq!(chart.updates, 1);
        assert_eq!(chart.option["globe"]["viewControl"]["autoRotate"], false);
        assert_eq!(chart.option["globe"]["viewControl"]["distance"], 100);
    }
}
