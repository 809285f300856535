use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of raw input characters echoed to the debug log.
const RAW_PREVIEW_CHARS: usize = 500;

/// One row of the plant dataset. Every column is optional; consumers
/// exclude a record from an aggregate when the field they need is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlantRecord {
    pub common_name: Option<String>,
    pub habitat_range: Option<String>,
    pub hardiness_zones: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    #[serde(rename = "Type")]
    pub plant_type: Option<String>,
    pub foliage: Option<String>,
    pub growth_rate: Option<String>,
    pub height: Option<String>,
    pub width: Option<String>,
    pub soils: Option<String>,
    pub water_requirements: Option<String>,
}

impl PlantRecord {
    /// Name used for globe points and for matching records back to points.
    pub fn name(&self) -> &str {
        self.common_name.as_deref().unwrap_or("")
    }

    /// Literal (longitude, latitude) when both columns hold finite numbers.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lon = parse_number(self.longitude.as_deref())?;
        let lat = parse_number(self.latitude.as_deref())?;
        Some((lon, lat))
    }
}

/// Parse a numeric cell. Blank, non-numeric and non-finite values are absent.
pub fn parse_number(field: Option<&str>) -> Option<f64> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse CSV text with a header row into plant records.
///
/// Header names are trimmed and blank lines skipped. Rows with fewer or more
/// cells than the header are accepted; a row the decoder rejects outright is
/// logged and dropped rather than failing the whole load.
pub fn load_csv(text: &str) -> Result<Vec<PlantRecord>> {
    let preview: String = text.chars().take(RAW_PREVIEW_CHARS).collect();
    log::debug!("Raw CSV data: {}", preview);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    // Fail early on an unreadable header row, that is not a per-row problem
    reader.headers().context("Failed to read CSV header row")?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<PlantRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping CSV row {}: {}", idx + 1, e),
        }
    }

    if let Some(first) = records.first() {
        log::debug!("Parsed data sample: {:?}", first);
    }

    Ok(records)
}

/// Build plant records from a JSON array of objects keyed by column name
pub fn records_from_json(value: &Value) -> Result<Vec<PlantRecord>> {
    let array = value
        .as_array()
        .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

    let mut records = Vec::with_capacity(array.len());
    for item in array {
        let obj = item
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;

        // Normalise every cell to the textual form a CSV row would have
        let mut cells = serde_json::Map::new();
        for (key, val) in obj {
            let cell = match val {
                Value::String(s) => Value::String(s.clone()),
                Value::Number(n) => Value::String(n.to_string()),
                Value::Bool(b) => Value::String(b.to_string()),
                Value::Null => Value::Null,
                _ => return Err(anyhow!("Unsupported value type for field '{}'", key)),
            };
            cells.insert(key.trim().to_string(), cell);
        }

        let record: PlantRecord = serde_json::from_value(Value::Object(cells))
            .context("Failed to decode plant record")?;
        records.push(record);
    }

    Ok(records)
}
