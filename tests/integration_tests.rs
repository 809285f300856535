use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

/// Helper function to run plantalytics with arguments and stdin input
fn run_plantalytics(args: &[&str], stdin_content: &str) -> Result<String, String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_plantalytics"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_content.as_bytes())
            .map_err(|e| format!("Failed to write to stdin: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn run_json(args: &[&str], stdin_content: &str) -> Value {
    let out = run_plantalytics(args, stdin_content).expect("command failed");
    serde_json::from_str(&out).expect("output is not valid JSON")
}

fn fixture() -> String {
    fs::read_to_string("test/plants.csv").expect("Failed to read test CSV")
}

fn globe_names(bundle: &Value) -> Vec<String> {
    bundle["globe"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_end_to_end_process() {
    let bundle = run_json(&["process"], &fixture());
    assert_eq!(
        globe_names(&bundle),
        vec!["Red Maple", "English Oak", "Holly", "Tea Tree", "Kowhai"]
    );
    assert_eq!(
        bundle["regions"],
        serde_json::json!(["New Zealand", "UK", "USA", "Western Asia"])
    );
    assert_eq!(
        bundle["hardinessZones"],
        serde_json::json!([3, 4, 5, 6, 7, 8, 9, 10, 11])
    );
    assert_eq!(bundle["leaves"][1]["data"], serde_json::json!([3, 3, 3, 3]));
    assert_eq!(bundle["records"].as_array().unwrap().len(), 6);
}

#[test]
fn test_end_to_end_process_from_file() {
    let bundle = run_json(&["process", "--input", "test/plants.csv"], "");
    assert_eq!(globe_names(&bundle).len(), 5);
}

#[test]
fn test_end_to_end_process_json_input() {
    let plants = r#"[
        {"CommonName": "Baobab", "HabitatRange": "Africa", "Foliage": "Deciduous"},
        {"CommonName": "Moss", "Longitude": 12.5, "Latitude": 55.7, "Foliage": "Evergreen"}
    ]"#;
    let bundle = run_json(&["process", "--json"], plants);
    assert_eq!(globe_names(&bundle), vec!["Baobab", "Moss"]);
    assert_eq!(bundle["globe"][1]["properties"]["hasExactCoordinates"], true);
    assert_eq!(bundle["leaves"][0]["data"], serde_json::json!([1, 1, 1, 1]));
}

#[test]
fn test_end_to_end_process_json_rejects_csv() {
    let result = run_plantalytics(&["process", "--json"], &fixture());
    assert!(result.is_err(), "CSV is not a JSON array");
}

#[test]
fn test_end_to_end_globe_point_on_sphere() {
    let bundle = run_json(&["process"], &fixture());
    let value = bundle["globe"][0]["value"].as_array().unwrap();
    let coords: Vec<f64> = value.iter().map(|v| v.as_f64().unwrap()).collect();
    let radius = coords.iter().map(|c| c * c).sum::<f64>().sqrt();
    assert!((radius - 100.0).abs() < 1e-6);
    assert!((coords[1] - 63.97).abs() < 0.01);
}

#[test]
fn test_end_to_end_filter_by_zone() {
    let bundle = run_plantalytics(&["process"], &fixture()).unwrap();
    let filtered = run_json(&["filter", "--zone", "10"], &bundle);
    assert_eq!(globe_names(&filtered), vec!["Tea Tree", "Kowhai"]);
    // Moderate growth: Tea Tree 5 m and Kowhai 8 m
    let height = filtered["stem"]["height"][1].as_f64().unwrap();
    assert!((height - 6.5).abs() < 1e-9);
    assert!(filtered["stem"]["height"][0].is_null());
    // Vocabularies describe the full dataset
    assert_eq!(filtered["regions"].as_array().unwrap().len(), 4);
}

#[test]
fn test_end_to_end_filter_by_region() {
    let bundle = run_plantalytics(&["process"], &fixture()).unwrap();
    let filtered = run_json(&["filter", "--region", "UK"], &bundle);
    assert_eq!(globe_names(&filtered), vec!["English Oak"]);
    assert_eq!(filtered["roots"][0]["value"], 0);
    assert_eq!(filtered["roots"][2]["value"], 1);
}

#[test]
fn test_end_to_end_filter_zone_absent() {
    let bundle = run_plantalytics(&["process"], &fixture()).unwrap();
    let filtered = run_json(&["filter", "--zone", "1"], &bundle);
    assert!(globe_names(&filtered).is_empty());
    assert!(filtered["water"].as_array().unwrap().iter().all(Value::is_null));
}

#[test]
fn test_end_to_end_filter_without_globe_is_noop() {
    let mut bundle = run_json(&["process"], &fixture());
    bundle.as_object_mut().unwrap().remove("globe");
    let filtered = run_json(&["filter", "--zone", "5"], &bundle.to_string());
    assert!(filtered["globe"].is_null());
    assert_eq!(filtered["leaves"], bundle["leaves"]);
}

#[test]
fn test_end_to_end_options() {
    let bundle = run_plantalytics(&["process"], &fixture()).unwrap();
    let options = run_json(&["options", "--docked"], &bundle);
    assert_eq!(options["globe"]["globe"]["viewControl"]["autoRotate"], false);
    assert_eq!(
        options["globe"]["series"][0]["data"].as_array().unwrap().len(),
        5
    );
    assert_eq!(options["leaves"]["series"][2]["data"], serde_json::json!([1, 1, 1, 1]));
    assert_eq!(options["water"]["radar"]["indicator"].as_array().unwrap().len(), 4);
}

#[test]
fn test_end_to_end_invalid_bundle() {
    let result = run_plantalytics(&["filter"], "not json");
    assert!(result.is_err(), "Should have failed with a parse error");
    assert!(result.unwrap_err().contains("Failed to parse bundle JSON"));
}

#[test]
fn test_end_to_end_missing_file() {
    let result = run_plantalytics(&["process", "--input", "test/does_not_exist.csv"], "");
    assert!(result.is_err());
}
