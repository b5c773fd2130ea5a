use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn responder_map(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("responder-map").unwrap();
    cmd.current_dir(dir.path()).env("RUST_LOG", "error");
    cmd
}

#[test]
fn summary_json_partitions_assets() {
    let dir = TempDir::new().unwrap();
    let output = responder_map(&dir)
        .args(["summary", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summary = &body["summary"];
    assert_eq!(summary["total"], 50);
    assert_eq!(
        summary["covered"].as_u64().unwrap() + summary["uncovered"].as_u64().unwrap(),
        50
    );
    assert_eq!(body["stations"].as_array().unwrap().len(), 2);
}

#[test]
fn summary_text_output() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Coverage Summary"))
        .stdout(predicate::str::contains("User Station: Nagpur Fire Station"));
}

#[test]
fn suggest_names_station_by_score() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["suggest", "--steps", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested Station (covers "));
}

#[test]
fn place_rejects_out_of_range_latitude() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["place", "--lat", "95", "--lng", "79"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid coordinate"));
}

#[test]
fn place_rejects_polar_station() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["place", "--lat", "90", "--lng", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[E4001]"))
        .stderr(predicate::str::contains("too close to a pole"));
}

#[test]
fn json_format_reports_errors_as_json() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["--format", "json", "place", "--lat", "95", "--lng", "79"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"code\": \"INVALID_COORDINATE\""))
        .stderr(predicate::str::contains("\"code_str\": \"E4001\""))
        .stderr(predicate::str::contains("\"category\": \"Geometry\""))
        .stderr(predicate::str::contains("\"suggestion\""))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn unknown_format_is_validation_error() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["--format", "yaml", "summary"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[E7000] Unknown output format `yaml`"));
}

#[test]
fn place_default_name() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["place", "--lat", "21.5", "--lng", "79.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User Station at (21.500, 79.000)"));
}

#[test]
fn replay_writes_map() {
    let dir = TempDir::new().unwrap();
    let events = dir.path().join("events.jsonl");
    std::fs::write(
        &events,
        concat!(
            "{\"event\":\"toggle_add_user_station\",\"checked\":true}\n",
            "{\"event\":\"map_click\",\"latitude\":21.5,\"longitude\":79.0}\n",
            "{\"event\":\"toggle_heatmap\",\"checked\":true}\n",
            "{\"event\":\"suggest_location\"}\n",
        ),
    )
    .unwrap();
    let out = dir.path().join("map.geojson");

    let output = responder_map(&dir)
        .args(["replay", "events.jsonl", "--out", "map.geojson", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["events"], 4);
    assert_eq!(body["stations"], 4);

    let map: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(map["type"], "FeatureCollection");
    let heatmaps = map["features"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["properties"]["kind"] == "heatmap")
        .count();
    assert_eq!(heatmaps, 1);
}

#[test]
fn replay_rejects_unknown_event() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("events.jsonl"), "{\"event\":\"zoom\"}\n").unwrap();

    responder_map(&dir)
        .args(["replay", "events.jsonl"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("events.jsonl:1"));
}

#[test]
fn replay_bad_event_json_report_carries_line() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("events.jsonl"), "{\"event\":\"zoom\"}\n").unwrap();

    responder_map(&dir)
        .args(["replay", "events.jsonl", "--format", "json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("\"code_str\": \"E5002\""))
        .stderr(predicate::str::contains("\"context\": \"events.jsonl:1\""));
}

#[test]
fn render_and_isochrones_write_geojson() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["render", "--out", "map.geojson", "--steps", "1"])
        .assert()
        .success();
    assert!(dir.path().join("map.geojson").exists());

    responder_map(&dir)
        .args(["isochrones", "--out", "iso.geojson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Station B"));

    let iso: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("iso.geojson")).unwrap())
            .unwrap();
    assert_eq!(iso["features"].as_array().unwrap().len(), 2);
}

#[test]
fn config_file_changes_asset_count() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".responder.toml"),
        "stations = []\n\n[assets]\ncount = 12\n",
    )
    .unwrap();

    let output = responder_map(&dir)
        .args(["summary", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["summary"]["total"], 12);
}

#[test]
fn missing_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["--config", "nope.toml", "summary"])
        .assert()
        .code(3);
}

#[test]
fn metrics_flag_prints_counters() {
    let dir = TempDir::new().unwrap();
    responder_map(&dir)
        .args(["summary", "--metrics"])
        .assert()
        .success()
        .stderr(predicate::str::contains("stations_added"));
}
