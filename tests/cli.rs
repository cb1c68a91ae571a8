use assert_cmd::Command;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("type-rangers").unwrap()
}

#[test]
fn prints_report_table() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = bin()
        .args(["--config", config.to_str().unwrap()])
        .args(["--runs", "2", "--max-secs", "20", "--seed", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("score"));
    assert!(stdout.contains("survived"));
}

#[test]
fn json_report_parses() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = bin()
        .args(["--config", config.to_str().unwrap()])
        .args(["--runs", "2", "--max-secs", "20", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["runs"].as_array().map(Vec::len), Some(2));
    assert!(report["mean_score"].is_number());
}

#[test]
fn save_config_writes_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    bin()
        .args(["--config", config.to_str().unwrap()])
        .args(["--difficulty", "long", "--save-config"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&config).unwrap()).unwrap();
    assert_eq!(saved["spawn_difficulty"], "long");
    assert_eq!(saved["lives"], 3);
}

#[test]
fn invalid_config_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{ "lives": 0 }"#).unwrap();

    bin()
        .args(["--config", config.to_str().unwrap(), "--runs", "1"])
        .assert()
        .failure();
}

#[test]
fn words_dir_must_hold_every_list() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    bin()
        .args(["--config", config.to_str().unwrap()])
        .args(["--words-dir", dir.path().to_str().unwrap(), "--runs", "1"])
        .assert()
        .failure();
}

#[test]
fn zero_frame_length_is_rejected() {
    bin().args(["--frame-ms", "0"]).assert().failure();
}

#[test]
fn nan_error_rate_is_rejected() {
    let output = bin()
        .args(["--runs", "1", "--max-secs", "5", "--error-rate", "NaN"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--error-rate"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn error_rate_above_one_is_rejected() {
    bin().args(["--error-rate", "1.5"]).assert().failure();
}

#[test]
fn non_finite_or_negative_cps_is_rejected() {
    for cps in ["NaN", "inf", "-2"] {
        bin().args(["--cps", cps]).assert().failure();
    }
}
