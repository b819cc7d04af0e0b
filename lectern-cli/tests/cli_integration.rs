//! Integration tests for the lectern CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[test]
fn test_entities_from_literal_text() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--text")
        .arg("The National Library of Israel is located in Jerusalem, Israel.");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "ORGANIZATION\tNational Library of Israel",
        ))
        .stdout(predicate::str::contains("GPE\tJerusalem"))
        .stdout(predicate::str::contains("GPE\tIsrael"));
}

#[test]
fn test_entities_from_file() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities").arg(fixture_path("sample.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("GPE\tJerusalem"))
        .stdout(predicate::str::contains("PERSON\tCohen"))
        .stdout(predicate::str::contains("ORGANIZATION\tIsrael Museum"));
}

#[test]
fn test_entities_from_stdin() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .write_stdin("Tel Aviv is on the coast.");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("GPE\tTel Aviv"));
}

#[test]
fn test_entities_json_output() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--text")
        .arg("Jerusalem is old.")
        .arg("-f")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entity = &parsed[0]["entities"][0];
    assert_eq!(entity["label"], "GPE");
    assert_eq!(entity["text"], "Jerusalem");
    assert_eq!(entity["start"], 0);
    assert_eq!(entity["end"], 9);
}

#[test]
fn test_entities_tree_output() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--text")
        .arg("Jerusalem is old.")
        .arg("-f")
        .arg("tree");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(S (GPE Jerusalem/NNP)"))
        .stdout(predicate::str::contains("└─"));
}

#[test]
fn test_entities_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("entities.txt");

    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--text")
        .arg("Jerusalem.")
        .arg("-o")
        .arg(&out_path);

    cmd.assert().success();

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("GPE\tJerusalem"));
}

#[test]
fn test_entities_extra_gpe_flag() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--text")
        .arg("They met in Rehovot.")
        .arg("--gpe")
        .arg("rehovot");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("GPE\tRehovot"));
}

#[test]
fn test_entities_unsupported_language_fails() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--text")
        .arg("Bonjour.")
        .arg("-l")
        .arg("fr");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("fr"));
}

#[test]
fn test_entities_missing_file_fails() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities").arg("/nonexistent/input.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_manifest_summary_from_local_file() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("manifest")
        .arg("--file")
        .arg(fixture_path("manifest.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Haggadah shel Pesah"))
        .stdout(predicate::str::contains("Canvases:    2"))
        .stdout(predicate::str::contains("IMG123"));
}

#[test]
fn test_manifest_json_from_local_file() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("manifest")
        .arg("--file")
        .arg(fixture_path("manifest.json"))
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["label"], "Haggadah shel Pesah");
}

#[test]
fn test_manifest_requires_identifier_or_file() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("manifest");

    cmd.assert().failure();
}

#[test]
fn test_crop_url_only_defaults() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("crop").arg("IMG123").arg("--url-only");

    cmd.assert().success().stdout(predicate::str::contains(
        "https://iiif.nli.org.il/delivery/iiif/IMG123/full/max/0/default.jpg",
    ));
}

#[test]
fn test_crop_url_only_with_parameters() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("crop")
        .arg("IMG123")
        .arg("--url-only")
        .arg("-r")
        .arg("100,200,300,400")
        .arg("-s")
        .arg("500,")
        .arg("--rotation")
        .arg("90")
        .arg("--quality")
        .arg("gray")
        .arg("-f")
        .arg("png")
        .arg("--server")
        .arg("example.org")
        .arg("--scheme")
        .arg("http");

    cmd.assert().success().stdout(predicate::str::contains(
        "http://example.org/delivery/iiif/IMG123/100,200,300,400/500,/90/gray.png",
    ));
}

#[test]
fn test_crop_rejects_bad_region() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("crop")
        .arg("IMG123")
        .arg("--url-only")
        .arg("-r")
        .arg("not-a-region");

    cmd.assert().failure();
}

#[test]
fn test_generate_config_and_use_it() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lectern.toml");

    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("generate-config").arg("-o").arg(&config_path);
    cmd.assert().success();

    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("entities")
        .arg("--config")
        .arg(&config_path)
        .arg("--text")
        .arg("Jerusalem.");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("GPE\tJerusalem"));
}

#[test]
fn test_no_subcommand_shows_usage() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
