//! End-to-end runs of the `mlm-quote` binary.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use quote_data::SAMPLE_CATALOG_TOML;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("mlm-quote").unwrap();
    cmd.arg("--quiet");
    cmd
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_scenarios.csv")
}

#[test]
fn quote_defaults_to_recommended_preset() {
    cmd()
        .arg("quote")
        .assert()
        .success()
        .stdout(contains("Scenario: Recommended"))
        .stdout(contains("Total: $63,237"));
}

#[test]
fn quote_professional_scenario() {
    cmd()
        .args([
            "quote",
            "--name",
            "Professional rollout",
            "--plan",
            "professional",
            "--markets",
            "3",
            "--workflows",
            "4",
            "--add-on",
            "mobile-app,ecom",
        ])
        .assert()
        .success()
        .stdout(contains("Scenario: Professional rollout"))
        .stdout(contains("Subtotal: $70,200"))
        .stdout(contains("Contingency (7%): $4,914"))
        .stdout(contains("Total: $75,114"))
        .stdout(contains("Monthly equivalent: $6,260"));
}

#[test]
fn quote_minimal_scenario() {
    cmd()
        .args([
            "quote",
            "--plan",
            "startup",
            "--distributor-tier",
            "standard",
            "--integration-tier",
            "basic",
            "--markets",
            "1",
            "--workflows",
            "0",
            "--data-migration",
            "false",
            "--no-add-ons",
        ])
        .assert()
        .success()
        .stdout(contains("Markets: 1 total, 0 extra ($0)"))
        .stdout(contains("Total: $22,470"));
}

#[test]
fn quote_json_output_is_parseable() {
    let output = cmd().args(["--json", "quote"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["quote"]["subtotal"], 59100);
    assert_eq!(value["quote"]["monthly_equivalent"], 5270);
}

#[test]
fn quote_unknown_plan_fails_with_generic_message() {
    cmd()
        .args(["quote", "--plan", "legacy"])
        .assert()
        .failure()
        .stderr(contains("unable to compute pricing"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn catalog_lists_options() {
    cmd()
        .arg("catalog")
        .assert()
        .success()
        .stdout(contains("Startup Accelerator"))
        .stdout(contains("E-commerce storefront"));
}

#[test]
fn batch_prices_fixture_scenarios() {
    cmd()
        .arg("batch")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(contains("Total: $75,114"))
        .stdout(contains("Total: $22,470"))
        .stdout(contains("Total: $135,997"));
}

#[test]
fn batch_missing_file_fails() {
    cmd()
        .args(["batch", "/this/path/does/not/exist.csv"])
        .assert()
        .failure()
        .stderr(contains("cannot read"));
}

#[test]
fn share_prints_mailto_link() {
    cmd()
        .args(["share", "--to", "sales@example.com"])
        .assert()
        .success()
        .stdout(contains("mailto:sales@example.com?subject="))
        .stdout(contains("Total%3A%20%2463%2C237"));
}

#[test]
fn custom_catalog_replaces_sample() {
    let custom = SAMPLE_CATALOG_TOML.replace(
        "contingency_rate = \"0.07\"",
        "contingency_rate = \"0.10\"",
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(custom.as_bytes()).unwrap();

    cmd()
        .arg("--catalog")
        .arg(file.path())
        .args(["quote", "--plan", "startup", "--distributor-tier", "standard"])
        .args(["--integration-tier", "basic", "--markets", "1", "--workflows", "0"])
        .args(["--data-migration", "false", "--no-add-ons"])
        .assert()
        .success()
        .stdout(contains("Contingency (10%): $2,100"))
        .stdout(contains("Total: $23,100"));
}

#[test]
fn log_file_receives_records() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("quote.log");

    cmd()
        .arg("--log-level")
        .arg("debug")
        .arg("--log-file")
        .arg(&log_path)
        .arg("quote")
        .assert()
        .success();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("computed quote"));
}
