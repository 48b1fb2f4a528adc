//! Integration tests that exercise the scenario loader against the on-disk
//! fixture file and price the result with the sample catalog.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use quote_cli::{app, csv_loader};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_scenarios.csv")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let selections =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load without error");

    // The fixture has exactly 3 rows.
    assert_eq!(selections.len(), 3);
}

#[test]
fn test_fixture_third_row_enterprise() {
    let selections = csv_loader::load_from_file(&fixture_path()).unwrap();
    let s = &selections[2];

    assert_eq!(s.scenario_name, "Enterprise expansion");
    assert_eq!(s.plan_id, "enterprise");
    assert_eq!(s.support_tier_id, "dedicated");
    assert_eq!(s.market_count, 6);
    assert_eq!(s.selected_add_on_ids.len(), 3);
}

#[test]
fn test_fixture_prices_with_sample_catalog() {
    let catalog = app::load_catalog(None).unwrap();
    let selections = csv_loader::load_from_file(&fixture_path()).unwrap();

    let reports = app::quote_batch(&catalog, selections).unwrap();
    let totals: Vec<u64> = reports.iter().map(|r| r.quote.total).collect();

    assert_eq!(totals, vec![75114, 22470, 135997]);
    assert_eq!(reports[2].quote.subtotal, 127100);
    assert_eq!(reports[2].quote.contingency, 8897);
    assert_eq!(reports[2].quote.monthly_equivalent, 11333);
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let bad_path = Path::new("/this/path/does/not/exist.csv");
    let result = csv_loader::load_from_file(bad_path);
    assert!(result.is_err());
}
