//! CSV loader for batches of pricing scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column             | Required | Type    | Notes                                    |
//! |--------------------|----------|---------|------------------------------------------|
//! | `scenario_name`    | yes      | string  | Shown at the top of the summary          |
//! | `plan`             | yes      | string  | Plan id, e.g. `professional`             |
//! | `distributor_tier` | yes      | string  | Distributor tier id                      |
//! | `support_tier`     | yes      | string  | Support tier id                          |
//! | `integration_tier` | yes      | string  | Integration tier id                      |
//! | `markets`          | yes      | integer | Clamped to the plan's range when quoted  |
//! | `workflows`        | yes      | integer | Clamped to the workflow limit            |
//! | `data_migration`   | yes      | boolean | `true` or `false`                        |
//! | `add_ons`          | no       | string  | `;`-separated add-on ids, may be empty   |
//!
//! Ids are not checked against the catalog here; an unknown id surfaces
//! when the scenario is priced.
//!
//! ### Example
//!
//! ```csv
//! scenario_name,plan,distributor_tier,support_tier,integration_tier,markets,workflows,data_migration,add_ons
//! Professional rollout,professional,pro,standard,advanced,3,4,true,mobile-app;ecom
//! Startup launch,startup,standard,standard,basic,1,0,false,
//! ```
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use quote_core::SelectionState;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    scenario_name: String,
    plan: String,
    distributor_tier: String,
    support_tier: String,
    integration_tier: String,
    markets: u32,
    workflows: u32,
    data_migration: bool,
    add_ons: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading scenario CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A required text cell was empty. `row` is 1-based (header = row 0).
    #[error("empty '{column}' on row {row}")]
    EmptyField { column: &'static str, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn required(
    value: String,
    column: &'static str,
    row: usize,
) -> Result<String, CsvLoadError> {
    if value.is_empty() {
        Err(CsvLoadError::EmptyField { column, row })
    } else {
        Ok(value)
    }
}

fn split_add_ons(cell: Option<String>) -> BTreeSet<String> {
    cell.map(|cell| {
        cell.split(';')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Convert a single CSV row into a SelectionState.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<SelectionState, CsvLoadError> {
    Ok(SelectionState {
        scenario_name: required(row.scenario_name, "scenario_name", row_number)?,
        plan_id: required(row.plan, "plan", row_number)?,
        distributor_tier_id: required(row.distributor_tier, "distributor_tier", row_number)?,
        support_tier_id: required(row.support_tier, "support_tier", row_number)?,
        integration_tier_id: required(row.integration_tier, "integration_tier", row_number)?,
        market_count: row.markets,
        workflow_count: row.workflows,
        include_data_migration: row.data_migration,
        selected_add_on_ids: split_add_ons(row.add_ons),
    })
}

/// Parse CSV text and return one selection per row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid or a cell
///   cannot be deserialised.
/// * [CsvLoadError::EmptyField] if a required text cell is empty.
pub fn load_from_str(input: &str) -> Result<Vec<SelectionState>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<SelectionState>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
