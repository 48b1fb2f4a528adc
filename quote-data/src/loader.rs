//! Loader for the pricing option catalog.
//!
//! ## TOML Format
//!
//! | Section                  | Required | Notes |
//! |--------------------------|----------|-------|
//! | `[pricing]`              | yes      | `data_migration_cost` (integer), `contingency_rate` (decimal string, e.g. `"0.07"`) |
//! | `[limits]`               | no       | `max_market_count`, `max_workflow_count`; both default to 10 |
//! | `[[plans]]`              | yes      | `id`, `label`, `base_price`, `included_market_count` |
//! | `[[distributor_tiers]]`  | yes      | `id`, `label`, `flat_cost` |
//! | `[[support_tiers]]`      | yes      | `id`, `label`, `flat_cost` |
//! | `[[integration_tiers]]`  | yes      | `id`, `label`, `base_cost`, `per_extra_market_cost`, `per_workflow_cost` |
//! | `[[add_ons]]`            | no       | `id`, `label`, `flat_cost` |
//! | `[recommended]`          | yes      | The preset selection a new scenario starts from |
//!
//! All amounts are non-negative whole currency units. Ids are lowercase
//! letters, digits and hyphens, and must be unique within their list.
//!
//! ### Minimal example
//!
//! ```toml
//! [pricing]
//! data_migration_cost = 3500
//! contingency_rate = "0.07"
//!
//! [[plans]]
//! id = "startup"
//! label = "Startup Accelerator"
//! base_price = 18000
//! included_market_count = 1
//!
//! [[distributor_tiers]]
//! id = "standard"
//! label = "Up to 1,000 distributors"
//! flat_cost = 0
//!
//! [[support_tiers]]
//! id = "standard"
//! label = "Standard support"
//! flat_cost = 0
//!
//! [[integration_tiers]]
//! id = "basic"
//! label = "Basic integrations"
//! base_cost = 3000
//! per_extra_market_cost = 1500
//! per_workflow_cost = 1000
//!
//! [recommended]
//! scenario_name = "Starter"
//! plan_id = "startup"
//! distributor_tier_id = "standard"
//! support_tier_id = "standard"
//! integration_tier_id = "basic"
//! market_count = 1
//! workflow_count = 0
//! include_data_migration = false
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use quote_core::{
    AddOnOption, CatalogEntry, CatalogError, FlatCostTier, IntegrationTier, OptionCatalog,
    OptionKind, PlanOption, SelectionLimits, SelectionState,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// The catalog shipped with the estimator.
pub const SAMPLE_CATALOG_TOML: &str = include_str!("../catalog/sample_catalog.toml");

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("id pattern is valid"));

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("cannot read catalog '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {kind} id '{id}' (use lowercase letters, digits and hyphens)")]
    InvalidId { kind: OptionKind, id: String },

    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

// ---------------------------------------------------------------------------
// Serde-compatible document that mirrors the TOML layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    pricing: PricingSection,
    #[serde(default)]
    limits: LimitsSection,
    plans: Vec<PlanOption>,
    distributor_tiers: Vec<FlatCostTier>,
    support_tiers: Vec<FlatCostTier>,
    integration_tiers: Vec<IntegrationTier>,
    #[serde(default)]
    add_ons: Vec<AddOnOption>,
    recommended: SelectionState,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PricingSection {
    data_migration_cost: u64,
    contingency_rate: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct LimitsSection {
    max_market_count: u32,
    max_workflow_count: u32,
}

impl Default for LimitsSection {
    fn default() -> Self {
        let limits = SelectionLimits::default();
        Self {
            max_market_count: limits.max_market_count,
            max_workflow_count: limits.max_workflow_count,
        }
    }
}

impl From<CatalogDocument> for OptionCatalog {
    fn from(doc: CatalogDocument) -> Self {
        OptionCatalog {
            plans: doc.plans,
            distributor_tiers: doc.distributor_tiers,
            support_tiers: doc.support_tiers,
            integration_tiers: doc.integration_tiers,
            add_ons: doc.add_ons,
            data_migration_cost: doc.pricing.data_migration_cost,
            contingency_rate: doc.pricing.contingency_rate,
            limits: SelectionLimits {
                max_market_count: doc.limits.max_market_count,
                max_workflow_count: doc.limits.max_workflow_count,
            },
            recommended: doc.recommended,
        }
    }
}

fn check_id_format<T: CatalogEntry>(
    entries: &[T],
    kind: OptionKind,
) -> Result<(), CatalogLoaderError> {
    match entries.iter().find(|entry| !ID_PATTERN.is_match(entry.id())) {
        Some(entry) => Err(CatalogLoaderError::InvalidId {
            kind,
            id: entry.id().to_string(),
        }),
        None => Ok(()),
    }
}

/// Loader for the pricing option catalog.
///
/// Every catalog it returns has passed [`OptionCatalog::validate`], so the
/// calculator can rely on the catalog's invariants.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse and validate a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// * [`CatalogLoaderError::Parse`] if the TOML is malformed, a section is
    ///   missing, or an amount is negative.
    /// * [`CatalogLoaderError::InvalidId`] if an id has the wrong format.
    /// * [`CatalogLoaderError::Invalid`] if a catalog invariant is broken.
    pub fn parse_str(input: &str) -> Result<OptionCatalog, CatalogLoaderError> {
        let doc: CatalogDocument = toml::from_str(input)?;
        let catalog = OptionCatalog::from(doc);

        check_id_format(&catalog.plans, OptionKind::Plan)?;
        check_id_format(&catalog.distributor_tiers, OptionKind::DistributorTier)?;
        check_id_format(&catalog.support_tiers, OptionKind::SupportTier)?;
        check_id_format(&catalog.integration_tiers, OptionKind::IntegrationTier)?;
        check_id_format(&catalog.add_ons, OptionKind::AddOn)?;
        catalog.validate()?;

        debug!(
            plans = catalog.plans.len(),
            add_ons = catalog.add_ons.len(),
            "catalog parsed"
        );
        Ok(catalog)
    }

    /// Read a catalog file from disk and delegate to [`CatalogLoader::parse_str`].
    pub fn load_file(path: &Path) -> Result<OptionCatalog, CatalogLoaderError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| CatalogLoaderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::parse_str(&contents)?;
        info!(path = %path.display(), "loaded catalog");
        Ok(catalog)
    }

    /// The catalog shipped with the estimator.
    pub fn sample() -> Result<OptionCatalog, CatalogLoaderError> {
        Self::parse_str(SAMPLE_CATALOG_TOML)
    }
}
