//! Static pricing option catalog.
//!
//! The catalog is read-only for the life of the process. It is loaded once
//! (see the `quote-data` crate) and handed to the calculator by reference.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::selection::SelectionState;
use crate::calculations::common::whole_units;

/// Default upper bound for the market-count slider.
pub const DEFAULT_MAX_MARKET_COUNT: u32 = 10;

/// Default upper bound for the custom-workflow slider.
pub const DEFAULT_MAX_WORKFLOW_COUNT: u32 = 10;

/// The catalog list an option id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Plan,
    DistributorTier,
    SupportTier,
    IntegrationTier,
    AddOn,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::DistributorTier => "distributor tier",
            Self::SupportTier => "support tier",
            Self::IntegrationTier => "integration tier",
            Self::AddOn => "add-on",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected id does not exist in the catalog.
///
/// The presentation layer only ever offers ids taken from the catalog, so
/// this indicates a catalog/selection mismatch rather than bad user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} id '{id}'")]
pub struct ConfigurationError {
    pub kind: OptionKind,
    pub id: String,
}

impl ConfigurationError {
    pub fn unknown(
        kind: OptionKind,
        id: &str,
    ) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

/// A catalog that breaks one of its structural invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no {0} entries")]
    Empty(OptionKind),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: OptionKind, id: String },

    #[error("contingency rate must be between 0 and 1, got {0}")]
    InvalidContingencyRate(Decimal),

    #[error("recommended preset references {0}")]
    InvalidPreset(#[source] ConfigurationError),

    #[error("catalog prices can push a quote past the largest representable amount")]
    PriceOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOption {
    pub id: String,
    pub label: String,
    pub base_price: u64,
    pub included_market_count: u32,
}

/// A tier that contributes a single flat cost (distributor and support tiers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatCostTier {
    pub id: String,
    pub label: String,
    pub flat_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationTier {
    pub id: String,
    pub label: String,
    pub base_cost: u64,
    pub per_extra_market_cost: u64,
    pub per_workflow_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnOption {
    pub id: String,
    pub label: String,
    pub flat_cost: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLimits {
    pub max_market_count: u32,
    pub max_workflow_count: u32,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_market_count: DEFAULT_MAX_MARKET_COUNT,
            max_workflow_count: DEFAULT_MAX_WORKFLOW_COUNT,
        }
    }
}

/// Anything in the catalog that is addressed by id.
pub trait CatalogEntry {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

macro_rules! impl_catalog_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl CatalogEntry for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn label(&self) -> &str {
                    &self.label
                }
            }
        )+
    };
}

impl_catalog_entry!(PlanOption, FlatCostTier, IntegrationTier, AddOnOption);

/// The full set of purchasable options plus the pricing constants.
///
/// Lists keep their configured order; the summary and the CLI listing both
/// present options in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCatalog {
    pub plans: Vec<PlanOption>,
    pub distributor_tiers: Vec<FlatCostTier>,
    pub support_tiers: Vec<FlatCostTier>,
    pub integration_tiers: Vec<IntegrationTier>,
    pub add_ons: Vec<AddOnOption>,
    pub data_migration_cost: u64,
    pub contingency_rate: Decimal,
    pub limits: SelectionLimits,
    /// Selection a new scenario starts from.
    pub recommended: SelectionState,
}

impl OptionCatalog {
    pub fn plan(
        &self,
        id: &str,
    ) -> Result<&PlanOption, ConfigurationError> {
        find_entry(&self.plans, OptionKind::Plan, id)
    }

    pub fn distributor_tier(
        &self,
        id: &str,
    ) -> Result<&FlatCostTier, ConfigurationError> {
        find_entry(&self.distributor_tiers, OptionKind::DistributorTier, id)
    }

    pub fn support_tier(
        &self,
        id: &str,
    ) -> Result<&FlatCostTier, ConfigurationError> {
        find_entry(&self.support_tiers, OptionKind::SupportTier, id)
    }

    pub fn integration_tier(
        &self,
        id: &str,
    ) -> Result<&IntegrationTier, ConfigurationError> {
        find_entry(&self.integration_tiers, OptionKind::IntegrationTier, id)
    }

    pub fn add_on(
        &self,
        id: &str,
    ) -> Result<&AddOnOption, ConfigurationError> {
        find_entry(&self.add_ons, OptionKind::AddOn, id)
    }

    /// Checks the structural invariants of the catalog.
    ///
    /// Every list except `add_ons` must be non-empty, ids must be unique
    /// within their list, the contingency rate must lie in `[0, 1]`, the
    /// [`price_ceiling`](Self::price_ceiling) must fit in a `u64` and the
    /// recommended preset must reference existing ids.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_entries(&self.plans, OptionKind::Plan, true)?;
        check_entries(&self.distributor_tiers, OptionKind::DistributorTier, true)?;
        check_entries(&self.support_tiers, OptionKind::SupportTier, true)?;
        check_entries(&self.integration_tiers, OptionKind::IntegrationTier, true)?;
        check_entries(&self.add_ons, OptionKind::AddOn, false)?;

        if self.contingency_rate < Decimal::ZERO || self.contingency_rate > Decimal::ONE {
            return Err(CatalogError::InvalidContingencyRate(self.contingency_rate));
        }

        if self.price_ceiling().is_none() {
            return Err(CatalogError::PriceOverflow);
        }

        self.recommended
            .check_ids(self)
            .map_err(CatalogError::InvalidPreset)
    }

    /// Upper bound on the total of any clamped selection, or `None` if that
    /// bound does not fit in a `u64`.
    ///
    /// Takes the dearest option from every list, every add-on, migration, and
    /// the slider maxima as extra markets and workflows. Clamping never leaves
    /// more than `limits.max_market_count` markets beyond a plan's included
    /// count.
    pub fn price_ceiling(&self) -> Option<u64> {
        let max_markets = u64::from(self.limits.max_market_count);
        let max_workflows = u64::from(self.limits.max_workflow_count);

        let integration = self.integration_tiers.iter().try_fold(0u64, |highest, tier| {
            let cost = tier
                .per_extra_market_cost
                .checked_mul(max_markets)?
                .checked_add(tier.per_workflow_cost.checked_mul(max_workflows)?)?
                .checked_add(tier.base_cost)?;
            Some(highest.max(cost))
        })?;
        let add_ons = self
            .add_ons
            .iter()
            .try_fold(0u64, |sum, add_on| sum.checked_add(add_on.flat_cost))?;

        let subtotal = [
            dearest(&self.plans, |plan| plan.base_price),
            dearest(&self.distributor_tiers, |tier| tier.flat_cost),
            dearest(&self.support_tiers, |tier| tier.flat_cost),
            integration,
            self.data_migration_cost,
            add_ons,
        ]
        .into_iter()
        .try_fold(0u64, u64::checked_add)?;

        let contingency = Decimal::from(subtotal).checked_mul(self.contingency_rate)?;
        subtotal.checked_add(whole_units(contingency))
    }
}

fn dearest<T>(
    entries: &[T],
    cost: impl Fn(&T) -> u64,
) -> u64 {
    entries.iter().map(cost).max().unwrap_or(0)
}

fn find_entry<'a, T: CatalogEntry>(
    entries: &'a [T],
    kind: OptionKind,
    id: &str,
) -> Result<&'a T, ConfigurationError> {
    entries
        .iter()
        .find(|entry| entry.id() == id)
        .ok_or_else(|| ConfigurationError::unknown(kind, id))
}

fn check_entries<T: CatalogEntry>(
    entries: &[T],
    kind: OptionKind,
    required: bool,
) -> Result<(), CatalogError> {
    if required && entries.is_empty() {
        return Err(CatalogError::Empty(kind));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id()) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: entry.id().to_string(),
            });
        }
    }

    Ok(())
}
