//! Quote calculation for the pricing estimator.
//!
//! A quote is a pure function of a [`SelectionState`] and the
//! [`OptionCatalog`]: no hidden state, no clock, no randomness. It is
//! recomputed from scratch on every selection change.
//!
//! # Breakdown Structure
//!
//! | Field                   | Derivation |
//! |-------------------------|------------|
//! | `plan_base`             | Selected plan's base price |
//! | `support_cost`          | Selected support tier's flat cost |
//! | `integration_base`      | Selected integration tier's base cost |
//! | `extra_market_cost`     | Markets beyond the plan's included count × per-market cost |
//! | `workflow_cost`         | Custom workflows × per-workflow cost |
//! | `distributor_tier_cost` | Selected distributor tier's flat cost |
//! | `data_migration_cost`   | Catalog migration cost, if migration is included |
//! | `add_on_cost`           | Sum of the selected add-ons' flat costs |
//! | `subtotal`              | Sum of the eight lines above |
//! | `contingency`           | subtotal × contingency rate, rounded half-up |
//! | `total`                 | subtotal + contingency |
//! | `monthly_equivalent`    | total ÷ 12, rounded half-up |
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use rust_decimal_macros::dec;
//! use quote_core::{
//!     FlatCostTier, IntegrationTier, OptionCatalog, PlanOption, PricingCalculator,
//!     SelectionLimits, SelectionState,
//! };
//!
//! let selection = SelectionState {
//!     scenario_name: "Launch".to_string(),
//!     plan_id: "startup".to_string(),
//!     distributor_tier_id: "standard".to_string(),
//!     support_tier_id: "standard".to_string(),
//!     integration_tier_id: "basic".to_string(),
//!     market_count: 1,
//!     workflow_count: 0,
//!     include_data_migration: false,
//!     selected_add_on_ids: BTreeSet::new(),
//! };
//!
//! let catalog = OptionCatalog {
//!     plans: vec![PlanOption {
//!         id: "startup".to_string(),
//!         label: "Startup Accelerator".to_string(),
//!         base_price: 18000,
//!         included_market_count: 1,
//!     }],
//!     distributor_tiers: vec![FlatCostTier {
//!         id: "standard".to_string(),
//!         label: "Up to 1,000 distributors".to_string(),
//!         flat_cost: 0,
//!     }],
//!     support_tiers: vec![FlatCostTier {
//!         id: "standard".to_string(),
//!         label: "Standard support".to_string(),
//!         flat_cost: 0,
//!     }],
//!     integration_tiers: vec![IntegrationTier {
//!         id: "basic".to_string(),
//!         label: "Basic integrations".to_string(),
//!         base_cost: 3000,
//!         per_extra_market_cost: 1500,
//!         per_workflow_cost: 1000,
//!     }],
//!     add_ons: vec![],
//!     data_migration_cost: 3500,
//!     contingency_rate: dec!(0.07),
//!     limits: SelectionLimits::default(),
//!     recommended: selection.clone(),
//! };
//!
//! let calculator = PricingCalculator::new(&catalog);
//! let quote = calculator.compute_quote(&selection).unwrap();
//!
//! assert_eq!(quote.subtotal, 21000);
//! assert_eq!(quote.contingency, 1470);
//! assert_eq!(quote.total, 22470);
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::whole_units;
use crate::models::{ConfigurationError, OptionCatalog, QuoteBreakdown, SelectionState};

const MONTHS_PER_YEAR: u32 = 12;

/// Prices selections against a borrowed catalog.
///
/// The calculator assumes the catalog has passed
/// [`OptionCatalog::validate`] and that the selection's counts have been
/// clamped by the caller; it performs no range checks of its own. Amounts
/// saturate at `u64::MAX` rather than wrap when either assumption is broken.
#[derive(Debug, Clone, Copy)]
pub struct PricingCalculator<'a> {
    catalog: &'a OptionCatalog,
}

impl<'a> PricingCalculator<'a> {
    pub fn new(catalog: &'a OptionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a OptionCatalog {
        self.catalog
    }

    /// Computes the itemised quote for `selection`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the selection references a plan,
    /// tier or add-on id that is absent from the catalog. This is the only
    /// failure mode.
    pub fn compute_quote(
        &self,
        selection: &SelectionState,
    ) -> Result<QuoteBreakdown, ConfigurationError> {
        let plan = self.catalog.plan(&selection.plan_id)?;
        let distributor_tier = self
            .catalog
            .distributor_tier(&selection.distributor_tier_id)?;
        let support_tier = self.catalog.support_tier(&selection.support_tier_id)?;
        let integration_tier = self
            .catalog
            .integration_tier(&selection.integration_tier_id)?;

        let extra_markets = self.extra_markets(selection.market_count, plan.included_market_count);
        let extra_market_cost =
            u64::from(extra_markets).saturating_mul(integration_tier.per_extra_market_cost);
        let workflow_cost =
            u64::from(selection.workflow_count).saturating_mul(integration_tier.per_workflow_cost);
        let add_on_cost = self.add_on_cost(&selection.selected_add_on_ids)?;
        let data_migration_cost = self.data_migration_cost(selection.include_data_migration);

        let subtotal = [
            plan.base_price,
            support_tier.flat_cost,
            integration_tier.base_cost,
            extra_market_cost,
            workflow_cost,
            distributor_tier.flat_cost,
            data_migration_cost,
            add_on_cost,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add);

        let contingency = self.contingency(subtotal);
        let total = subtotal.saturating_add(contingency);
        let monthly_equivalent = self.monthly_equivalent(total);

        if total == u64::MAX {
            warn!(
                scenario = %selection.scenario_name,
                "quote saturated at the largest representable amount"
            );
        }

        debug!(
            scenario = %selection.scenario_name,
            plan = %plan.id,
            subtotal,
            contingency,
            total,
            "computed quote"
        );

        Ok(QuoteBreakdown {
            plan_base: plan.base_price,
            support_cost: support_tier.flat_cost,
            integration_base: integration_tier.base_cost,
            extra_markets,
            extra_market_cost,
            workflow_cost,
            distributor_tier_cost: distributor_tier.flat_cost,
            data_migration_cost,
            add_on_cost,
            subtotal,
            contingency,
            total,
            monthly_equivalent,
        })
    }

    /// Markets beyond those the plan includes, never negative.
    fn extra_markets(
        &self,
        market_count: u32,
        included_market_count: u32,
    ) -> u32 {
        market_count.saturating_sub(included_market_count)
    }

    /// Sums the flat cost of every selected add-on.
    fn add_on_cost(
        &self,
        selected: &BTreeSet<String>,
    ) -> Result<u64, ConfigurationError> {
        selected.iter().try_fold(0u64, |sum, id| {
            let add_on = self.catalog.add_on(id)?;
            Ok(sum.saturating_add(add_on.flat_cost))
        })
    }

    fn data_migration_cost(
        &self,
        include_data_migration: bool,
    ) -> u64 {
        if include_data_migration {
            self.catalog.data_migration_cost
        } else {
            0
        }
    }

    /// Applies the contingency rate to the subtotal, rounding half-up.
    fn contingency(
        &self,
        subtotal: u64,
    ) -> u64 {
        whole_units(Decimal::from(subtotal) * self.catalog.contingency_rate)
    }

    /// Spreads the total over twelve months, rounding half-up.
    fn monthly_equivalent(
        &self,
        total: u64,
    ) -> u64 {
        whole_units(Decimal::from(total) / Decimal::from(MONTHS_PER_YEAR))
    }
}
