//! Interactive scenario state.
//!
//! A [`ScenarioSession`] holds the one selection a user is editing together
//! with its current quote. Every [`SelectionAction`] changes a single field,
//! re-clamps the sliders and recomputes the whole quote synchronously. A
//! rejected action leaves both the selection and the quote untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::PricingCalculator;
use crate::models::{ConfigurationError, OptionCatalog, QuoteBreakdown, SelectionState};

/// A discrete user interaction with the estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionAction {
    SelectPlan(String),
    SelectDistributorTier(String),
    SelectSupportTier(String),
    SelectIntegrationTier(String),
    SetMarketCount(u32),
    SetWorkflowCount(u32),
    SetDataMigration(bool),
    /// Adds the add-on if absent, removes it if present.
    ToggleAddOn(String),
    Rename(String),
    ResetToRecommended,
}

#[derive(Debug, Clone)]
pub struct ScenarioSession<'a> {
    calculator: PricingCalculator<'a>,
    selection: SelectionState,
    quote: QuoteBreakdown,
}

impl<'a> ScenarioSession<'a> {
    /// Starts a session from the catalog's recommended preset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the preset references unknown ids,
    /// which cannot happen for a catalog that passed validation.
    pub fn new(catalog: &'a OptionCatalog) -> Result<Self, ConfigurationError> {
        Self::with_selection(catalog, catalog.recommended.clone())
    }

    /// Starts a session from an arbitrary selection, clamping it first.
    pub fn with_selection(
        catalog: &'a OptionCatalog,
        mut selection: SelectionState,
    ) -> Result<Self, ConfigurationError> {
        let calculator = PricingCalculator::new(catalog);
        selection.clamp(catalog)?;
        let quote = calculator.compute_quote(&selection)?;

        Ok(Self {
            calculator,
            selection,
            quote,
        })
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn quote(&self) -> &QuoteBreakdown {
        &self.quote
    }

    pub fn catalog(&self) -> &'a OptionCatalog {
        self.calculator.catalog()
    }

    /// Applies one user action and returns the recomputed quote.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the action names an id that is
    /// not in the catalog.
    pub fn apply(
        &mut self,
        action: SelectionAction,
    ) -> Result<&QuoteBreakdown, ConfigurationError> {
        let catalog = self.calculator.catalog();
        let mut next = self.selection.clone();

        match &action {
            SelectionAction::SelectPlan(id) => {
                catalog.plan(id)?;
                next.plan_id = id.clone();
            }
            SelectionAction::SelectDistributorTier(id) => {
                catalog.distributor_tier(id)?;
                next.distributor_tier_id = id.clone();
            }
            SelectionAction::SelectSupportTier(id) => {
                catalog.support_tier(id)?;
                next.support_tier_id = id.clone();
            }
            SelectionAction::SelectIntegrationTier(id) => {
                catalog.integration_tier(id)?;
                next.integration_tier_id = id.clone();
            }
            SelectionAction::SetMarketCount(count) => next.market_count = *count,
            SelectionAction::SetWorkflowCount(count) => next.workflow_count = *count,
            SelectionAction::SetDataMigration(include) => next.include_data_migration = *include,
            SelectionAction::ToggleAddOn(id) => {
                catalog.add_on(id)?;
                if !next.selected_add_on_ids.remove(id) {
                    next.selected_add_on_ids.insert(id.clone());
                }
            }
            SelectionAction::Rename(name) => next.scenario_name = name.clone(),
            SelectionAction::ResetToRecommended => next = catalog.recommended.clone(),
        }

        next.clamp(catalog)?;
        let quote = self.calculator.compute_quote(&next).inspect_err(|error| {
            warn!(?action, %error, "selection no longer prices; change rejected");
        })?;

        debug!(?action, total = quote.total, "selection updated");
        self.selection = next;
        self.quote = quote;
        Ok(&self.quote)
    }

    /// The shareable text summary of the current selection.
    pub fn summary(&self) -> Result<String, ConfigurationError> {
        self.calculator
            .format_summary(&self.selection, &self.quote)
    }
}
