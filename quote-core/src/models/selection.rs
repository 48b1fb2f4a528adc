use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::{ConfigurationError, OptionCatalog};

/// One complete scenario: every choice a user can make in the estimator.
///
/// A selection is owned by a single interactive session and is never
/// persisted. Counts are expected to be clamped with [`SelectionState::clamp`]
/// before the selection is priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub scenario_name: String,
    pub plan_id: String,
    pub distributor_tier_id: String,
    pub support_tier_id: String,
    pub integration_tier_id: String,
    pub market_count: u32,
    pub workflow_count: u32,
    pub include_data_migration: bool,
    #[serde(default)]
    pub selected_add_on_ids: BTreeSet<String>,
}

impl SelectionState {
    pub fn has_add_on(
        &self,
        id: &str,
    ) -> bool {
        self.selected_add_on_ids.contains(id)
    }

    /// Verifies that every referenced id exists in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for the first unknown id, checking
    /// plan, distributor tier, support tier, integration tier and then
    /// add-ons in id order.
    pub fn check_ids(
        &self,
        catalog: &OptionCatalog,
    ) -> Result<(), ConfigurationError> {
        catalog.plan(&self.plan_id)?;
        catalog.distributor_tier(&self.distributor_tier_id)?;
        catalog.support_tier(&self.support_tier_id)?;
        catalog.integration_tier(&self.integration_tier_id)?;
        for id in &self.selected_add_on_ids {
            catalog.add_on(id)?;
        }
        Ok(())
    }

    /// Pulls the slider values back into their allowed ranges.
    ///
    /// `market_count` is kept between the selected plan's included markets and
    /// the configured maximum (the plan's included count wins if it is the
    /// larger of the two). `workflow_count` is capped at its maximum.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the plan id is unknown.
    pub fn clamp(
        &mut self,
        catalog: &OptionCatalog,
    ) -> Result<(), ConfigurationError> {
        let plan = catalog.plan(&self.plan_id)?;
        let min_markets = plan.included_market_count;
        let max_markets = catalog.limits.max_market_count.max(min_markets);

        self.market_count = self.market_count.clamp(min_markets, max_markets);
        self.workflow_count = self
            .workflow_count
            .min(catalog.limits.max_workflow_count);

        Ok(())
    }
}
