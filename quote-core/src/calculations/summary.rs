//! Plain-text scenario summaries.
//!
//! The summary is what users paste into an email or copy to the clipboard.
//! It contains nothing but the selection, the catalog labels and the quote,
//! so identical inputs always produce byte-identical text.

use crate::calculations::common::{format_currency, format_rate};
use crate::calculations::quote::PricingCalculator;
use crate::models::{ConfigurationError, QuoteBreakdown, SelectionState};

impl PricingCalculator<'_> {
    /// Renders `selection` and its `breakdown` as a multi-line summary.
    ///
    /// One line per selected option with its catalog label and cost, add-ons
    /// in catalog order, followed by the totals. Lines are separated by `\n`
    /// with no trailing newline.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the selection references an id
    /// that is absent from the catalog.
    pub fn format_summary(
        &self,
        selection: &SelectionState,
        breakdown: &QuoteBreakdown,
    ) -> Result<String, ConfigurationError> {
        let catalog = self.catalog();
        let plan = catalog.plan(&selection.plan_id)?;
        let distributor_tier = catalog.distributor_tier(&selection.distributor_tier_id)?;
        let support_tier = catalog.support_tier(&selection.support_tier_id)?;
        let integration_tier = catalog.integration_tier(&selection.integration_tier_id)?;

        let mut lines = vec![
            format!("Scenario: {}", selection.scenario_name),
            priced("Plan", &plan.label, breakdown.plan_base),
            priced(
                "Distributor tier",
                &distributor_tier.label,
                breakdown.distributor_tier_cost,
            ),
            priced("Support", &support_tier.label, breakdown.support_cost),
            priced(
                "Integration",
                &integration_tier.label,
                breakdown.integration_base,
            ),
            priced(
                "Markets",
                &format!(
                    "{} total, {} extra",
                    selection.market_count, breakdown.extra_markets
                ),
                breakdown.extra_market_cost,
            ),
            priced(
                "Custom workflows",
                &selection.workflow_count.to_string(),
                breakdown.workflow_cost,
            ),
            priced(
                "Data migration",
                if selection.include_data_migration {
                    "included"
                } else {
                    "not included"
                },
                breakdown.data_migration_cost,
            ),
        ];

        // Listing filters over the catalog, so unknown ids must be caught first
        for id in &selection.selected_add_on_ids {
            catalog.add_on(id)?;
        }
        let add_ons: Vec<_> = catalog
            .add_ons
            .iter()
            .filter(|add_on| selection.has_add_on(&add_on.id))
            .collect();
        if add_ons.is_empty() {
            lines.push(priced("Add-ons", "none", 0));
        } else {
            lines.extend(
                add_ons
                    .iter()
                    .map(|add_on| priced("Add-on", &add_on.label, add_on.flat_cost)),
            );
        }

        lines.push(format!("Subtotal: {}", format_currency(breakdown.subtotal)));
        lines.push(format!(
            "Contingency ({}): {}",
            format_rate(catalog.contingency_rate),
            format_currency(breakdown.contingency)
        ));
        lines.push(format!("Total: {}", format_currency(breakdown.total)));
        lines.push(format!(
            "Monthly equivalent: {}",
            format_currency(breakdown.monthly_equivalent)
        ));

        Ok(lines.join("\n"))
    }
}

fn priced(
    heading: &str,
    detail: &str,
    amount: u64,
) -> String {
    format!("{heading}: {detail} ({})", format_currency(amount))
}
