//! Command implementations for the estimator CLI.
//!
//! Everything here returns rendered text; `main` decides where it goes.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use clap::Args;
use quote_core::{
    ConfigurationError, OptionCatalog, QuoteBreakdown, ScenarioSession, SelectionAction,
    SelectionState, calculations::common::format_currency,
};
use quote_data::CatalogLoader;
use serde::Serialize;
use tracing::{error, info};

use crate::share;

/// Overrides applied on top of the catalog's recommended preset.
#[derive(Debug, Clone, Default, Args)]
pub struct ScenarioArgs {
    /// Scenario name shown at the top of the summary.
    #[arg(long)]
    pub name: Option<String>,

    /// Plan id.
    #[arg(long)]
    pub plan: Option<String>,

    /// Distributor tier id.
    #[arg(long)]
    pub distributor_tier: Option<String>,

    /// Support tier id.
    #[arg(long)]
    pub support_tier: Option<String>,

    /// Integration tier id.
    #[arg(long)]
    pub integration_tier: Option<String>,

    /// Number of markets (clamped to the plan's range).
    #[arg(long)]
    pub markets: Option<u32>,

    /// Number of custom workflows (clamped to the workflow limit).
    #[arg(long)]
    pub workflows: Option<u32>,

    /// Include data migration (`true` or `false`).
    #[arg(long)]
    pub data_migration: Option<bool>,

    /// Add-on id to include. Repeat or comma-separate; replaces the preset's add-ons.
    #[arg(long = "add-on", value_delimiter = ',')]
    pub add_ons: Vec<String>,

    /// Drop every add-on from the preset.
    #[arg(long, conflicts_with = "add_ons")]
    pub no_add_ons: bool,
}

impl ScenarioArgs {
    /// Translates the overrides into the user actions that produce them,
    /// starting from `preset`.
    ///
    /// The plan is selected before the counts so market clamping uses the
    /// final plan.
    pub fn actions(
        &self,
        preset: &SelectionState,
    ) -> Vec<SelectionAction> {
        let mut actions = Vec::new();

        if let Some(name) = &self.name {
            actions.push(SelectionAction::Rename(name.clone()));
        }
        if let Some(plan) = &self.plan {
            actions.push(SelectionAction::SelectPlan(plan.clone()));
        }
        if let Some(tier) = &self.distributor_tier {
            actions.push(SelectionAction::SelectDistributorTier(tier.clone()));
        }
        if let Some(tier) = &self.support_tier {
            actions.push(SelectionAction::SelectSupportTier(tier.clone()));
        }
        if let Some(tier) = &self.integration_tier {
            actions.push(SelectionAction::SelectIntegrationTier(tier.clone()));
        }
        if let Some(markets) = self.markets {
            actions.push(SelectionAction::SetMarketCount(markets));
        }
        if let Some(workflows) = self.workflows {
            actions.push(SelectionAction::SetWorkflowCount(workflows));
        }
        if let Some(include) = self.data_migration {
            actions.push(SelectionAction::SetDataMigration(include));
        }

        if self.no_add_ons || !self.add_ons.is_empty() {
            let wanted: BTreeSet<&str> = self.add_ons.iter().map(|id| id.trim()).collect();
            let current: BTreeSet<&str> = preset
                .selected_add_on_ids
                .iter()
                .map(String::as_str)
                .collect();

            actions.extend(
                current
                    .symmetric_difference(&wanted)
                    .map(|id| SelectionAction::ToggleAddOn(id.to_string())),
            );
        }

        actions
    }
}

/// One priced scenario, as printed by `quote` and `batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteReport {
    pub selection: SelectionState,
    pub quote: QuoteBreakdown,
    pub summary: String,
}

/// Logs a pricing fault and converts it into the message shown to users.
fn priced<T>(result: Result<T, ConfigurationError>) -> anyhow::Result<T> {
    result.map_err(|fault| {
        error!(%fault, "pricing failed");
        anyhow::anyhow!("unable to compute pricing: {fault}")
    })
}

/// Loads the catalog at `path`, or the built-in sample when `path` is `None`.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<OptionCatalog> {
    match path {
        Some(path) => CatalogLoader::load_file(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display())),
        None => CatalogLoader::sample().context("built-in catalog is invalid"),
    }
}

/// Builds a session from the recommended preset plus `args`.
pub fn build_session<'a>(
    catalog: &'a OptionCatalog,
    args: &ScenarioArgs,
) -> anyhow::Result<ScenarioSession<'a>> {
    let mut session = priced(ScenarioSession::new(catalog))?;
    for action in args.actions(&catalog.recommended) {
        priced(session.apply(action).map(|_| ()))?;
    }
    Ok(session)
}

pub fn report(session: &ScenarioSession<'_>) -> anyhow::Result<QuoteReport> {
    Ok(QuoteReport {
        selection: session.selection().clone(),
        quote: *session.quote(),
        summary: priced(session.summary())?,
    })
}

/// Clamps and prices every selection, in order.
pub fn quote_batch(
    catalog: &OptionCatalog,
    selections: Vec<SelectionState>,
) -> anyhow::Result<Vec<QuoteReport>> {
    let reports = selections
        .into_iter()
        .map(|selection| {
            let name = selection.scenario_name.clone();
            priced(ScenarioSession::with_selection(catalog, selection))
                .and_then(|session| report(&session))
                .with_context(|| format!("scenario '{name}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    info!(scenarios = reports.len(), "priced batch");
    Ok(reports)
}

/// Renders reports as summaries separated by blank lines, or as JSON.
pub fn render_reports(
    reports: &[QuoteReport],
    json: bool,
) -> anyhow::Result<String> {
    if json {
        return serde_json::to_string_pretty(reports).context("failed to serialize reports");
    }
    Ok(reports
        .iter()
        .map(|report| report.summary.as_str())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Renders one report as its summary, or as a JSON object.
pub fn render_report(
    report: &QuoteReport,
    json: bool,
) -> anyhow::Result<String> {
    if json {
        serde_json::to_string_pretty(report).context("failed to serialize report")
    } else {
        Ok(report.summary.clone())
    }
}

/// Lists every option in the catalog with its cost.
pub fn render_catalog(
    catalog: &OptionCatalog,
    json: bool,
) -> anyhow::Result<String> {
    if json {
        return serde_json::to_string_pretty(catalog).context("failed to serialize catalog");
    }

    let mut lines = vec!["Plans:".to_string()];
    lines.extend(catalog.plans.iter().map(|plan| {
        format!(
            "  {:<18} {:<28} {} ({} included)",
            plan.id,
            plan.label,
            format_currency(plan.base_price),
            markets(plan.included_market_count)
        )
    }));

    lines.push("Distributor tiers:".to_string());
    lines.extend(catalog.distributor_tiers.iter().map(|tier| {
        format!(
            "  {:<18} {:<28} {}",
            tier.id,
            tier.label,
            format_currency(tier.flat_cost)
        )
    }));

    lines.push("Support tiers:".to_string());
    lines.extend(catalog.support_tiers.iter().map(|tier| {
        format!(
            "  {:<18} {:<28} {}",
            tier.id,
            tier.label,
            format_currency(tier.flat_cost)
        )
    }));

    lines.push("Integration tiers:".to_string());
    lines.extend(catalog.integration_tiers.iter().map(|tier| {
        format!(
            "  {:<18} {:<28} {} + {}/extra market + {}/workflow",
            tier.id,
            tier.label,
            format_currency(tier.base_cost),
            format_currency(tier.per_extra_market_cost),
            format_currency(tier.per_workflow_cost)
        )
    }));

    lines.push("Add-ons:".to_string());
    lines.extend(catalog.add_ons.iter().map(|add_on| {
        format!(
            "  {:<18} {:<28} {}",
            add_on.id,
            add_on.label,
            format_currency(add_on.flat_cost)
        )
    }));

    lines.push(format!(
        "Data migration: {}",
        format_currency(catalog.data_migration_cost)
    ));
    lines.push(format!(
        "Limits: up to {} markets, up to {} custom workflows",
        catalog.limits.max_market_count, catalog.limits.max_workflow_count
    ));

    Ok(lines.join("\n"))
}

fn markets(count: u32) -> String {
    if count == 1 {
        "1 market".to_string()
    } else {
        format!("{count} markets")
    }
}

/// Builds the mail-compose link for the current selection.
pub fn share_link(
    session: &ScenarioSession<'_>,
    recipient: Option<&str>,
) -> anyhow::Result<String> {
    let summary = priced(session.summary())?;
    Ok(share::mailto_link(
        recipient,
        &share::subject_for(session.selection()),
        &summary,
    ))
}
