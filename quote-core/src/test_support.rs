//! Fixtures shared by the unit tests in this crate.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rust_decimal_macros::dec;

use crate::models::{
    AddOnOption, FlatCostTier, IntegrationTier, OptionCatalog, PlanOption, SelectionLimits,
    SelectionState,
};

fn flat_tier(
    id: &str,
    label: &str,
    flat_cost: u64,
) -> FlatCostTier {
    FlatCostTier {
        id: id.to_string(),
        label: label.to_string(),
        flat_cost,
    }
}

fn add_on(
    id: &str,
    label: &str,
    flat_cost: u64,
) -> AddOnOption {
    AddOnOption {
        id: id.to_string(),
        label: label.to_string(),
        flat_cost,
    }
}

fn add_on_ids(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Mirrors the catalog shipped by the `quote-data` crate.
pub(crate) fn sample_catalog() -> OptionCatalog {
    OptionCatalog {
        plans: vec![
            PlanOption {
                id: "startup".to_string(),
                label: "Startup Accelerator".to_string(),
                base_price: 18000,
                included_market_count: 1,
            },
            PlanOption {
                id: "professional".to_string(),
                label: "Professional Suite".to_string(),
                base_price: 32000,
                included_market_count: 2,
            },
            PlanOption {
                id: "enterprise".to_string(),
                label: "Enterprise Network".to_string(),
                base_price: 55000,
                included_market_count: 4,
            },
        ],
        distributor_tiers: vec![
            flat_tier("standard", "Up to 1,000 distributors", 0),
            flat_tier("pro", "Up to 10,000 distributors", 5000),
            flat_tier("enterprise", "Unlimited distributors", 12000),
        ],
        support_tiers: vec![
            flat_tier("standard", "Standard support", 0),
            flat_tier("priority", "Priority support", 4500),
            flat_tier("dedicated", "Dedicated success manager", 9600),
        ],
        integration_tiers: vec![
            IntegrationTier {
                id: "basic".to_string(),
                label: "Basic integrations".to_string(),
                base_cost: 3000,
                per_extra_market_cost: 1500,
                per_workflow_cost: 1000,
            },
            IntegrationTier {
                id: "advanced".to_string(),
                label: "Advanced integrations".to_string(),
                base_cost: 7500,
                per_extra_market_cost: 2500,
                per_workflow_cost: 1800,
            },
            IntegrationTier {
                id: "enterprise".to_string(),
                label: "Enterprise integrations".to_string(),
                base_cost: 15000,
                per_extra_market_cost: 3500,
                per_workflow_cost: 2500,
            },
        ],
        add_ons: vec![
            add_on("mobile-app", "Branded mobile app", 7500),
            add_on("ecom", "E-commerce storefront", 5000),
            add_on("replicated-sites", "Replicated websites", 3000),
            add_on("ai-insights", "AI sales insights", 6000),
            add_on("compliance", "Compliance toolkit", 4000),
        ],
        data_migration_cost: 3500,
        contingency_rate: dec!(0.07),
        limits: SelectionLimits::default(),
        recommended: SelectionState {
            scenario_name: "Recommended".to_string(),
            plan_id: "professional".to_string(),
            distributor_tier_id: "pro".to_string(),
            support_tier_id: "standard".to_string(),
            integration_tier_id: "advanced".to_string(),
            market_count: 2,
            workflow_count: 2,
            include_data_migration: true,
            selected_add_on_ids: add_on_ids(&["mobile-app"]),
        },
    }
}

/// Professional Suite, 3 markets, 4 workflows, migration, mobile app and
/// storefront. Prices to a total of 75,114.
pub(crate) fn professional_selection() -> SelectionState {
    SelectionState {
        scenario_name: "Professional rollout".to_string(),
        plan_id: "professional".to_string(),
        distributor_tier_id: "pro".to_string(),
        support_tier_id: "standard".to_string(),
        integration_tier_id: "advanced".to_string(),
        market_count: 3,
        workflow_count: 4,
        include_data_migration: true,
        selected_add_on_ids: add_on_ids(&["mobile-app", "ecom"]),
    }
}

/// Cheapest possible scenario. Prices to a total of 22,470.
pub(crate) fn startup_selection() -> SelectionState {
    SelectionState {
        scenario_name: "Startup launch".to_string(),
        plan_id: "startup".to_string(),
        distributor_tier_id: "standard".to_string(),
        support_tier_id: "standard".to_string(),
        integration_tier_id: "basic".to_string(),
        market_count: 1,
        workflow_count: 0,
        include_data_migration: false,
        selected_add_on_ids: BTreeSet::new(),
    }
}

/// Clamped selections drawn from [`sample_catalog`].
pub(crate) fn arb_selection() -> impl Strategy<Value = SelectionState> {
    let catalog = sample_catalog();
    let plan_ids: Vec<String> = catalog.plans.iter().map(|p| p.id.clone()).collect();
    let distributor_ids: Vec<String> = catalog
        .distributor_tiers
        .iter()
        .map(|t| t.id.clone())
        .collect();
    let support_ids: Vec<String> = catalog
        .support_tiers
        .iter()
        .map(|t| t.id.clone())
        .collect();
    let integration_ids: Vec<String> = catalog
        .integration_tiers
        .iter()
        .map(|t| t.id.clone())
        .collect();
    let add_on_ids: Vec<String> = catalog.add_ons.iter().map(|a| a.id.clone()).collect();

    (
        prop::sample::select(plan_ids),
        prop::sample::select(distributor_ids),
        prop::sample::select(support_ids),
        prop::sample::select(integration_ids),
        0u32..=12,
        0u32..=12,
        any::<bool>(),
        prop::sample::subsequence(add_on_ids.clone(), 0..=add_on_ids.len()),
    )
        .prop_map(
            move |(
                plan_id,
                distributor_tier_id,
                support_tier_id,
                integration_tier_id,
                market_count,
                workflow_count,
                include_data_migration,
                add_ons,
            )| {
                let mut selection = SelectionState {
                    scenario_name: "Generated".to_string(),
                    plan_id,
                    distributor_tier_id,
                    support_tier_id,
                    integration_tier_id,
                    market_count,
                    workflow_count,
                    include_data_migration,
                    selected_add_on_ids: add_ons.into_iter().collect::<BTreeSet<_>>(),
                };
                selection
                    .clamp(&catalog)
                    .expect("generated plan ids come from the catalog");
                selection
            },
        )
}
