use serde::{Deserialize, Serialize};

/// Itemised result of pricing one selection.
///
/// Every field is in whole currency units. Only `contingency` and
/// `monthly_equivalent` are rounded; everything else is an exact sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub plan_base: u64,
    pub support_cost: u64,
    pub integration_base: u64,
    /// Markets beyond those included in the plan.
    pub extra_markets: u32,
    pub extra_market_cost: u64,
    pub workflow_cost: u64,
    pub distributor_tier_cost: u64,
    pub data_migration_cost: u64,
    pub add_on_cost: u64,
    pub subtotal: u64,
    pub contingency: u64,
    pub total: u64,
    pub monthly_equivalent: u64,
}
