mod catalog;
mod quote_breakdown;
mod selection;

pub use catalog::{
    AddOnOption, CatalogEntry, CatalogError, ConfigurationError, DEFAULT_MAX_MARKET_COUNT,
    DEFAULT_MAX_WORKFLOW_COUNT, FlatCostTier, IntegrationTier, OptionCatalog, OptionKind,
    PlanOption, SelectionLimits,
};
pub use quote_breakdown::QuoteBreakdown;
pub use selection::SelectionState;
