pub mod calculations;
pub mod models;
pub mod session;

#[cfg(test)]
mod test_support;

pub use calculations::PricingCalculator;
pub use models::*;
pub use session::{ScenarioSession, SelectionAction};
