//! Pricing calculations for the quote estimator.
//!
//! This module turns a selection into an itemised quote and renders the
//! shareable text summary.

pub mod common;
pub mod quote;
mod summary;

pub use quote::PricingCalculator;
