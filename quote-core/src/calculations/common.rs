//! Common helpers for quote calculations.
//!
//! Rounding and currency formatting live here so the calculator and the
//! summary agree on a single policy.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to a whole number using half-up rounding.
///
/// Values exactly halfway between two integers are rounded away from zero,
/// so `6259.5` becomes `6260` and `6258.5` becomes `6259`. This is the only
/// rounding applied anywhere in a quote.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(4913.4)), dec!(4913));
/// assert_eq!(round_half_up(dec!(6258.5)), dec!(6259));
/// assert_eq!(round_half_up(dec!(6259.5)), dec!(6260));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` half-up and converts it to whole currency units.
///
/// Zero and negative values map to `0`; values too large for `u64`
/// saturate.
pub fn whole_units(value: Decimal) -> u64 {
    if value <= Decimal::ZERO {
        return 0;
    }
    round_half_up(value).to_u64().unwrap_or(u64::MAX)
}

/// Formats a whole-unit amount as dollars with thousands separators.
///
/// # Examples
///
/// ```
/// use quote_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(0), "$0");
/// assert_eq!(format_currency(75114), "$75,114");
/// assert_eq!(format_currency(1250000), "$1,250,000");
/// ```
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a fractional rate as a percentage without trailing zeros.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::format_rate;
///
/// assert_eq!(format_rate(dec!(0.07)), "7%");
/// assert_eq!(format_rate(dec!(0.075)), "7.5%");
/// ```
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(4669.49)), dec!(4669));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        // Banker's rounding would give 6258 here
        assert_eq!(round_half_up(dec!(6258.5)), dec!(6259));
    }

    #[test]
    fn round_half_up_rounds_up_above_midpoint() {
        assert_eq!(round_half_up(dec!(1469.51)), dec!(1470));
    }

    #[test]
    fn round_half_up_preserves_whole_values() {
        assert_eq!(round_half_up(dec!(4914.00)), dec!(4914));
    }

    // =========================================================================
    // whole_units tests
    // =========================================================================

    #[test]
    fn whole_units_rounds_and_converts() {
        assert_eq!(whole_units(dec!(6259.5)), 6260);
        assert_eq!(whole_units(dec!(4914.00)), 4914);
    }

    #[test]
    fn whole_units_maps_negative_to_zero() {
        assert_eq!(whole_units(dec!(-12.5)), 0);
    }

    #[test]
    fn whole_units_saturates_on_overflow() {
        let huge = Decimal::from(u64::MAX) * dec!(2);

        assert_eq!(whole_units(huge), u64::MAX);
    }

    // =========================================================================
    // formatting tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1,000");
        assert_eq!(format_currency(22470), "$22,470");
        assert_eq!(format_currency(123456789), "$123,456,789");
    }

    #[test]
    fn format_rate_handles_zero_and_whole_rates() {
        assert_eq!(format_rate(dec!(0)), "0%");
        assert_eq!(format_rate(dec!(1)), "100%");
    }
}
