//! Price formatting for fixed-width notification lines.
//!
//! Prices are rounded half away from zero to whole cents, so `0.125` shows as
//! `€0.13`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two decimal places, half away from zero.
pub fn round_cents(value: &Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a price as `€0.00`. Negative prices keep their sign after the
/// currency symbol (`€-0.02`).
pub fn display_euro(value: &Decimal) -> String {
    format!("€{:.2}", round_cents(value))
}
