//! Working-weight progression
//!
//! Linear progression: one increment every `frequency` weeks, counted from
//! week 1. Deload weeks take 60% of the projected load, rounded half-up to
//! the nearest 0.5 unit. Rounding happens once, on the deload week itself,
//! so regular weeks always sit exactly on base + n * increment.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fraction of the projected load kept during a deload week (40% reduction)
pub const DELOAD_FACTOR: Decimal = dec!(0.6);

/// Number of completed progression steps by `week` (1-indexed).
///
/// A zero frequency means the exercise never progresses.
pub fn progression_steps(week: u32, frequency: u32) -> u32 {
    week.saturating_sub(1).checked_div(frequency).unwrap_or(0)
}

/// Round to the nearest half unit, halves going up (2.25 -> 2.5)
pub fn round_to_half(value: Decimal) -> Decimal {
    (value * dec!(2)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) / dec!(2)
}

/// Working weight for `week`.
///
/// Callers validate the week range; this function is total.
pub fn compute_weight(
    base_weight: Decimal,
    week: u32,
    increment: Decimal,
    frequency: u32,
    is_deload: bool,
) -> Decimal {
    let steps = progression_steps(week, frequency);
    let raw = base_weight + Decimal::from(steps) * increment;

    if is_deload {
        round_to_half(raw * DELOAD_FACTOR).normalize()
    } else {
        raw.normalize()
    }
}
