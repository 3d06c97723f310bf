use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RoundingPolicy;

/// Round half-up to whole currency units.
pub fn round_money(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Charm rounding: snap an amount onto the psychological price point for
/// its magnitude band.
///
/// Below 1000 the grid is 10 with ending 9, below 10000 it is 100 with
/// ending 99, from 10000 up it is 1000 with ending 999:
/// `floor(amount / granularity) * granularity + ending`. Idempotent.
pub fn apply_psychological_rounding(amount: Decimal) -> Decimal {
    let (granularity, ending) = if amount < Decimal::from(1000) {
        (Decimal::from(10), Decimal::from(9))
    } else if amount < Decimal::from(10_000) {
        (Decimal::from(100), Decimal::from(99))
    } else {
        (Decimal::from(1000), Decimal::from(999))
    };
    (amount / granularity).floor() * granularity + ending
}

/// Display rounding per the configured policy: the charm grid for
/// "psychological", plain half-up whole units for anything else.
pub fn round_for_display(policy: &RoundingPolicy, amount: Decimal) -> Decimal {
    match policy.strategy.as_str() {
        "psychological" => apply_psychological_rounding(amount),
        _ => round_money(amount),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
