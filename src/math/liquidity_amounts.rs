//! Token amounts implied by a liquidity change over a tick range.
//!
//! Given a signed liquidity delta on [tick_lower, tick_upper) and the pool's
//! current tick/sqrt price, computes how much of each pool token the change
//! moves. Three regions apply: entirely below the current price the position
//! is all token0, entirely above it is all token1, and a straddling range
//! splits at the current sqrt price.
//!
//! Rounding matches the reference contract: magnitudes round up when
//! liquidity is added and down when it is removed, so the pool is never
//! under-credited. Signed results of opposite deltas therefore differ by at
//! most one raw unit, not always exactly negating.

use alloy::primitives::{I256, U256};

use crate::math::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
use crate::math::tick_math::{get_sqrt_ratio_at_tick, MAX_TICK, MIN_TICK};

/// 2^96, the Q64.96 scaling factor.
const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// token0 amount between two sqrt prices for `liquidity`, as a magnitude.
///
/// amount0 = liquidity * 2^96 * (sqrt_b - sqrt_a) / (sqrt_b * sqrt_a)
fn amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> U256 {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };
    assert!(
        !sqrt_ratio_a_x96.is_zero(),
        "amount0_delta: zero sqrt ratio"
    );

    let numerator1 = liquidity << 96;
    let numerator2 = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;

    if round_up {
        div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_b_x96),
            sqrt_ratio_a_x96,
        )
    } else {
        mul_div(numerator1, numerator2, sqrt_ratio_b_x96) / sqrt_ratio_a_x96
    }
}

/// token1 amount between two sqrt prices for `liquidity`, as a magnitude.
///
/// amount1 = liquidity * (sqrt_b - sqrt_a) / 2^96
fn amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> U256 {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    let numerator = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;
    if round_up {
        mul_div_rounding_up(liquidity, numerator, Q96)
    } else {
        mul_div(liquidity, numerator, Q96)
    }
}

fn check_range(tick_lower: i32, tick_upper: i32) {
    assert!(
        tick_lower < tick_upper,
        "tick range [{tick_lower}, {tick_upper}) is empty"
    );
    assert!(
        tick_lower >= MIN_TICK && tick_upper <= MAX_TICK,
        "tick range [{tick_lower}, {tick_upper}) out of bounds"
    );
}

/// Signed token0 amount implied by `liquidity_delta` on
/// [tick_lower, tick_upper) given the pool's current tick and sqrt price.
///
/// `current_sqrt_price_x96` must be the price corresponding to
/// `current_tick`; it is not re-derived here. The result carries the sign of
/// `liquidity_delta`: positive amounts are owed into the pool, negative
/// amounts are returned from it.
pub fn get_amount0(
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    liquidity_delta: I256,
    current_sqrt_price_x96: U256,
) -> I256 {
    check_range(tick_lower, tick_upper);

    let round_up = liquidity_delta.is_positive();
    let liquidity = liquidity_delta.unsigned_abs();
    let sqrt_ratio_upper_x96 = get_sqrt_ratio_at_tick(tick_upper);

    let magnitude = if current_tick < tick_lower {
        // entire range above the current price: all token0
        amount0_delta(
            get_sqrt_ratio_at_tick(tick_lower),
            sqrt_ratio_upper_x96,
            liquidity,
            round_up,
        )
    } else if current_tick < tick_upper {
        // straddling: token0 covers [current price, upper)
        amount0_delta(
            current_sqrt_price_x96,
            sqrt_ratio_upper_x96,
            liquidity,
            round_up,
        )
    } else {
        // entire range below the current price: no token0
        U256::ZERO
    };

    with_sign(magnitude, liquidity_delta.is_negative())
}

/// Signed token1 amount implied by `liquidity_delta` on
/// [tick_lower, tick_upper); counterpart of [`get_amount0`].
pub fn get_amount1(
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    liquidity_delta: I256,
    current_sqrt_price_x96: U256,
) -> I256 {
    check_range(tick_lower, tick_upper);

    let round_up = liquidity_delta.is_positive();
    let liquidity = liquidity_delta.unsigned_abs();
    let sqrt_ratio_lower_x96 = get_sqrt_ratio_at_tick(tick_lower);

    let magnitude = if current_tick < tick_lower {
        U256::ZERO
    } else if current_tick < tick_upper {
        // straddling: token1 covers [lower, current price)
        amount1_delta(
            sqrt_ratio_lower_x96,
            current_sqrt_price_x96,
            liquidity,
            round_up,
        )
    } else {
        amount1_delta(
            sqrt_ratio_lower_x96,
            get_sqrt_ratio_at_tick(tick_upper),
            liquidity,
            round_up,
        )
    };

    with_sign(magnitude, liquidity_delta.is_negative())
}

fn with_sign(magnitude: U256, negative: bool) -> I256 {
    let amount = I256::from_raw(magnitude);
    assert!(
        !amount.is_negative(),
        "amount magnitude exceeds 255 bits"
    );
    if negative {
        -amount
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const LIQUIDITY: &str = "10000000000000000000000";

    fn delta(s: &str) -> I256 {
        I256::from_str(s).unwrap()
    }

    #[test]
    fn symmetric_range_at_tick_zero_splits_evenly() {
        // a symmetric range around tick 0 holds equal raw amounts of both
        // tokens for a 1:1-scaled pair
        let current = get_sqrt_ratio_at_tick(0);
        let amount0 = get_amount0(-600, 600, 0, delta(LIQUIDITY), current);
        let amount1 = get_amount1(-600, 600, 0, delta(LIQUIDITY), current);
        assert_eq!(amount0, delta("295530108791371696809"));
        assert_eq!(amount1, delta("295530108791371696809"));
    }

    #[test]
    fn removal_rounds_magnitude_down() {
        // same range, negated delta: one raw unit less than the negated add,
        // because removals truncate where additions round up
        let current = get_sqrt_ratio_at_tick(0);
        let negated = delta("-10000000000000000000000");
        let amount0 = get_amount0(-600, 600, 0, negated, current);
        let amount1 = get_amount1(-600, 600, 0, negated, current);
        assert_eq!(amount0, delta("-295530108791371696808"));
        assert_eq!(amount1, delta("-295530108791371696808"));
    }

    #[test]
    fn near_upper_boundary_regression() {
        // production regression: current tick one below the upper bound,
        // stored sqrt price between tick 21179 and 21180
        let liquidity_delta = delta("-171307279129958064896084173");
        let current = U256::from_str("228441206771431211303324095474").unwrap();
        let amount0 = get_amount0(16080, 21180, 21179, liquidity_delta, current);
        let amount1 = get_amount1(16080, 21180, 21179, liquidity_delta, current);
        assert_eq!(amount0, delta("-2367391256"));
        assert_eq!(amount1, delta("-111171964475622427888514086"));
    }

    #[test]
    fn range_below_current_tick_is_all_token1() {
        let current = get_sqrt_ratio_at_tick(600);
        assert_eq!(
            get_amount0(-600, 600, 600, delta(LIQUIDITY), current),
            I256::ZERO
        );
        assert_eq!(
            get_amount1(-600, 600, 600, delta(LIQUIDITY), current),
            delta("600059992550499268423")
        );
    }

    #[test]
    fn range_above_current_tick_is_all_token0() {
        let current = get_sqrt_ratio_at_tick(-601);
        assert_eq!(
            get_amount1(-600, 600, -601, delta(LIQUIDITY), current),
            I256::ZERO
        );
        assert_eq!(
            get_amount0(-600, 600, -601, delta(LIQUIDITY), current),
            delta("600059992550499268423")
        );
    }

    #[test]
    fn straddle_formula_collapses_at_lower_boundary() {
        // with the current tick pinned exactly to tick_lower, the straddling
        // branch must produce the same token0 amount as the below-range branch
        let below = get_amount0(
            -600,
            600,
            -601,
            delta(LIQUIDITY),
            get_sqrt_ratio_at_tick(-601),
        );
        let at_edge = get_amount0(
            -600,
            600,
            -600,
            delta(LIQUIDITY),
            get_sqrt_ratio_at_tick(-600),
        );
        assert_eq!(below, at_edge);
    }

    #[test]
    fn opposite_deltas_agree_within_one_raw_unit() {
        let current = get_sqrt_ratio_at_tick(42);
        for (lower, upper) in [(-600, 600), (-60, 120), (60, 600), (-600, -60)] {
            let add = get_amount0(lower, upper, 42, delta(LIQUIDITY), current);
            let remove = get_amount0(lower, upper, 42, -delta(LIQUIDITY), current);
            let slack = add + remove;
            assert!(
                slack >= I256::ZERO && slack <= I256::ONE,
                "range [{lower}, {upper}): slack {slack}"
            );
        }
    }

    #[test]
    fn zero_delta_is_zero() {
        let current = get_sqrt_ratio_at_tick(0);
        assert_eq!(get_amount0(-600, 600, 0, I256::ZERO, current), I256::ZERO);
        assert_eq!(get_amount1(-600, 600, 0, I256::ZERO, current), I256::ZERO);
    }

    #[test]
    #[should_panic(expected = "is empty")]
    fn inverted_range_panics() {
        get_amount0(600, -600, 0, delta(LIQUIDITY), get_sqrt_ratio_at_tick(0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_range_panics() {
        get_amount1(
            -887273,
            600,
            0,
            delta(LIQUIDITY),
            get_sqrt_ratio_at_tick(0),
        );
    }
}
