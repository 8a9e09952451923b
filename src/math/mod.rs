//! Fixed-point pool math.
//!
//! Pure, stateless conversions between tick indices, Q64.96 sqrt prices and
//! token amounts. Everything in this module is deterministic integer math
//! with no entity access, no logging and no side effects; invariant
//! violations (out-of-range ticks, empty ranges) panic rather than clamp,
//! because a bad input here means corrupted pool state upstream.

pub mod full_math;
pub mod liquidity_amounts;
pub mod tick_math;

pub use liquidity_amounts::{get_amount0, get_amount1};
pub use tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
