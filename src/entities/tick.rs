//! Tick entity: per-boundary liquidity bookkeeping.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::str::FromStr;

use crate::utils::{fast_exponentiation, safe_div};

/// Geometric ladder ratio between consecutive ticks.
static TICK_BASE: Lazy<BigDecimal> =
    Lazy::new(|| BigDecimal::from_str("1.0001").expect("constant parses"));

/// A position boundary tick within a pool, keyed by `<pool id>#<tick idx>`.
///
/// `liquidity_net` is the signed liquidity that becomes active when the
/// price crosses this tick upward; `liquidity_gross` is the total liquidity
/// referencing the tick regardless of direction.
#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub id: String,
    pub pool: String,
    pub tick_idx: i32,

    pub created_at_timestamp: u64,
    pub created_at_block_number: u64,

    pub liquidity_gross: BigInt,
    pub liquidity_net: BigInt,

    /// token0 price at this tick: 1.0001^tick_idx
    pub price0: BigDecimal,
    /// token1 price at this tick: 1 / price0
    pub price1: BigDecimal,
}

impl Tick {
    pub fn new(
        id: String,
        pool_id: String,
        tick_idx: i32,
        block_number: u64,
        timestamp: u64,
    ) -> Self {
        let price0 = fast_exponentiation(&TICK_BASE, tick_idx);
        let price1 = safe_div(&BigDecimal::from(1), &price0);

        Self {
            id,
            pool: pool_id,
            tick_idx,
            created_at_timestamp: timestamp,
            created_at_block_number: block_number,
            liquidity_gross: BigInt::zero(),
            liquidity_net: BigInt::zero(),
            price0,
            price1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_zero_prices_are_unity() {
        let tick = Tick::new("p#0".into(), "p".into(), 0, 1, 1);
        assert_eq!(tick.price0, BigDecimal::from(1));
        assert_eq!(tick.price1, BigDecimal::from(1));
    }

    #[test]
    fn positive_tick_price_exceeds_unity() {
        let tick = Tick::new("p#600".into(), "p".into(), 600, 1, 1);
        assert!(tick.price0 > BigDecimal::from(1));
        assert!(tick.price1 < BigDecimal::from(1));
    }
}
