//! Pool entity: metadata and current price state.

use alloy::primitives::U256;
use num_bigint::BigInt;
use num_traits::Zero;
use serde::Serialize;

use crate::utils::convert_token_to_decimal;
use bigdecimal::BigDecimal;

/// A concentrated-liquidity pool keyed by its 32-byte pool id.
///
/// `liquidity` tracks only the in-range liquidity at the pool's current
/// tick; positions outside the range do not contribute until the price
/// crosses into them.
#[derive(Debug, Clone, Serialize)]
pub struct Pool {
    pub id: String,

    // Token pair (entity ids, lowercase addresses)
    pub token0: String,
    pub token1: String,

    // Pool key parameters
    /// Current fee (dynamic-fee pools update this on swaps)
    pub fee_tier: u32,
    pub tick_spacing: i32,
    pub hooks: String,

    pub created_at_timestamp: u64,
    pub created_at_block_number: u64,

    // Price state
    pub sqrt_price: U256,
    pub tick: i32,
    pub liquidity: BigInt,

    // Activity
    pub tx_count: u64,
    pub volume_token0: BigDecimal,
    pub volume_token1: BigDecimal,
    pub total_value_locked_token0: BigDecimal,
    pub total_value_locked_token1: BigDecimal,
}

impl Pool {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        token0: String,
        token1: String,
        fee_tier: u32,
        tick_spacing: i32,
        hooks: String,
        block_number: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            token0,
            token1,
            fee_tier,
            tick_spacing,
            hooks,
            created_at_timestamp: timestamp,
            created_at_block_number: block_number,
            // Price state is zero until the first swap reports it; the
            // initialize event of this manager does not carry a price.
            sqrt_price: U256::ZERO,
            tick: 0,
            liquidity: BigInt::zero(),
            tx_count: 0,
            volume_token0: BigDecimal::zero(),
            volume_token1: BigDecimal::zero(),
            total_value_locked_token0: BigDecimal::zero(),
            total_value_locked_token1: BigDecimal::zero(),
        }
    }

    /// Whether a position on [tick_lower, tick_upper) contains the pool's
    /// current tick, i.e. contributes to in-range liquidity.
    pub fn is_in_range(&self, tick_lower: i32, tick_upper: i32) -> bool {
        tick_lower <= self.tick && tick_upper > self.tick
    }

    /// Apply post-swap price state reported by a swap event.
    pub fn update_from_swap(
        &mut self,
        sqrt_price_x96: U256,
        tick: i32,
        liquidity: u128,
        fee: u32,
    ) {
        self.sqrt_price = sqrt_price_x96;
        self.tick = tick;
        // Swap events carry the absolute in-range liquidity after the swap,
        // not a delta.
        self.liquidity = BigInt::from(liquidity);
        self.fee_tier = fee;
    }

    /// Accumulate swap volume in token terms from raw user-side amounts.
    pub fn record_volume(&mut self, amount0: &BigDecimal, amount1: &BigDecimal) {
        self.volume_token0 += amount0.abs();
        self.volume_token1 += amount1.abs();
    }

    /// Decimal-scaled view of in-range liquidity; handy for reports.
    pub fn liquidity_decimal(&self, decimals: u32) -> BigDecimal {
        convert_token_to_decimal(&self.liquidity, decimals)
    }
}
