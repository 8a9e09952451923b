//! Position entities: NFT positions and their managed liquidity state.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use serde::Serialize;

/// An NFT position tracked from position-manager transfers, keyed by the
/// decimal token id.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub id: String,
    pub token_id: BigInt,
    pub owner: String,
    pub origin: String,
    pub created_at_timestamp: u64,

    // Lending state
    pub is_collateral: bool,
    pub is_liquidated: bool,
    pub liquidated_owner: Option<String>,
    /// Set once when the position arrives through the migrator.
    pub is_migrated: bool,

    /// Active subscriber contract, if any.
    pub subscriber: Option<String>,
}

impl Position {
    pub fn new(id: String, token_id: BigInt, origin: String, timestamp: u64) -> Self {
        Self {
            id,
            token_id,
            owner: String::new(),
            origin,
            created_at_timestamp: timestamp,
            is_collateral: false,
            is_liquidated: false,
            liquidated_owner: None,
            is_migrated: false,
            subscriber: None,
        }
    }
}

/// Accumulated liquidity state of a managed position, keyed like
/// [`Position`] by the decimal token id.
///
/// Only liquidity modifications sent by the configured position manager
/// accumulate here; third-party modifications never touch these rows.
#[derive(Debug, Clone, Serialize)]
pub struct LiquidityPosition {
    pub id: String,
    pub token_id: BigInt,
    /// Back-reference to the owning [`Position`], linked lazily because the
    /// transfer that creates the position may arrive after the first
    /// liquidity modification.
    pub position: Option<String>,
    pub pool: String,
    pub tick_lower: i32,
    pub tick_upper: i32,

    pub liquidity: BigInt,
    pub amount0: BigDecimal,
    pub amount1: BigDecimal,

    // Borrow state
    pub borrow_token: Option<String>,
    pub borrow_amount: BigInt,
}

impl LiquidityPosition {
    pub fn new(
        id: String,
        token_id: BigInt,
        pool: String,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Self {
        Self {
            id,
            token_id,
            position: None,
            pool,
            tick_lower,
            tick_upper,
            liquidity: BigInt::zero(),
            amount0: BigDecimal::zero(),
            amount1: BigDecimal::zero(),
            borrow_token: None,
            borrow_amount: BigInt::zero(),
        }
    }
}
