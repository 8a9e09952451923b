//! Lending-bank configuration entities.

use alloy::primitives::U256;
use num_bigint::BigInt;
use num_traits::Zero;
use serde::Serialize;

/// A token enabled (or disabled) for borrowing, keyed by the underlying
/// token address.
#[derive(Debug, Clone, Serialize)]
pub struct BorrowAsset {
    pub id: String,
    pub token: String,
    pub allow_borrow: bool,
    /// Fee in the bank's raw fixed-point units.
    pub borrow_fee: U256,
    /// Outstanding borrowed amount across all positions, raw token units.
    pub total_supply: BigInt,
}

impl BorrowAsset {
    pub fn new(id: String, token: String) -> Self {
        Self {
            id,
            token,
            allow_borrow: false,
            borrow_fee: U256::ZERO,
            total_supply: BigInt::zero(),
        }
    }
}

/// Per-pool collateral parameters, keyed by pool id.
#[derive(Debug, Clone, Serialize)]
pub struct PoolCollateral {
    pub id: String,
    pub pool: String,
    pub allow_collateral: bool,
    pub max_ltv: U256,
    pub liquidation_threshold: U256,
    pub liquidation_fee: U256,
}

impl PoolCollateral {
    pub fn new(id: String, pool: String) -> Self {
        Self {
            id,
            pool,
            allow_collateral: false,
            max_ltv: U256::ZERO,
            liquidation_threshold: U256::ZERO,
            liquidation_fee: U256::ZERO,
        }
    }
}
