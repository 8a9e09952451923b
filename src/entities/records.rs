//! Immutable per-log record rows.
//!
//! One row per handled log, keyed by `<tx hash>-<log index>` (liquidations
//! use `<token id>-<position id>`). Rows are written once and never
//! mutated.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::Serialize;

/// A liquidity modification against a pool.
#[derive(Debug, Clone, Serialize)]
pub struct ModifyLiquidityRecord {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub pool: String,
    pub token0: String,
    pub token1: String,
    pub sender: String,
    pub origin: String,
    /// Raw liquidity delta from the event.
    pub amount: BigInt,
    /// Decimal-scaled token amounts implied by the delta.
    pub amount0: BigDecimal,
    pub amount1: BigDecimal,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub log_index: u32,
}

/// A swap against a pool. Amounts are pool-side deltas, decimal scaled.
#[derive(Debug, Clone, Serialize)]
pub struct SwapRecord {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub pool: String,
    pub token0: String,
    pub token1: String,
    pub sender: String,
    pub origin: String,
    pub amount0: BigDecimal,
    pub amount1: BigDecimal,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub log_index: u32,
}

/// An NFT position transfer.
#[derive(Debug, Clone, Serialize)]
pub struct TransferRecord {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub token_id: BigInt,
    pub from: String,
    pub to: String,
    pub origin: String,
    pub position: String,
    pub log_index: u32,
}

/// A borrow drawn against a managed position.
#[derive(Debug, Clone, Serialize)]
pub struct BorrowRecord {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub token_id: BigInt,
    pub borrow_token: String,
    pub amount: BigInt,
    pub log_index: u32,
}

/// A repayment against a managed position.
#[derive(Debug, Clone, Serialize)]
pub struct RepayRecord {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub token_id: BigInt,
    pub repay_token: String,
    pub amount: BigInt,
    pub log_index: u32,
}

/// A position liquidation, snapshotting the pool parameters at the time.
#[derive(Debug, Clone, Serialize)]
pub struct LiquidationRecord {
    pub id: String,
    pub token_id: BigInt,
    pub position_id: BigInt,
    pub owner: String,
    pub liquidator: String,
    pub repay_token: String,
    pub liquidate_price: U256,
    pub position_value: U256,
    /// repay amount x price, scaled by the repay token's decimals.
    pub repay_value: BigDecimal,
    pub liquidate_fee_value: U256,
    pub protocol_fee: U256,
    pub tx_hash: String,
    pub timestamp: u64,

    // Pool snapshot
    pub pool: String,
    pub token0: String,
    pub token1: String,
    pub fee_tier: u32,
    pub tick_spacing: i32,
    pub hooks: String,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub sqrt_price: U256,

    pub position: String,
}
