//! Decoded chain events.
//!
//! Log decoding happens upstream; this service receives events with their
//! parameters already typed, in block/log order. The JSON shape mirrors the
//! variants below via the `kind` tag.

use alloy::primitives::{Address, B256, I256, U256};
use serde::{Deserialize, Serialize};

/// Block/transaction placement of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventContext {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub tx_hash: String,
    pub log_index: u32,
    /// Transaction sender (the position origin for transfers).
    pub tx_from: Address,
    /// Transaction target; None for contract creations.
    #[serde(default)]
    pub tx_to: Option<Address>,
}

/// One decoded event with its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    // Pool manager
    Initialize {
        id: String,
        currency0: Address,
        currency1: Address,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
    },
    ModifyLiquidity {
        id: String,
        sender: Address,
        tick_lower: i32,
        tick_upper: i32,
        liquidity_delta: I256,
        salt: B256,
    },
    Swap {
        id: String,
        sender: Address,
        /// User-perspective deltas: negative means paid into the pool.
        amount0: i128,
        amount1: i128,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick: i32,
        fee: u32,
    },

    // Position manager
    Transfer {
        token_id: U256,
        from: Address,
        to: Address,
    },
    Subscription {
        token_id: U256,
        subscriber: Address,
    },
    Unsubscription {
        token_id: U256,
        subscriber: Address,
    },

    // Lending bank
    SetConfigBorrowToken {
        asset: Address,
        allow_borrow: bool,
        borrow_fee: U256,
    },
    SetConfigCollateral {
        pool_id: String,
        allow_collateral: bool,
        max_ltv: U256,
        liquidation_threshold: U256,
        liquidation_fee: U256,
    },
    EnableCollateral {
        token_id: U256,
    },
    DisableCollateral {
        token_id: U256,
    },
    Borrow {
        token_id: U256,
        borrow_token: Address,
        amount: U256,
    },
    Repay {
        token_id: U256,
        repay_token: Address,
        amount: U256,
    },
    LiquidatePosition {
        token_id: U256,
        position_id: U256,
        owner: Address,
        repay_token: Address,
        liquidate_repay_amount: U256,
        liquidate_price: U256,
        position_value: U256,
        liquidate_fee_value: U256,
        protocol_fee: U256,
    },
}

impl EventKind {
    /// Handler name for logs and skip reporting.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Initialize { .. } => "initialize",
            EventKind::ModifyLiquidity { .. } => "modify_liquidity",
            EventKind::Swap { .. } => "swap",
            EventKind::Transfer { .. } => "transfer",
            EventKind::Subscription { .. } => "subscription",
            EventKind::Unsubscription { .. } => "unsubscription",
            EventKind::SetConfigBorrowToken { .. } => "set_config_borrow_token",
            EventKind::SetConfigCollateral { .. } => "set_config_collateral",
            EventKind::EnableCollateral { .. } => "enable_collateral",
            EventKind::DisableCollateral { .. } => "disable_collateral",
            EventKind::Borrow { .. } => "borrow",
            EventKind::Repay { .. } => "repay",
            EventKind::LiquidatePosition { .. } => "liquidate_position",
        }
    }
}

/// A decoded event with its placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEvent {
    #[serde(flatten)]
    pub context: EventContext,
    #[serde(flatten)]
    pub event: EventKind,
}
