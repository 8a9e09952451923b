//! Event handlers.
//!
//! One handler per event kind, each a plain function over the entity store,
//! the injected chain configuration and the decoded parameters. Handlers
//! return an explicit [`Outcome`] instead of silently returning early: a
//! missing referent becomes a named [`SkipReason`] that the engine logs once
//! at the dispatch boundary. A handler mutates nothing before its referent
//! checks pass.

mod bank;
mod initialize;
mod modify_liquidity;
mod positions;
mod swap;

use std::fmt;

use crate::config::ChainConfig;
use crate::source::{ChainEvent, EventKind};
use crate::store::Store;

pub use initialize::handle_initialize;
pub use modify_liquidity::handle_modify_liquidity;
pub use swap::handle_swap;

/// Result of applying one event to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Named reason an event could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    PoolSkipped(String),
    PoolIdMismatch { claimed: String, computed: String },
    UnknownPool(String),
    UnknownFactory(String),
    UnknownTokenMetadata(String),
    MissingToken(String),
    PositionNotFound(String),
    LiquidityPositionNotFound(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PoolSkipped(id) => write!(f, "pool {id} is configured to be skipped"),
            SkipReason::PoolIdMismatch { claimed, computed } => {
                write!(f, "claimed pool id {claimed} does not match computed {computed}")
            }
            SkipReason::UnknownPool(id) => write!(f, "pool {id} not found"),
            SkipReason::UnknownFactory(address) => {
                write!(f, "pool manager {address} not found")
            }
            SkipReason::UnknownTokenMetadata(address) => {
                write!(f, "no token metadata configured for {address}")
            }
            SkipReason::MissingToken(address) => write!(f, "token {address} not found"),
            SkipReason::PositionNotFound(id) => write!(f, "position {id} not found"),
            SkipReason::LiquidityPositionNotFound(id) => {
                write!(f, "liquidity position {id} not found")
            }
        }
    }
}

/// Route one decoded event to its handler.
pub fn dispatch(store: &mut Store, config: &ChainConfig, event: &ChainEvent) -> Outcome {
    let ctx = &event.context;
    match &event.event {
        EventKind::Initialize {
            id,
            currency0,
            currency1,
            fee,
            tick_spacing,
            hooks,
        } => initialize::handle_initialize(
            store,
            config,
            ctx,
            id,
            *currency0,
            *currency1,
            *fee,
            *tick_spacing,
            *hooks,
        ),
        EventKind::ModifyLiquidity {
            id,
            sender,
            tick_lower,
            tick_upper,
            liquidity_delta,
            salt,
        } => modify_liquidity::handle_modify_liquidity(
            store,
            config,
            ctx,
            id,
            *sender,
            *tick_lower,
            *tick_upper,
            *liquidity_delta,
            salt,
        ),
        EventKind::Swap {
            id,
            sender,
            amount0,
            amount1,
            sqrt_price_x96,
            liquidity,
            tick,
            fee,
        } => swap::handle_swap(
            store,
            config,
            ctx,
            id,
            *sender,
            *amount0,
            *amount1,
            *sqrt_price_x96,
            *liquidity,
            *tick,
            *fee,
        ),
        EventKind::Transfer {
            token_id,
            from,
            to,
        } => positions::handle_transfer(store, ctx, *token_id, *from, *to),
        EventKind::Subscription {
            token_id,
            subscriber,
        } => positions::handle_subscription(store, *token_id, Some(*subscriber)),
        EventKind::Unsubscription { token_id, .. } => {
            positions::handle_subscription(store, *token_id, None)
        }
        EventKind::SetConfigBorrowToken {
            asset,
            allow_borrow,
            borrow_fee,
        } => bank::handle_set_config_borrow_token(store, config, *asset, *allow_borrow, *borrow_fee),
        EventKind::SetConfigCollateral {
            pool_id,
            allow_collateral,
            max_ltv,
            liquidation_threshold,
            liquidation_fee,
        } => bank::handle_set_config_collateral(
            store,
            config,
            pool_id,
            *allow_collateral,
            *max_ltv,
            *liquidation_threshold,
            *liquidation_fee,
        ),
        EventKind::EnableCollateral { token_id } => {
            bank::handle_collateral_flag(store, *token_id, true)
        }
        EventKind::DisableCollateral { token_id } => {
            bank::handle_collateral_flag(store, *token_id, false)
        }
        EventKind::Borrow {
            token_id,
            borrow_token,
            amount,
        } => bank::handle_borrow(store, ctx, *token_id, *borrow_token, *amount),
        EventKind::Repay {
            token_id,
            repay_token,
            amount,
        } => bank::handle_repay(store, ctx, *token_id, *repay_token, *amount),
        EventKind::LiquidatePosition {
            token_id,
            position_id,
            owner,
            repay_token,
            liquidate_repay_amount,
            liquidate_price,
            position_value,
            liquidate_fee_value,
            protocol_fee,
        } => bank::handle_liquidate_position(
            store,
            config,
            ctx,
            *token_id,
            *position_id,
            *owner,
            *repay_token,
            *liquidate_repay_amount,
            *liquidate_price,
            *position_value,
            *liquidate_fee_value,
            *protocol_fee,
        ),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared handler-test fixtures: a configured chain, a created pool and
    //! a mock event context.

    use alloy::primitives::Address;

    use crate::config::{ChainConfig, NativeTokenDetails, TokenDefinition};
    use crate::source::EventContext;
    use crate::store::Store;
    use crate::utils::compute_pool_id;

    use super::{handle_initialize, Outcome};

    pub const USDC: &str = "0xbe2a7f5acecdc293bf34445a0021f229dd2edd49";
    pub const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
    pub const POOL_MANAGER: &str = "0xc021a7deb4a939fd7e661a0669fab5ac7ba2d5d6";
    pub const POSITION_MANAGER: &str = "0x429ba70129df741b2ca2a85bc3a2a3328e5c09b4";
    pub const MIGRATOR: &str = "0xc78c603644b59ccbc869fa36b72ade24c9e04c40";
    pub const SENDER: &str = "0x39bf2eff94201cfaa471932655404f63315147a4";

    pub const FEE_TIER: u32 = 500;
    pub const TICK_SPACING: i32 = 10;

    pub fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    pub fn test_config() -> ChainConfig {
        ChainConfig {
            chain_id: 11155111,
            pool_manager_address: POOL_MANAGER.to_string(),
            position_manager_address: POSITION_MANAGER.to_string(),
            migrator_address: MIGRATOR.to_string(),
            whitelist_tokens: vec![WETH.to_string(), USDC.to_string()],
            pools_to_skip: vec![],
            token_definitions: vec![
                TokenDefinition {
                    address: USDC.to_string(),
                    symbol: "USDC".to_string(),
                    name: "USD Coin".to_string(),
                    decimals: 18,
                },
                TokenDefinition {
                    address: WETH.to_string(),
                    symbol: "WETH".to_string(),
                    name: "Wrapped Ether".to_string(),
                    decimals: 18,
                },
            ],
            native_token_details: NativeTokenDetails {
                symbol: "ETH".to_string(),
                name: "Ethereum".to_string(),
                decimals: 18,
            },
        }
    }

    pub fn mock_context() -> EventContext {
        EventContext {
            block_number: 100,
            block_timestamp: 1_700_000_000,
            tx_hash: "0x00000000000000000000000000000000000000000000000000000000000000aa"
                .to_string(),
            log_index: 1,
            tx_from: addr(SENDER),
            tx_to: Some(addr(POOL_MANAGER)),
        }
    }

    /// The USDC/WETH fixture pool id, derived the same way the manager
    /// derives it on chain.
    pub fn fixture_pool_id() -> String {
        compute_pool_id(addr(USDC), addr(WETH), FEE_TIER, TICK_SPACING, Address::ZERO)
    }

    /// Create the fixture pool (and its tokens and factory) through the
    /// initialize handler, exactly as a replay would.
    pub fn seed_pool(store: &mut Store, config: &ChainConfig) -> String {
        let id = fixture_pool_id();
        let outcome = handle_initialize(
            store,
            config,
            &mock_context(),
            &id,
            addr(USDC),
            addr(WETH),
            FEE_TIER,
            TICK_SPACING,
            Address::ZERO,
        );
        assert_eq!(outcome, Outcome::Applied);
        id
    }
}
