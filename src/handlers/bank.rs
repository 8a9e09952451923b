//! Lending-bank handlers: borrow configuration, collateral flags, borrows,
//! repayments and liquidations.

use alloy::primitives::{Address, U256};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::config::ChainConfig;
use crate::entities::{
    BankManager, BorrowAsset, BorrowRecord, LiquidationRecord, PoolCollateral, RepayRecord, Token,
    Transaction,
};
use crate::handlers::{Outcome, SkipReason};
use crate::source::EventContext;
use crate::store::Store;
use crate::utils::{big_pow10, event_id, hex_encode, u256_to_bigint};

/// Upsert a borrowable asset with its allow flag and fee.
pub fn handle_set_config_borrow_token(
    store: &mut Store,
    config: &ChainConfig,
    asset: Address,
    allow_borrow: bool,
    borrow_fee: U256,
) -> Outcome {
    let asset_id = hex_encode(asset.as_slice());
    let Some(definition) = config.token_definition(&asset_id) else {
        return Outcome::Skipped(SkipReason::UnknownTokenMetadata(asset_id));
    };

    store
        .tokens
        .get_or_create(&asset_id, |key| Token::new(key.to_string(), &definition));

    let borrow_asset = store.borrow_assets.get_or_create(&asset_id, |key| {
        BorrowAsset::new(key.to_string(), key.to_string())
    });
    borrow_asset.allow_borrow = allow_borrow;
    borrow_asset.borrow_fee = borrow_fee;

    Outcome::Applied
}

/// Upsert per-pool collateral parameters; the bank manager's pool count only
/// moves when the configuration is first created.
pub fn handle_set_config_collateral(
    store: &mut Store,
    config: &ChainConfig,
    pool_id: &str,
    allow_collateral: bool,
    max_ltv: U256,
    liquidation_threshold: U256,
    liquidation_fee: U256,
) -> Outcome {
    if !store.pools.contains(pool_id) {
        return Outcome::Skipped(SkipReason::UnknownPool(pool_id.to_string()));
    }

    if !store.pool_collaterals.contains(pool_id) {
        let manager = store
            .bank_managers
            .get_or_create(&config.position_manager_address, |key| {
                BankManager::new(key.to_string())
            });
        manager.pool_count += 1;
    }

    let collateral = store.pool_collaterals.get_or_create(pool_id, |key| {
        PoolCollateral::new(key.to_string(), key.to_string())
    });
    collateral.allow_collateral = allow_collateral;
    collateral.max_ltv = max_ltv;
    collateral.liquidation_threshold = liquidation_threshold;
    collateral.liquidation_fee = liquidation_fee;

    Outcome::Applied
}

/// Flip the collateral flag on an existing position.
pub fn handle_collateral_flag(store: &mut Store, token_id: U256, is_collateral: bool) -> Outcome {
    let key = u256_to_bigint(token_id).to_string();
    let Some(position) = store.positions.get_mut(&key) else {
        return Outcome::Skipped(SkipReason::PositionNotFound(key));
    };
    position.is_collateral = is_collateral;
    Outcome::Applied
}

/// Draw a borrow against a managed position.
pub fn handle_borrow(
    store: &mut Store,
    ctx: &EventContext,
    token_id: U256,
    borrow_token: Address,
    amount: U256,
) -> Outcome {
    let key = u256_to_bigint(token_id).to_string();
    let Some(liquidity_position) = store.liquidity_positions.get_mut(&key) else {
        return Outcome::Skipped(SkipReason::LiquidityPositionNotFound(key));
    };

    let borrow_token_id = hex_encode(borrow_token.as_slice());
    let amount = u256_to_bigint(amount);

    liquidity_position.borrow_token = Some(borrow_token_id.clone());
    liquidity_position.borrow_amount += &amount;

    let asset = store.borrow_assets.get_or_create(&borrow_token_id, |k| {
        BorrowAsset::new(k.to_string(), k.to_string())
    });
    asset.total_supply += &amount;

    store.transactions.get_or_create(&ctx.tx_hash, |id| {
        Transaction::new(id.to_string(), ctx.block_number, ctx.block_timestamp)
    });
    let record = BorrowRecord {
        id: event_id(&ctx.tx_hash, ctx.log_index),
        transaction: ctx.tx_hash.clone(),
        timestamp: ctx.block_timestamp,
        token_id: u256_to_bigint(token_id),
        borrow_token: borrow_token_id,
        amount,
        log_index: ctx.log_index,
    };
    store.borrow_records.insert(record.id.clone(), record);

    Outcome::Applied
}

/// Repay part or all of a position's borrow. Amounts saturate at zero and a
/// fully repaid position drops its borrow token.
pub fn handle_repay(
    store: &mut Store,
    ctx: &EventContext,
    token_id: U256,
    repay_token: Address,
    amount: U256,
) -> Outcome {
    let key = u256_to_bigint(token_id).to_string();
    let Some(liquidity_position) = store.liquidity_positions.get_mut(&key) else {
        return Outcome::Skipped(SkipReason::LiquidityPositionNotFound(key));
    };

    let repay_token_id = hex_encode(repay_token.as_slice());
    let amount = u256_to_bigint(amount);

    liquidity_position.borrow_amount -= &amount;
    if liquidity_position.borrow_amount <= BigInt::zero() {
        liquidity_position.borrow_amount = BigInt::zero();
        liquidity_position.borrow_token = None;
    }

    if let Some(asset) = store.borrow_assets.get_mut(&repay_token_id) {
        asset.total_supply -= &amount;
        if asset.total_supply < BigInt::zero() {
            asset.total_supply = BigInt::zero();
        }
    }

    store.transactions.get_or_create(&ctx.tx_hash, |id| {
        Transaction::new(id.to_string(), ctx.block_number, ctx.block_timestamp)
    });
    let record = RepayRecord {
        id: event_id(&ctx.tx_hash, ctx.log_index),
        transaction: ctx.tx_hash.clone(),
        timestamp: ctx.block_timestamp,
        token_id: u256_to_bigint(token_id),
        repay_token: repay_token_id,
        amount,
        log_index: ctx.log_index,
    };
    store.repay_records.insert(record.id.clone(), record);

    Outcome::Applied
}

/// Record a liquidation, snapshotting the pool's parameters, and flag the
/// position as liquidated.
#[allow(clippy::too_many_arguments)]
pub fn handle_liquidate_position(
    store: &mut Store,
    config: &ChainConfig,
    ctx: &EventContext,
    token_id: U256,
    position_id: U256,
    owner: Address,
    repay_token: Address,
    liquidate_repay_amount: U256,
    liquidate_price: U256,
    position_value: U256,
    liquidate_fee_value: U256,
    protocol_fee: U256,
) -> Outcome {
    let token_key = u256_to_bigint(token_id).to_string();

    let Some(liquidity_position) = store.liquidity_positions.get(&token_key) else {
        return Outcome::Skipped(SkipReason::LiquidityPositionNotFound(token_key));
    };
    if !store.positions.contains(&token_key) {
        return Outcome::Skipped(SkipReason::PositionNotFound(token_key));
    }
    let pool_id = liquidity_position.pool.clone();
    let (tick_lower, tick_upper) = (
        liquidity_position.tick_lower,
        liquidity_position.tick_upper,
    );
    let Some(pool) = store.pools.get(&pool_id) else {
        return Outcome::Skipped(SkipReason::UnknownPool(pool_id));
    };

    let repay_token_id = hex_encode(repay_token.as_slice());
    let Some(definition) = config.token_definition(&repay_token_id) else {
        return Outcome::Skipped(SkipReason::UnknownTokenMetadata(repay_token_id));
    };

    // repay value = amount x price, scaled by the repay token's decimals
    let repay_value = BigDecimal::from(
        u256_to_bigint(liquidate_repay_amount) * u256_to_bigint(liquidate_price),
    ) / big_pow10(definition.decimals);

    let record = LiquidationRecord {
        id: format!(
            "{}-{}",
            u256_to_bigint(token_id),
            u256_to_bigint(position_id)
        ),
        token_id: u256_to_bigint(token_id),
        position_id: u256_to_bigint(position_id),
        owner: hex_encode(owner.as_slice()),
        liquidator: hex_encode(ctx.tx_from.as_slice()),
        repay_token: repay_token_id.clone(),
        liquidate_price,
        position_value,
        repay_value,
        liquidate_fee_value,
        protocol_fee,
        tx_hash: ctx.tx_hash.clone(),
        timestamp: ctx.block_timestamp,
        pool: pool.id.clone(),
        token0: pool.token0.clone(),
        token1: pool.token1.clone(),
        fee_tier: pool.fee_tier,
        tick_spacing: pool.tick_spacing,
        hooks: pool.hooks.clone(),
        tick_lower,
        tick_upper,
        sqrt_price: pool.sqrt_price,
        position: token_key.clone(),
    };

    store
        .tokens
        .get_or_create(&repay_token_id, |key| Token::new(key.to_string(), &definition));
    store
        .liquidation_records
        .insert(record.id.clone(), record);

    if let Some(position) = store.positions.get_mut(&token_key) {
        position.is_liquidated = true;
        position.liquidated_owner = Some(hex_encode(owner.as_slice()));
    }

    Outcome::Applied
}
