//! Liquidity modification handler.
//!
//! The arithmetic heart of the indexer: turns a signed liquidity delta over
//! a tick range into token amounts via the core math, then fans the result
//! out over pool, token, tick and position entities.

use alloy::primitives::{Address, B256, I256, U256};
use num_bigint::BigInt;
use num_traits::Zero;

use crate::config::ChainConfig;
use crate::entities::{
    BankManager, LiquidityPosition, ModifyLiquidityRecord, Tick, Transaction,
};
use crate::handlers::{Outcome, SkipReason};
use crate::math::{get_amount0, get_amount1};
use crate::source::EventContext;
use crate::store::Store;
use crate::utils::{
    convert_token_to_decimal, event_id, hex_encode, i256_to_bigint, position_token_id, tick_id,
    u256_to_bigint,
};

#[allow(clippy::too_many_arguments)]
pub fn handle_modify_liquidity(
    store: &mut Store,
    config: &ChainConfig,
    ctx: &EventContext,
    id: &str,
    sender: Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: I256,
    salt: &B256,
) -> Outcome {
    // Referent checks first; nothing is mutated until they all pass.
    let Some(pool) = store.pools.get(id) else {
        return Outcome::Skipped(SkipReason::UnknownPool(id.to_string()));
    };
    if !store.factories.contains(&config.pool_manager_address) {
        return Outcome::Skipped(SkipReason::UnknownFactory(
            config.pool_manager_address.clone(),
        ));
    }

    let token0_id = pool.token0.clone();
    let token1_id = pool.token1.clone();
    let current_tick = pool.tick;
    let current_sqrt_price = pool.sqrt_price;
    let in_range = pool.is_in_range(tick_lower, tick_upper);

    let Some(token0_decimals) = store.tokens.get(&token0_id).map(|t| t.decimals) else {
        return Outcome::Skipped(SkipReason::MissingToken(token0_id));
    };
    let Some(token1_decimals) = store.tokens.get(&token1_id).map(|t| t.decimals) else {
        return Outcome::Skipped(SkipReason::MissingToken(token1_id));
    };

    // Core math: signed raw amounts implied by the delta at the pool's
    // current price, then decimal scaling per token.
    let amount0_raw = get_amount0(
        tick_lower,
        tick_upper,
        current_tick,
        liquidity_delta,
        current_sqrt_price,
    );
    let amount1_raw = get_amount1(
        tick_lower,
        tick_upper,
        current_tick,
        liquidity_delta,
        current_sqrt_price,
    );
    let amount0 = convert_token_to_decimal(&i256_to_bigint(amount0_raw), token0_decimals);
    let amount1 = convert_token_to_decimal(&i256_to_bigint(amount1_raw), token1_decimals);

    let delta = i256_to_bigint(liquidity_delta);

    if let Some(factory) = store.factories.get_mut(&config.pool_manager_address) {
        factory.tx_count += 1;
    }

    if let Some(token0) = store.tokens.get_mut(&token0_id) {
        token0.tx_count += 1;
        token0.total_value_locked += amount0.clone();
    }
    if let Some(token1) = store.tokens.get_mut(&token1_id) {
        token1.tx_count += 1;
        token1.total_value_locked += amount1.clone();
    }

    if let Some(pool) = store.pools.get_mut(id) {
        pool.tx_count += 1;
        // In-range liquidity only moves when the modified range contains the
        // current tick.
        if in_range {
            pool.liquidity += &delta;
        }
        pool.total_value_locked_token0 += amount0.clone();
        pool.total_value_locked_token1 += amount1.clone();
    }

    store.transactions.get_or_create(&ctx.tx_hash, |key| {
        Transaction::new(key.to_string(), ctx.block_number, ctx.block_timestamp)
    });

    let record = ModifyLiquidityRecord {
        id: event_id(&ctx.tx_hash, ctx.log_index),
        transaction: ctx.tx_hash.clone(),
        timestamp: ctx.block_timestamp,
        pool: id.to_string(),
        token0: token0_id,
        token1: token1_id,
        sender: hex_encode(sender.as_slice()),
        origin: hex_encode(ctx.tx_from.as_slice()),
        amount: delta.clone(),
        amount0: amount0.clone(),
        amount1: amount1.clone(),
        tick_lower,
        tick_upper,
        log_index: ctx.log_index,
    };
    store
        .modify_liquidity_records
        .insert(record.id.clone(), record);

    // Boundary tick bookkeeping: gross liquidity rises on both ends, net
    // liquidity is positive entering the range and negative leaving it.
    let lower_id = tick_id(id, tick_lower);
    let lower = store.ticks.get_or_create(&lower_id, |key| {
        Tick::new(
            key.to_string(),
            id.to_string(),
            tick_lower,
            ctx.block_number,
            ctx.block_timestamp,
        )
    });
    lower.liquidity_gross += &delta;
    lower.liquidity_net += &delta;

    let upper_id = tick_id(id, tick_upper);
    let upper = store.ticks.get_or_create(&upper_id, |key| {
        Tick::new(
            key.to_string(),
            id.to_string(),
            tick_upper,
            ctx.block_number,
            ctx.block_timestamp,
        )
    });
    upper.liquidity_gross += &delta;
    upper.liquidity_net -= &delta;

    // Lending-side accounting for modifications routed through the position
    // manager.
    let is_managed = config.is_position_manager(sender);
    if is_managed || store.pool_collaterals.contains(id) {
        let manager = store
            .bank_managers
            .get_or_create(&config.position_manager_address, |key| {
                BankManager::new(key.to_string())
            });
        manager.tx_count += 1;
    }

    if is_managed {
        // The salt carries the NFT token id of the managed position.
        let token_key = position_token_id(salt);
        let token_id = u256_to_bigint(U256::from_be_bytes(salt.0));

        let liquidity_position = store.liquidity_positions.get_or_create(&token_key, |key| {
            LiquidityPosition::new(
                key.to_string(),
                token_id.clone(),
                id.to_string(),
                tick_lower,
                tick_upper,
            )
        });
        liquidity_position.liquidity += &delta;
        liquidity_position.amount0 += amount0;
        liquidity_position.amount1 += amount1;

        if let Some(position) = store.positions.get_mut(&token_key) {
            liquidity_position.position = Some(position.id.clone());

            // A positive delta arriving through the migrator marks the
            // position as migrated, once.
            let is_migration = ctx
                .tx_to
                .map(|to| config.is_migrator(to))
                .unwrap_or(false)
                && delta > BigInt::zero();
            if is_migration && !position.is_migrated {
                position.is_migrated = true;
            }
        }
    }

    Outcome::Applied
}
