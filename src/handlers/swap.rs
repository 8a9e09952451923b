//! Swap handler.

use alloy::primitives::{Address, U256};
use num_bigint::BigInt;

use crate::config::ChainConfig;
use crate::entities::{SwapRecord, Transaction};
use crate::handlers::{Outcome, SkipReason};
use crate::source::EventContext;
use crate::store::Store;
use crate::utils::{convert_token_to_decimal, event_id, hex_encode};

/// Apply a swap: refresh the pool's price state from the event and
/// accumulate volumes, TVL deltas and tx counts.
///
/// Event amounts are user-perspective (negative = paid into the pool), so
/// pool-side deltas are their negation.
#[allow(clippy::too_many_arguments)]
pub fn handle_swap(
    store: &mut Store,
    config: &ChainConfig,
    ctx: &EventContext,
    id: &str,
    sender: Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: U256,
    liquidity: u128,
    tick: i32,
    fee: u32,
) -> Outcome {
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

    let Some(token0_decimals) = store.tokens.get(&token0_id).map(|t| t.decimals) else {
        return Outcome::Skipped(SkipReason::MissingToken(token0_id));
    };
    let Some(token1_decimals) = store.tokens.get(&token1_id).map(|t| t.decimals) else {
        return Outcome::Skipped(SkipReason::MissingToken(token1_id));
    };

    let amount0 = convert_token_to_decimal(&-BigInt::from(amount0), token0_decimals);
    let amount1 = convert_token_to_decimal(&-BigInt::from(amount1), token1_decimals);

    if let Some(factory) = store.factories.get_mut(&config.pool_manager_address) {
        factory.tx_count += 1;
    }

    if let Some(token0) = store.tokens.get_mut(&token0_id) {
        token0.tx_count += 1;
        token0.volume += amount0.abs();
        token0.total_value_locked += amount0.clone();
    }
    if let Some(token1) = store.tokens.get_mut(&token1_id) {
        token1.tx_count += 1;
        token1.volume += amount1.abs();
        token1.total_value_locked += amount1.clone();
    }

    if let Some(pool) = store.pools.get_mut(id) {
        pool.tx_count += 1;
        pool.record_volume(&amount0, &amount1);
        pool.total_value_locked_token0 += amount0.clone();
        pool.total_value_locked_token1 += amount1.clone();
        pool.update_from_swap(sqrt_price_x96, tick, liquidity, fee);
    }

    store.transactions.get_or_create(&ctx.tx_hash, |key| {
        Transaction::new(key.to_string(), ctx.block_number, ctx.block_timestamp)
    });

    let record = SwapRecord {
        id: event_id(&ctx.tx_hash, ctx.log_index),
        transaction: ctx.tx_hash.clone(),
        timestamp: ctx.block_timestamp,
        pool: id.to_string(),
        token0: token0_id,
        token1: token1_id,
        sender: hex_encode(sender.as_slice()),
        origin: hex_encode(ctx.tx_from.as_slice()),
        amount0,
        amount1,
        sqrt_price_x96,
        tick,
        log_index: ctx.log_index,
    };
    store.swap_records.insert(record.id.clone(), record);

    Outcome::Applied
}
