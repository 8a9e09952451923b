//! Pool initialization handler.

use alloy::primitives::Address;

use crate::config::ChainConfig;
use crate::entities::{Factory, Pool, Token};
use crate::handlers::{Outcome, SkipReason};
use crate::source::EventContext;
use crate::store::Store;
use crate::utils::{compute_pool_id, hex_encode};

/// Create the pool, its tokens and the factory aggregate for an Initialize
/// event.
///
/// The claimed pool id is recomputed from the pool-key fields and the event
/// is rejected on mismatch, so a spoofed log cannot seed a fake pool.
#[allow(clippy::too_many_arguments)]
pub fn handle_initialize(
    store: &mut Store,
    config: &ChainConfig,
    ctx: &EventContext,
    id: &str,
    currency0: Address,
    currency1: Address,
    fee: u32,
    tick_spacing: i32,
    hooks: Address,
) -> Outcome {
    if config.should_skip_pool(id) {
        return Outcome::Skipped(SkipReason::PoolSkipped(id.to_string()));
    }

    let computed = compute_pool_id(currency0, currency1, fee, tick_spacing, hooks);
    if computed != id {
        return Outcome::Skipped(SkipReason::PoolIdMismatch {
            claimed: id.to_string(),
            computed,
        });
    }

    let currency0_id = hex_encode(currency0.as_slice());
    let currency1_id = hex_encode(currency1.as_slice());

    let Some(definition0) = config.token_definition(&currency0_id) else {
        return Outcome::Skipped(SkipReason::UnknownTokenMetadata(currency0_id));
    };
    let Some(definition1) = config.token_definition(&currency1_id) else {
        return Outcome::Skipped(SkipReason::UnknownTokenMetadata(currency1_id));
    };

    let factory = store
        .factories
        .get_or_create(&config.pool_manager_address, |key| {
            Factory::new(key.to_string())
        });
    factory.pool_count += 1;

    store
        .tokens
        .get_or_create(&currency0_id, |key| Token::new(key.to_string(), &definition0));
    store
        .tokens
        .get_or_create(&currency1_id, |key| Token::new(key.to_string(), &definition1));

    // A pool against a whitelisted token vouches for the other side.
    if config.is_whitelisted(&currency0_id) {
        if let Some(token1) = store.tokens.get_mut(&currency1_id) {
            token1.whitelist_pools.push(id.to_string());
        }
    }
    if config.is_whitelisted(&currency1_id) {
        if let Some(token0) = store.tokens.get_mut(&currency0_id) {
            token0.whitelist_pools.push(id.to_string());
        }
    }

    let pool = Pool::new(
        id.to_string(),
        currency0_id,
        currency1_id,
        fee,
        tick_spacing,
        hex_encode(hooks.as_slice()),
        ctx.block_number,
        ctx.block_timestamp,
    );
    store.pools.insert(id.to_string(), pool);

    Outcome::Applied
}
