//! Entity id construction.
//!
//! Ids mirror the on-chain addressing scheme: lowercase 0x-prefixed hex for
//! addresses and pool ids, `txhash-logindex` for per-log records, and the
//! decimal token id decoded from a position salt.

use alloy::primitives::{hex, B256};
use num_bigint::BigUint;

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Id for a per-log record: `<tx hash>-<log index>`.
pub fn event_id(tx_hash: &str, log_index: u32) -> String {
    format!("{tx_hash}-{log_index}")
}

/// Id for a pool boundary tick: `<pool id>#<tick index>`.
pub fn tick_id(pool_id: &str, tick_idx: i32) -> String {
    format!("{pool_id}#{tick_idx}")
}

/// Decode the position token id from a 32-byte salt.
///
/// The position manager encodes the NFT token id as the big-endian salt of
/// the liquidity modification, so the entity id is its decimal rendering.
pub fn position_token_id(salt: &B256) -> String {
    BigUint::from_bytes_be(salt.as_slice()).to_string()
}
