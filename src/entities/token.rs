//! Token entity: metadata and aggregate activity.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::Serialize;

use crate::config::TokenDefinition;

/// An indexed token, keyed by its lowercase address.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub id: String,

    // Metadata from the chain configuration (immutable once created)
    pub symbol: String,
    pub name: String,
    pub decimals: u32,

    // Aggregate activity
    pub volume: BigDecimal,
    pub tx_count: u64,
    pub pool_count: u64,
    pub total_value_locked: BigDecimal,

    /// Pools pairing this token with a whitelisted one; used downstream to
    /// decide which pools are trustworthy enough for price derivation.
    pub whitelist_pools: Vec<String>,
}

impl Token {
    pub fn new(id: String, definition: &TokenDefinition) -> Self {
        Self {
            id,
            symbol: definition.symbol.clone(),
            name: definition.name.clone(),
            decimals: definition.decimals,
            volume: BigDecimal::zero(),
            tx_count: 0,
            pool_count: 0,
            total_value_locked: BigDecimal::zero(),
            whitelist_pools: Vec::new(),
        }
    }
}
