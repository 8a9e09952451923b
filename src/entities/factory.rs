//! Factory-level aggregates.

use serde::Serialize;

/// Pool-manager aggregate, keyed by the manager's address.
#[derive(Debug, Clone, Serialize)]
pub struct Factory {
    pub id: String,
    pub pool_count: u64,
    pub tx_count: u64,
}

impl Factory {
    pub fn new(id: String) -> Self {
        Self {
            id,
            pool_count: 0,
            tx_count: 0,
        }
    }
}

/// Lending-side aggregate for the position manager, keyed by its address.
#[derive(Debug, Clone, Serialize)]
pub struct BankManager {
    pub id: String,
    /// Pools with a collateral configuration.
    pub pool_count: u64,
    pub tx_count: u64,
}

impl BankManager {
    pub fn new(id: String) -> Self {
        Self {
            id,
            pool_count: 0,
            tx_count: 0,
        }
    }
}
