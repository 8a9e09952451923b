//! Transaction entity shared by all per-log records.

use serde::Serialize;

/// A transaction seen by any handler, keyed by its hash.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: String,
    pub block_number: u64,
    pub timestamp: u64,
}

impl Transaction {
    pub fn new(id: String, block_number: u64, timestamp: u64) -> Self {
        Self {
            id,
            block_number,
            timestamp,
        }
    }
}
