//! In-memory entity store.
//!
//! One typed table per entity, keyed by string id with last-write-wins
//! semantics. Default field initialization lives in the factory closure
//! passed to [`Table::get_or_create`], keeping entity defaults next to the
//! call site that creates them instead of scattered across handlers.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::entities::{
    BankManager, BorrowAsset, BorrowRecord, Factory, LiquidationRecord, LiquidityPosition,
    ModifyLiquidityRecord, Pool, PoolCollateral, Position, RepayRecord, SwapRecord, Tick, Token,
    Transaction, TransferRecord,
};

/// A single entity table keyed by string id.
#[derive(Debug, Clone, Serialize)]
pub struct Table<T> {
    rows: FxHashMap<String, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: FxHashMap::default(),
        }
    }
}

impl<T> Table<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.rows.get_mut(id)
    }

    /// Load the row for `id`, creating it with `factory` when absent.
    pub fn get_or_create(&mut self, id: &str, factory: impl FnOnce(&str) -> T) -> &mut T {
        self.rows
            .entry(id.to_string())
            .or_insert_with_key(|key| factory(key))
    }

    /// Insert or overwrite the row for `id`.
    pub fn insert(&mut self, id: String, row: T) {
        self.rows.insert(id, row);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.rows.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &T)> {
        self.rows.iter()
    }
}

/// The full derived dataset maintained by the handlers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Store {
    pub factories: Table<Factory>,
    pub pools: Table<Pool>,
    pub tokens: Table<Token>,
    pub ticks: Table<Tick>,
    pub transactions: Table<Transaction>,
    pub positions: Table<Position>,
    pub liquidity_positions: Table<LiquidityPosition>,
    pub bank_managers: Table<BankManager>,
    pub borrow_assets: Table<BorrowAsset>,
    pub pool_collaterals: Table<PoolCollateral>,
    pub modify_liquidity_records: Table<ModifyLiquidityRecord>,
    pub swap_records: Table<SwapRecord>,
    pub transfer_records: Table<TransferRecord>,
    pub borrow_records: Table<BorrowRecord>,
    pub repay_records: Table<RepayRecord>,
    pub liquidation_records: Table<LiquidationRecord>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
