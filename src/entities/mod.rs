//! Derived entities maintained by the handlers.

mod bank;
mod factory;
mod pool;
mod position;
mod records;
mod tick;
mod token;
mod transaction;

pub use bank::{BorrowAsset, PoolCollateral};
pub use factory::{BankManager, Factory};
pub use pool::Pool;
pub use position::{LiquidityPosition, Position};
pub use records::{
    BorrowRecord, LiquidationRecord, ModifyLiquidityRecord, RepayRecord, SwapRecord,
    TransferRecord,
};
pub use tick::Tick;
pub use token::Token;
pub use transaction::Transaction;
