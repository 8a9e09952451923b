//! Application and chain configuration.

mod chain;
mod settings;

pub use chain::{ChainConfig, NativeTokenDetails, TokenDefinition};
pub use settings::{IndexerSettings, Settings, SnapshotSettings};
