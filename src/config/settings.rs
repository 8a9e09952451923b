use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Indexer runtime configuration.
///
/// Controls which chain's configuration is loaded and where decoded events
/// are replayed from.
#[derive(Debug, Deserialize, Clone)]
pub struct IndexerSettings {
    /// Chain whose [`crate::config::ChainConfig`] is instantiated at startup.
    pub chain_id: u64,
    /// Path to the JSONL file of decoded events, in block/log order.
    pub events_path: String,
    /// Blocks per processing batch.
    #[serde(default = "default_batch_blocks")]
    pub batch_blocks: u64,
}

fn default_batch_blocks() -> u64 {
    2_000
}

/// Snapshot export configuration.
///
/// When set, the full entity store is serialized to JSON after the event
/// stream is drained.
#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotSettings {
    pub path: String,
    /// Pretty-print the JSON output (larger files, easier diffing).
    #[serde(default)]
    pub pretty: bool,
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub indexer: IndexerSettings,
    #[serde(default)]
    pub snapshot: Option<SnapshotSettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}
