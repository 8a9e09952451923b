//! Event processing engine.
//!
//! Drains an [`EventSource`] batch by batch under a cancellation token,
//! dispatching every event in order and logging named skip reasons at this
//! boundary (handlers themselves never log). Events within a batch keep
//! their block/log order; the engine holds no ordering state of its own.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::ChainConfig;
use crate::handlers::{dispatch, Outcome};
use crate::source::EventSource;
use crate::store::Store;

/// Interval for logging progress updates (10 seconds)
const PROGRESS_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Final processing report.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    pub chain_id: u64,
    pub events_processed: u64,
    pub events_applied: u64,
    pub events_skipped: u64,
    pub last_block: u64,
    pub finished_at: DateTime<Utc>,
}

/// Single-chain indexing engine over an injected configuration.
pub struct Engine {
    config: ChainConfig,
    store: Store,
    processed: u64,
    applied: u64,
    skipped: u64,
    last_block: u64,
}

impl Engine {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            store: Store::new(),
            processed: 0,
            applied: 0,
            skipped: 0,
            last_block: 0,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Drain the source until exhaustion or cancellation.
    pub async fn run(
        &mut self,
        mut source: impl EventSource,
        cancellation_token: CancellationToken,
    ) -> anyhow::Result<EngineReport> {
        let mut last_progress_log = Instant::now();

        loop {
            if cancellation_token.is_cancelled() {
                info!(
                    "Engine for chain {} received cancellation signal",
                    self.config.chain_id
                );
                break;
            }

            let batch = tokio::select! {
                _ = cancellation_token.cancelled() => break,
                batch = source.next_batch() => batch?,
            };
            let Some(batch) = batch else {
                break;
            };

            for event in &batch {
                // Sequential order within the batch is the on-chain order;
                // handlers rely on it for pool state consistency.
                match dispatch(&mut self.store, &self.config, event) {
                    Outcome::Applied => self.applied += 1,
                    Outcome::Skipped(reason) => {
                        debug!(
                            "Chain {}: {} at block {} log {} skipped: {}",
                            self.config.chain_id,
                            event.event.name(),
                            event.context.block_number,
                            event.context.log_index,
                            reason
                        );
                        self.skipped += 1;
                    }
                }
                self.processed += 1;
                self.last_block = self.last_block.max(event.context.block_number);
            }

            if last_progress_log.elapsed() >= PROGRESS_LOG_INTERVAL {
                info!(
                    "Chain {} processed {} events through block {} ({} pools, {} positions)",
                    self.config.chain_id,
                    self.processed,
                    self.last_block,
                    self.store.pools.len(),
                    self.store.positions.len()
                );
                last_progress_log = Instant::now();
            }
        }

        Ok(self.report())
    }

    pub fn report(&self) -> EngineReport {
        EngineReport {
            chain_id: self.config.chain_id,
            events_processed: self.processed,
            events_applied: self.applied,
            events_skipped: self.skipped,
            last_block: self.last_block,
            finished_at: Utc::now(),
        }
    }
}
