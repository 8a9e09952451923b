//! Decoded event delivery.
//!
//! The host environment owns log decoding and block iteration; this module
//! defines the decoded-event types it delivers and the source abstraction
//! the engine drains. A JSONL replay implementation covers backfills and
//! tests.

mod events;
mod replay;

pub use events::{ChainEvent, EventContext, EventKind};
pub use replay::JsonlReplaySource;

/// A source of decoded events in block/log order.
///
/// `next_batch` returns `Ok(None)` when the stream is exhausted. Events
/// within a batch keep their on-chain ordering; a block is never split
/// across batches.
pub trait EventSource {
    fn next_batch(
        &mut self,
    ) -> impl std::future::Future<Output = anyhow::Result<Option<Vec<ChainEvent>>>> + Send;
}
