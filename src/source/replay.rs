//! JSONL replay source.
//!
//! Reads decoded events from a newline-delimited JSON file, one event per
//! line, already sorted by block number and log index. Batches split on
//! block boundaries so a block's events are never processed across two
//! batches.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::Context;

use crate::source::{ChainEvent, EventSource};

pub struct JsonlReplaySource {
    lines: Lines<BufReader<File>>,
    /// First event of the next batch, read past the boundary.
    pending: Option<ChainEvent>,
    /// Number of blocks grouped into one batch.
    batch_blocks: u64,
    line_number: u64,
}

impl JsonlReplaySource {
    pub fn open(path: impl AsRef<Path>, batch_blocks: u64) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open events file {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            pending: None,
            batch_blocks: batch_blocks.max(1),
            line_number: 0,
        })
    }

    fn next_event(&mut self) -> anyhow::Result<Option<ChainEvent>> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            self.line_number += 1;
            let line = line.context("Failed to read events file")?;
            if line.trim().is_empty() {
                continue;
            }
            let event: ChainEvent = serde_json::from_str(&line)
                .with_context(|| format!("Malformed event on line {}", self.line_number))?;
            return Ok(Some(event));
        }
    }
}

impl EventSource for JsonlReplaySource {
    async fn next_batch(&mut self) -> anyhow::Result<Option<Vec<ChainEvent>>> {
        let Some(first) = self.next_event()? else {
            return Ok(None);
        };

        let batch_end = first.context.block_number.saturating_add(self.batch_blocks);
        let mut batch = vec![first];

        loop {
            match self.next_event()? {
                Some(event) if event.context.block_number < batch_end => batch.push(event),
                Some(event) => {
                    self.pending = Some(event);
                    break;
                }
                None => break,
            }
        }

        Ok(Some(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_lines() -> String {
        [
            r#"{"block_number":100,"block_timestamp":1700000000,"tx_hash":"0xaa","log_index":0,"tx_from":"0x39bf2eff94201cfaa471932655404f63315147a4","kind":"transfer","token_id":"0x1","from":"0x0000000000000000000000000000000000000000","to":"0x39bf2eff94201cfaa471932655404f63315147a4"}"#,
            r#"{"block_number":100,"block_timestamp":1700000000,"tx_hash":"0xaa","log_index":1,"tx_from":"0x39bf2eff94201cfaa471932655404f63315147a4","kind":"enable_collateral","token_id":"0x1"}"#,
            r#"{"block_number":5000,"block_timestamp":1700060000,"tx_hash":"0xbb","log_index":0,"tx_from":"0x39bf2eff94201cfaa471932655404f63315147a4","kind":"disable_collateral","token_id":"0x1"}"#,
        ]
        .join("\n")
    }

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tidepool-replay-{name}-{}.jsonl",
            std::process::id()
        ));
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{contents}").unwrap();
        path
    }

    #[tokio::test]
    async fn batches_split_on_block_distance() {
        let path = write_temp("batching", &sample_lines());
        let mut source = JsonlReplaySource::open(&path, 2_000).unwrap();

        let first = source.next_batch().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].context.block_number, 100);

        let second = source.next_batch().await.unwrap().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].context.block_number, 5000);

        assert!(source.next_batch().await.unwrap().is_none());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn malformed_lines_are_reported_with_position() {
        let path = write_temp("malformed", "{\"not\": \"an event\"}");
        let mut source = JsonlReplaySource::open(&path, 2_000).unwrap();
        let err = source.next_batch().await.unwrap_err();
        assert!(err.to_string().contains("line 1"));
        std::fs::remove_file(path).ok();
    }
}
