use anyhow::Context;
use jemallocator::Jemalloc;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use tidepool::{ChainConfig, Engine, JsonlReplaySource, Settings};

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    // Chain-specific addresses and token metadata, resolved once and
    // injected into every handler call
    let chain_config = ChainConfig::for_chain(settings.indexer.chain_id)
        .context("Failed to build chain configuration")?;

    let source = JsonlReplaySource::open(
        &settings.indexer.events_path,
        settings.indexer.batch_blocks,
    )
    .context("Failed to open events file")?;

    let cancellation_token = CancellationToken::new();
    let mut engine = Engine::new(chain_config);

    info!(
        "Indexer running for chain {} over {}. Press Ctrl+C to stop.",
        settings.indexer.chain_id, settings.indexer.events_path
    );

    #[cfg(unix)]
    let mut sigterm_stream = {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?
    };

    let shutdown_token = cancellation_token.clone();
    #[cfg(unix)]
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
            },
            _ = sigterm_stream.recv() => {
                info!("Received SIGTERM, exiting gracefully...");
            },
        };
        shutdown_token.cancel();
    });

    #[cfg(not(unix))]
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
        }
        shutdown_token.cancel();
    });

    let report = engine.run(source, cancellation_token).await?;

    info!(
        "Chain {} drained: {} events ({} applied, {} skipped) through block {}",
        report.chain_id,
        report.events_processed,
        report.events_applied,
        report.events_skipped,
        report.last_block
    );

    // Optional snapshot export of the full derived dataset
    if let Some(snapshot) = &settings.snapshot {
        let json = if snapshot.pretty {
            serde_json::to_string_pretty(engine.store())
        } else {
            serde_json::to_string(engine.store())
        }
        .context("Failed to serialize store snapshot")?;

        std::fs::write(&snapshot.path, json)
            .with_context(|| format!("Failed to write snapshot to {}", snapshot.path))?;
        info!("Snapshot written to {}", snapshot.path);
    }

    Ok(())
}
