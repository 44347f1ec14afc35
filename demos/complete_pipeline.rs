//! Complete Pipeline Demo
//!
//! Loads a configuration file, opens the recording archive it names,
//! and runs the full processing chain: angle computation, contact
//! detection, alignment, normalization, and sink dispatch.
//!
//! Run with: cargo run --bin complete_pipeline -- config.toml

use std::sync::Arc;

use config_loader::ConfigLoader;
use contracts::ProcessedHop;
use hop_engine::{process_batch, BatchStats, HopPipeline};
use ingestion::CsvHopStore;
use observability::BatchMetricsAggregator;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Complete Pipeline Demo");

    // ==== Stage 1: Load configuration ====
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    tracing::info!(path = %config_path, "Loading blueprint config");
    let blueprint = ConfigLoader::load_from_path(std::path::Path::new(&config_path))?;

    let ids = blueprint.hop_ids();
    tracing::info!(
        root = %blueprint.data.root,
        subjects = blueprint.subjects.len(),
        hops = ids.len(),
        "Configuration loaded"
    );

    // ==== Stage 2: Open the archive ====
    let store = CsvHopStore::open(blueprint.data.root.clone())?;
    let pipeline = Arc::new(HopPipeline::new(
        Arc::new(store),
        blueprint.grid,
        blueprint.contact,
    ));

    // ==== Stage 3: Setup Dispatcher ====
    tracing::info!(sinks = blueprint.sinks.len(), "Setting up dispatcher...");
    let (hop_tx, hop_rx) = mpsc::channel::<ProcessedHop>(100);
    let dispatcher = dispatcher::create_dispatcher(blueprint.sinks.clone(), hop_rx)?;
    let dispatcher_handle = dispatcher.spawn();

    // ==== Stage 4: Process and dispatch ====
    let outcomes = process_batch(pipeline, ids, 4).await;
    let stats = BatchStats::from_outcomes(&outcomes);

    let mut aggregator = BatchMetricsAggregator::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(hop) => {
                aggregator.update(&hop.meta);
                hop_tx.send(hop).await?;
            }
            Err(e) => {
                aggregator.record_failure(outcome.id.subject.as_ref());
                tracing::error!(id = %outcome.id, error = %e, "Hop failed");
            }
        }
    }
    drop(hop_tx);
    dispatcher_handle.await?;

    // ==== Stage 5: Summary ====
    println!("{}", aggregator.summary());
    tracing::info!(
        total = stats.total,
        succeeded = stats.succeeded,
        failed = stats.failed,
        "Demo complete"
    );

    Ok(())
}
