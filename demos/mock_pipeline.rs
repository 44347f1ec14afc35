//! Mock Pipeline Demo
//!
//! Runs the full processing chain against the in-memory mock store, so
//! no recording archive is needed on disk.
//!
//! Run with: cargo run --bin mock_pipeline

use std::collections::HashMap;
use std::sync::Arc;

use contracts::{HopId, ProcessedHop, SinkConfig, SinkType};
use hop_engine::{process_batch, BatchStats, HopPipeline};
use ingestion::MockHopStore;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Pipeline Demo");

    // ==== Stage 1: Build the mock store and processing pipeline ====
    let store = Arc::new(MockHopStore::default());
    let pipeline = Arc::new(HopPipeline::new(
        store,
        Default::default(),
        Default::default(),
    ));

    // Three subjects with a few hops each
    let ids: Vec<HopId> = [("Atlas", 5), ("Atlas", 8), ("Zeus", 1), ("Zeus", 4), ("Hera", 2)]
        .into_iter()
        .map(|(subject, hop)| HopId::new(subject, hop))
        .collect();

    // ==== Stage 2: Setup Dispatcher ====
    tracing::info!("Setting up dispatcher...");
    let (hop_tx, hop_rx) = mpsc::channel::<ProcessedHop>(100);

    let mut csv_params = HashMap::new();
    csv_params.insert("base_path".to_string(), "./demo_output".to_string());

    let sink_configs = vec![
        SinkConfig {
            name: "log_sink".to_string(),
            sink_type: SinkType::Log,
            queue_capacity: 50,
            params: HashMap::new(),
        },
        SinkConfig {
            name: "csv_sink".to_string(),
            sink_type: SinkType::Csv,
            queue_capacity: 50,
            params: csv_params,
        },
    ];

    let dispatcher = dispatcher::create_dispatcher(sink_configs, hop_rx)?;
    let dispatcher_handle = dispatcher.spawn();

    // ==== Stage 3: Process the batch ====
    tracing::info!(hops = ids.len(), "Processing hops...");
    let outcomes = process_batch(pipeline, ids, 2).await;
    let stats = BatchStats::from_outcomes(&outcomes);

    // ==== Stage 4: Dispatch results ====
    for outcome in outcomes {
        if let Ok(hop) = outcome.result {
            hop_tx.send(hop).await?;
        }
    }
    drop(hop_tx);
    dispatcher_handle.await?;

    tracing::info!(
        total = stats.total,
        succeeded = stats.succeeded,
        failed = stats.failed,
        rows = stats.total_rows,
        "Demo complete - tables written to ./demo_output"
    );

    Ok(())
}
