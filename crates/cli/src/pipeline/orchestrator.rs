//! Pipeline orchestrator - coordinates all components.
//!
//! Opens the recording archive, fans the configured hops out over the
//! processing engine, and feeds successful results into the dispatcher.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{PipelineBlueprint, ProcessedHop};
use hop_engine::{process_batch, HopPipeline};
use ingestion::CsvHopStore;
use observability::record_hop_dispatched;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::PipelineStats;
use crate::error::CliError;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The processing run blueprint
    pub blueprint: PipelineBlueprint,

    /// Maximum number of hops processed concurrently
    pub jobs: usize,

    /// Channel buffer size
    pub buffer_size: usize,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Open Archive
        info!(root = %blueprint.data.root, "Opening recording archive...");
        let store = CsvHopStore::open(blueprint.data.root.clone())
            .map_err(|e| CliError::archive_open(blueprint.data.root.clone(), e.to_string()))?;

        let engine = Arc::new(HopPipeline::new(
            Arc::new(store),
            blueprint.grid,
            blueprint.contact,
        ));

        let ids = blueprint.hop_ids();
        info!(
            subjects = blueprint.subjects.len(),
            hops = ids.len(),
            jobs = self.config.jobs,
            "Hop list assembled"
        );

        // Setup Dispatcher
        info!("Setting up dispatcher...");
        let (hop_tx, hop_rx) = mpsc::channel::<ProcessedHop>(self.config.buffer_size);

        if blueprint.sinks.is_empty() {
            warn!("No sinks configured - processed hops will be dropped");
        }

        let dispatcher = dispatcher::create_dispatcher(blueprint.sinks.clone(), hop_rx)
            .context("Failed to create dispatcher")?;

        let active_sinks = blueprint.sinks.len();
        let sink_names: Vec<String> = blueprint.sinks.iter().map(|s| s.name.clone()).collect();
        let dispatcher_handle = dispatcher.spawn();

        info!(active_sinks, "Dispatcher started");

        // Process Batch
        info!("Processing hops...");
        let outcomes = process_batch(engine, ids, self.config.jobs).await;

        let mut stats = PipelineStats {
            active_sinks,
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome.result {
                Ok(hop) => {
                    stats.hops_processed += 1;
                    stats.rows_aligned += hop.len() as u64;
                    stats.batch_metrics.update(&hop.meta);

                    let delivered = hop_tx.send(hop).await.is_ok();
                    for name in &sink_names {
                        record_hop_dispatched(name, delivered);
                    }
                    if !delivered {
                        warn!("Dispatcher channel closed");
                    }
                }
                Err(_) => {
                    stats.hops_failed += 1;
                    stats
                        .batch_metrics
                        .record_failure(outcome.id.subject.as_ref());
                }
            }
        }

        // Shutdown
        info!("Shutting down pipeline...");
        drop(hop_tx);

        // Wait for dispatcher to flush
        let _ = tokio::time::timeout(Duration::from_secs(5), dispatcher_handle).await;

        stats.duration = start_time.elapsed();
        observability::record_batch_duration(stats.duration.as_secs_f64());

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            hops_per_sec = format!("{:.2}", stats.hops_per_sec()),
            "Pipeline shutdown complete"
        );

        Ok(stats)
    }
}
