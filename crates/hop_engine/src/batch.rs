//! Batch fan-out over independent hops.
//!
//! Each hop is pure and independent end to end, so the batch is a flat
//! map with a bounded number of concurrent tasks. One failing hop is
//! recorded and never aborts the rest.

use std::sync::Arc;

use contracts::{ContractError, HopId, HopStore, ProcessedHop};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::pipeline::HopPipeline;

/// Result of one hop inside a batch, keyed by its id so completion
/// order does not matter.
#[derive(Debug)]
pub struct BatchOutcome {
    pub id: HopId,
    pub result: Result<ProcessedHop, ContractError>,
}

/// Aggregate counters over one finished batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_rows: usize,
}

impl BatchStats {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let mut stats = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(hop) => {
                    stats.succeeded += 1;
                    stats.total_rows += hop.len();
                }
                Err(_) => stats.failed += 1,
            }
        }
        stats
    }
}

/// Process every id with at most `jobs` hops in flight.
///
/// Results arrive in completion order; each carries its id. A `jobs`
/// of 0 is treated as 1.
pub async fn process_batch<S>(
    pipeline: Arc<HopPipeline<S>>,
    ids: Vec<HopId>,
    jobs: usize,
) -> Vec<BatchOutcome>
where
    S: HopStore + 'static,
{
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();

    for id in ids {
        let pipeline = pipeline.clone();
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            // Closed only if the semaphore is dropped, which it is not.
            let _permit = semaphore.acquire_owned().await;
            let result = pipeline.process(&id);
            BatchOutcome { id, result }
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => {
                match &outcome.result {
                    Ok(hop) => {
                        info!(id = %outcome.id, rows = hop.len(), "hop complete");
                    }
                    Err(e) => {
                        observability::record_hop_failure(outcome.id.subject.as_ref());
                        error!(id = %outcome.id, error = %e, "hop failed");
                    }
                }
                outcomes.push(outcome);
            }
            Err(e) => {
                error!(error = %e, "batch task panicked");
            }
        }
    }

    outcomes
}
