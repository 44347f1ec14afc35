//! Pipeline statistics and metrics.

use std::time::Duration;

use observability::BatchMetricsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Hops processed successfully
    pub hops_processed: u64,

    /// Hops that failed with a propagated error
    pub hops_failed: u64,

    /// Aligned rows produced, summed over all hops
    pub rows_aligned: u64,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Number of sinks that received data
    pub active_sinks: usize,

    /// Per-hop metrics aggregator
    pub batch_metrics: BatchMetricsAggregator,
}

impl PipelineStats {
    /// Calculate hops per second throughput
    pub fn hops_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.hops_processed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate failure rate as percentage
    #[allow(dead_code)]
    pub fn failure_rate(&self) -> f64 {
        let total = self.hops_processed + self.hops_failed;
        if total > 0 {
            (self.hops_failed as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Pipeline Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Hops processed: {}", self.hops_processed);
        println!("   ├─ Hops failed: {}", self.hops_failed);
        println!("   ├─ Rows aligned: {}", self.rows_aligned);
        println!("   ├─ Hops/s: {:.2}", self.hops_per_sec());
        println!("   └─ Active sinks: {}", self.active_sinks);

        let summary = self.batch_metrics.summary();

        println!("\n📈 Alignment Metrics");
        println!(
            "   ├─ Hops without detected contact: {}",
            summary.hops_without_contact
        );
        println!("   ├─ Dropped rows: {}", summary.total_dropped_rows);
        println!("   ├─ Aligned rows: {}", summary.rows);
        println!("   └─ Kinematic window (frames): {}", summary.window_frames);

        if !summary.subject_failure_counts.is_empty() {
            println!("\n⚠️  Failures per Subject");
            for (subject, count) in &summary.subject_failure_counts {
                println!("   ├─ {}: {}", subject, count);
            }
        }

        println!();
    }
}
