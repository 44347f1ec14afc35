//! Pipeline metric recording
//!
//! Exporter-facing record functions plus an in-memory aggregator for
//! end-of-batch summaries.

use contracts::HopMeta;
use metrics::{counter, gauge, histogram};

/// Record metrics for one successfully processed hop.
///
/// Called once per hop as the pipeline produces its `HopMeta`.
pub fn record_hop_metrics(meta: &HopMeta) {
    counter!("hop_align_events_total", "status" => "ok").increment(1);

    histogram!("hop_align_rows_histogram").record(meta.aligned_rows as f64);
    gauge!("hop_align_last_rows").set(meta.aligned_rows as f64);
    histogram!("hop_align_window_frames_histogram").record(meta.kinematic_window_frames as f64);

    if meta.dropped_rows > 0 {
        counter!("hop_align_dropped_rows_total").increment(meta.dropped_rows as u64);
    }
    if meta.contact_index.is_none() {
        counter!("hop_align_contact_missing_total").increment(1);
    }
}

/// Record one hop that failed with a propagated error.
pub fn record_hop_failure(subject: &str) {
    counter!(
        "hop_align_events_total",
        "status" => "error"
    )
    .increment(1);
    counter!(
        "hop_align_failures_total",
        "subject" => subject.to_string()
    )
    .increment(1);
}

/// Record the wall-clock duration of one finished batch.
pub fn record_batch_duration(seconds: f64) {
    histogram!("hop_align_batch_duration_seconds").record(seconds);
}

/// Record a processed hop handed to a sink
pub fn record_hop_dispatched(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "hop_align_dispatched_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Batch metrics aggregator
///
/// Aggregates in memory so the CLI can print a summary at the end of a
/// run without scraping the exporter.
#[derive(Debug, Clone, Default)]
pub struct BatchMetricsAggregator {
    /// Hops processed (success or failure)
    pub total_hops: u64,

    /// Hops that failed with a propagated error
    pub failed_hops: u64,

    /// Hops where no sustained force rise was found
    pub hops_without_contact: u64,

    /// Rows discarded for missing angle channels, summed over hops
    pub total_dropped_rows: u64,

    /// Aligned row counts
    pub rows_stats: RunningStats,

    /// Kinematic window sizes, in frames
    pub window_stats: RunningStats,

    /// Failure counts per subject
    pub failure_counts: std::collections::HashMap<String, u64>,
}

impl BatchMetricsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one successful hop
    pub fn update(&mut self, meta: &HopMeta) {
        self.total_hops += 1;
        self.total_dropped_rows += meta.dropped_rows as u64;

        if meta.contact_index.is_none() {
            self.hops_without_contact += 1;
        }

        self.rows_stats.push(meta.aligned_rows as f64);
        self.window_stats.push(meta.kinematic_window_frames as f64);
    }

    /// Fold in one failed hop
    pub fn record_failure(&mut self, subject: &str) {
        self.total_hops += 1;
        self.failed_hops += 1;
        *self.failure_counts.entry(subject.to_string()).or_insert(0) += 1;
    }

    /// Produce the summary report
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_hops: self.total_hops,
            failed_hops: self.failed_hops,
            hops_without_contact: self.hops_without_contact,
            total_dropped_rows: self.total_dropped_rows,
            failure_rate: if self.total_hops > 0 {
                self.failed_hops as f64 / self.total_hops as f64 * 100.0
            } else {
                0.0
            },
            rows: StatsSummary::from(&self.rows_stats),
            window_frames: StatsSummary::from(&self.window_stats),
            subject_failure_counts: self.failure_counts.clone(),
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Batch summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_hops: u64,
    pub failed_hops: u64,
    pub hops_without_contact: u64,
    pub total_dropped_rows: u64,
    pub failure_rate: f64,
    pub rows: StatsSummary,
    pub window_frames: StatsSummary,
    pub subject_failure_counts: std::collections::HashMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Batch Summary ===")?;
        writeln!(f, "Total hops: {}", self.total_hops)?;
        writeln!(
            f,
            "Failed hops: {} ({:.2}%)",
            self.failed_hops, self.failure_rate
        )?;
        writeln!(f, "Hops without detected contact: {}", self.hops_without_contact)?;
        writeln!(f, "Dropped rows: {}", self.total_dropped_rows)?;
        writeln!(f, "Aligned rows: {}", self.rows)?;
        writeln!(f, "Kinematic window (frames): {}", self.window_frames)?;

        if !self.subject_failure_counts.is_empty() {
            writeln!(f, "Failures per subject:")?;
            for (subject, count) in &self.subject_failure_counts {
                writeln!(f, "  {}: {}", subject, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a new value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(1.0);
        stats.push(2.0);
        stats.push(3.0);
        stats.push(4.0);
        stats.push(5.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = BatchMetricsAggregator::new();

        let meta = HopMeta {
            contact_index: None,
            kinematic_window_frames: 301,
            dropped_rows: 2,
            aligned_rows: 61,
        };

        aggregator.update(&meta);
        aggregator.record_failure("Atlas");

        assert_eq!(aggregator.total_hops, 2);
        assert_eq!(aggregator.failed_hops, 1);
        assert_eq!(aggregator.hops_without_contact, 1);
        assert_eq!(aggregator.total_dropped_rows, 2);
        assert_eq!(aggregator.failure_counts.get("Atlas"), Some(&1));
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = BatchMetricsAggregator::new();
        for rows in [50, 60, 70] {
            aggregator.update(&HopMeta {
                contact_index: Some(10),
                kinematic_window_frames: 300,
                dropped_rows: 0,
                aligned_rows: rows,
            });
        }
        aggregator.record_failure("Zeus");

        let output = format!("{}", aggregator.summary());
        assert!(output.contains("Total hops: 4"));
        assert!(output.contains("25.00%"));
        assert!(output.contains("mean=60.000"));
    }
}
