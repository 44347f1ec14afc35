//! LogSink - logs hop summary via tracing

use contracts::{ContractError, HopSink, ProcessedHop};
use tracing::{info, instrument};

/// Sink that logs hop summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_hop_summary(&self, hop: &ProcessedHop) {
        info!(
            sink = %self.name,
            hop = %hop.id,
            sight = %hop.sight,
            rows = hop.len(),
            dropped = hop.meta.dropped_rows,
            contact = ?hop.meta.contact_index,
            "ProcessedHop received"
        );
    }
}

impl HopSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, hop),
        fields(sink = %self.name, hop = %hop.id)
    )]
    async fn write(&mut self, hop: &ProcessedHop) -> Result<(), ContractError> {
        self.log_hop_summary(hop);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{HopId, HopMeta, SightLabel};

    #[tokio::test]
    async fn test_log_sink_write() {
        let mut sink = LogSink::new("test_log");
        let hop = ProcessedHop {
            id: HopId::new("Atlas", 1),
            sight: SightLabel::Unknown,
            rows: Vec::new(),
            meta: HopMeta::default(),
        };

        let result = sink.write(&hop).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_sink_name() {
        let sink = LogSink::new("my_logger");
        assert_eq!(sink.name(), "my_logger");
    }
}
