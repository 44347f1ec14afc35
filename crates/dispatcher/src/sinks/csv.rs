//! CsvSink - one CSV table per processed hop, plus a JSON meta sidecar

use contracts::{ContractError, HopSink, ProcessedHop, PROCESSED_COLUMNS};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Configuration for CsvSink
#[derive(Debug, Clone)]
pub struct CsvSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,
}

impl CsvSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./output"));

        Self { base_path }
    }
}

/// Sidecar document written next to each table.
#[derive(serde::Serialize)]
struct MetaSidecar<'a> {
    subject: &'a str,
    hop: u32,
    sight: String,
    meta: &'a contracts::HopMeta,
}

/// Sink that writes each hop as `<subject>_<hop>.csv` with the fixed
/// column set, and its identity/diagnostics as `<subject>_<hop>.meta.json`.
pub struct CsvSink {
    name: String,
    config: CsvSinkConfig,
}

impl CsvSink {
    /// Create a new CsvSink
    pub fn new(name: impl Into<String>, config: CsvSinkConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = CsvSinkConfig::from_params(params);
        Self::new(name, config)
    }

    fn write_table(&self, hop: &ProcessedHop) -> std::io::Result<()> {
        let stem = super::file_stem(&hop.id);

        let table_path = self.config.base_path.join(format!("{stem}.csv"));
        let mut writer = csv::Writer::from_path(&table_path)?;

        let mut header = vec!["Index".to_string()];
        header.extend(PROCESSED_COLUMNS.iter().map(|c| c.to_string()));
        writer.write_record(&header)?;

        for (index, row) in hop.rows.iter().enumerate() {
            let mut record = vec![index.to_string()];
            record.extend(row.channels().iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        let sidecar = MetaSidecar {
            subject: hop.id.subject.as_ref(),
            hop: hop.id.hop,
            sight: hop.sight.to_string(),
            meta: &hop.meta,
        };
        let meta_path = self.config.base_path.join(format!("{stem}.meta.json"));
        let meta_file = File::create(meta_path)?;
        serde_json::to_writer_pretty(meta_file, &sidecar)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(())
    }

    fn persist(&self, hop: &ProcessedHop) -> Result<(), ContractError> {
        self.write_table(hop).map_err(|e| {
            error!(sink = %self.name, hop = %hop.id, error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })
    }
}

impl HopSink for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_sink_write",
        skip(self, hop),
        fields(sink = %self.name, hop = %hop.id)
    )]
    async fn write(&mut self, hop: &ProcessedHop) -> Result<(), ContractError> {
        self.persist(hop)?;
        Ok(())
    }

    #[instrument(name = "csv_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    #[instrument(name = "csv_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, "CsvSink closed");
        Ok(())
    }
}
