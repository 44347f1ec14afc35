//! JsonSink - one JSON document per processed hop

use contracts::{ContractError, HopSink, ProcessedHop, PROCESSED_COLUMNS};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Configuration for JsonSink
#[derive(Debug, Clone)]
pub struct JsonSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,
}

impl JsonSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./output"));

        Self { base_path }
    }
}

/// The full per-hop document: identity, label, diagnostics and table
/// in one place.
#[derive(serde::Serialize)]
struct HopDocument<'a> {
    subject: &'a str,
    hop: u32,
    sight: String,
    meta: &'a contracts::HopMeta,
    columns: [&'static str; 6],
    rows: Vec<[f64; 6]>,
}

/// Sink that writes each hop as `<subject>_<hop>.json`
pub struct JsonSink {
    name: String,
    config: JsonSinkConfig,
}

impl JsonSink {
    /// Create a new JsonSink
    pub fn new(name: impl Into<String>, config: JsonSinkConfig) -> std::io::Result<Self> {
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
        let config = JsonSinkConfig::from_params(params);
        Self::new(name, config)
    }

    fn write_document(&self, hop: &ProcessedHop) -> std::io::Result<()> {
        let document = HopDocument {
            subject: hop.id.subject.as_ref(),
            hop: hop.id.hop,
            sight: hop.sight.to_string(),
            meta: &hop.meta,
            columns: PROCESSED_COLUMNS,
            rows: hop.rows.iter().map(|row| row.channels()).collect(),
        };

        let stem = super::file_stem(&hop.id);
        let path = self.config.base_path.join(format!("{stem}.json"));
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &document)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(())
    }

    fn persist(&self, hop: &ProcessedHop) -> Result<(), ContractError> {
        self.write_document(hop).map_err(|e| {
            error!(sink = %self.name, hop = %hop.id, error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })
    }
}

impl HopSink for JsonSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_sink_write",
        skip(self, hop),
        fields(sink = %self.name, hop = %hop.id)
    )]
    async fn write(&mut self, hop: &ProcessedHop) -> Result<(), ContractError> {
        self.persist(hop)?;
        Ok(())
    }

    #[instrument(name = "json_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    #[instrument(name = "json_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(sink = %self.name, "JsonSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AlignedRow, HopId, HopMeta, SightLabel};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_json_sink_write() {
        let dir = tempdir().unwrap();
        let config = JsonSinkConfig {
            base_path: dir.path().to_path_buf(),
        };

        let mut sink = JsonSink::new("test_json", config).unwrap();
        let hop = ProcessedHop {
            id: HopId::new("Zeus", 2),
            sight: SightLabel::Sighted,
            rows: vec![AlignedRow {
                elbow_flex_ext: 0.5,
                humeral_pro_ret: 1.5,
                humeral_dep_ele: 2.5,
                fore_aft: 3.5,
                lateral: 4.5,
                normal: 5.5,
            }],
            meta: HopMeta::default(),
        };

        sink.write(&hop).await.unwrap();

        let content = fs::read_to_string(dir.path().join("Zeus_2.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(doc["subject"], "Zeus");
        assert_eq!(doc["sight"], "Sighted");
        assert_eq!(doc["columns"][0], "Elbow flexion/extension");
        assert_eq!(doc["rows"][0][5], 5.5);
    }
}
