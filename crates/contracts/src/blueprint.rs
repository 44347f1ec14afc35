//! PipelineBlueprint - declarative description of one processing run.
//!
//! Parsed from TOML/JSON by `config_loader`, validated there, then
//! handed to the CLI orchestrator. Mirrors the on-disk layout of the
//! recording archive: a data root, the sampling grid, the contact
//! detector knobs, the subjects with their hop numbers, and the sinks
//! that receive the processed tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{HopId, SamplingGrid, SubjectId};

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineBlueprint {
    /// Data source settings
    pub data: DataConfig,

    /// Sampling grid constants
    #[serde(default)]
    pub grid: SamplingGrid,

    /// Contact detector settings
    #[serde(default)]
    pub contact: ContactConfig,

    /// Subjects and the hops recorded for each
    pub subjects: Vec<SubjectConfig>,

    /// Output sinks
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

impl PipelineBlueprint {
    /// Flatten the subject list into one id per hop, the unit the
    /// batch runner fans out over.
    pub fn hop_ids(&self) -> Vec<HopId> {
        self.subjects
            .iter()
            .flat_map(|subject| {
                let name = SubjectId::from(subject.name.as_str());
                subject
                    .hops
                    .iter()
                    .map(move |&hop| HopId {
                        subject: name.clone(),
                        hop,
                    })
            })
            .collect()
    }
}

/// Where the raw recordings live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root directory of the recording archive
    pub root: String,
}

/// Contact detector knobs (see `hop_engine::contact`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Forward lookahead window, in force samples
    pub lookahead: usize,

    /// Cumulative rise over the lookahead that qualifies as contact,
    /// in force units
    pub rise_threshold: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            lookahead: 10,
            rise_threshold: 1.0,
        }
    }
}

/// One subject and the hop numbers recorded for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectConfig {
    /// Subject name, also the archive directory name
    pub name: String,

    /// Hop numbers with complete recordings
    pub hops: Vec<u32>,
}

/// One output sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name (used for logging/metrics)
    pub name: String,

    /// Sink kind
    pub sink_type: SinkType,

    /// Per-sink queue depth
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Sink-specific parameters (e.g. `base_path` for file sinks)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    100
}

/// Available sink kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// One CSV table per processed hop
    Csv,
    /// One JSON document per processed hop
    Json,
    /// Tracing summary only
    Log,
}
