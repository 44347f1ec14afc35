//! ProcessedHop - Pipeline output
//!
//! The aligned, normalized per-event table plus its identity and
//! categorical label. Produced once per hop by the pipeline; consumed
//! read-only by presentation and clustering collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SubjectId;

/// Fixed column names of the processed table, in output order.
pub const PROCESSED_COLUMNS: [&str; 6] = [
    "Elbow flexion/extension",
    "Humeral protraction/retraction",
    "Humeral depression/elevation",
    "Fore-Aft",
    "Lateral",
    "Normal",
];

/// Identity of one recorded hop: which subject, which hop number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HopId {
    pub subject: SubjectId,
    pub hop: u32,
}

impl HopId {
    pub fn new(subject: impl Into<SubjectId>, hop: u32) -> Self {
        Self {
            subject: subject.into(),
            hop,
        }
    }
}

impl fmt::Display for HopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hop {}", self.subject, self.hop)
    }
}

/// Sight condition of the subject during one hop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SightLabel {
    Sighted,
    Blind,
    /// No landing-phase metadata record matched this hop
    #[default]
    Unknown,
}

impl SightLabel {
    /// Parse the label as it appears in the metadata table.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Sighted" => Self::Sighted,
            "Blind" => Self::Blind,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SightLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sighted => "Sighted",
            Self::Blind => "Blind",
            Self::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// One row of the aligned table: three angle channels followed by
/// three force channels, all on the common sampling grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub elbow_flex_ext: f64,
    pub humeral_pro_ret: f64,
    pub humeral_dep_ele: f64,
    pub fore_aft: f64,
    pub lateral: f64,
    pub normal: f64,
}

impl AlignedRow {
    /// Channel values in `PROCESSED_COLUMNS` order.
    pub fn channels(&self) -> [f64; 6] {
        [
            self.elbow_flex_ext,
            self.humeral_pro_ret,
            self.humeral_dep_ele,
            self.fore_aft,
            self.lateral,
            self.normal,
        ]
    }
}

/// Diagnostics recorded while one hop was processed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HopMeta {
    /// Contact index found on the normal force channel; `None` means
    /// the detector found no sustained rise and the aligner fell back
    /// to the start of the force series
    pub contact_index: Option<usize>,

    /// Kinematic frames selected by timing before decimation
    pub kinematic_window_frames: usize,

    /// Rows discarded because an angle channel was missing
    pub dropped_rows: usize,

    /// Rows in the final aligned table
    pub aligned_rows: usize,
}

/// The finished per-event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedHop {
    /// Which hop this table describes
    pub id: HopId,

    /// Categorical label resolved from the landing-phase metadata
    pub sight: SightLabel,

    /// Aligned, normalized rows; index is implicit and zero-based
    pub rows: Vec<AlignedRow>,

    /// Processing diagnostics
    pub meta: HopMeta,
}

impl ProcessedHop {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
