//! CSV-backed archive store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use contracts::{
    ContractError, EventTiming, ForceFrame, HopId, HopStore, LandmarkFrame, SightLabel,
};
use tracing::{debug, warn};

use crate::tables;

/// `HopStore` over a recording archive on disk.
///
/// Per-hop tables are read fresh on every call; the phase metadata
/// table is read once when the store is opened because it is shared by
/// every hop in the archive.
pub struct CsvHopStore {
    root: PathBuf,
    labels: HashMap<(String, u32), SightLabel>,
}

impl CsvHopStore {
    /// Open an archive rooted at `root`.
    ///
    /// A missing `data.csv` is not an error: sight labels are optional
    /// and resolve to `Unknown` downstream. A malformed one is.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ContractError> {
        let root = root.into();
        let metadata_path = root.join("data.csv");

        let labels = if metadata_path.is_file() {
            tables::read_sight_labels(&metadata_path)?
        } else {
            warn!(path = %metadata_path.display(), "no phase metadata table, labels default to Unknown");
            HashMap::new()
        };

        debug!(
            root = %root.display(),
            labels = labels.len(),
            "archive store opened"
        );

        Ok(Self { root, labels })
    }

    /// Root directory of the archive.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn hop_dir(&self, id: &HopId) -> PathBuf {
        self.root.join(id.subject.as_ref()).join(id.hop.to_string())
    }

    fn require_file(&self, id: &HopId, path: PathBuf) -> Result<PathBuf, ContractError> {
        if path.is_file() {
            Ok(path)
        } else {
            let what = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Err(ContractError::missing_input(
                id.subject.as_ref(),
                id.hop,
                what,
            ))
        }
    }
}

impl HopStore for CsvHopStore {
    fn landmarks(&self, id: &HopId) -> Result<Vec<LandmarkFrame>, ContractError> {
        let path = self.require_file(id, self.hop_dir(id).join("xyz.csv"))?;
        let frames = tables::read_landmarks(&path)?;
        metrics::counter!("hop_store_tables_total", "table" => "xyz").increment(1);
        debug!(%id, frames = frames.len(), "landmark table read");
        Ok(frames)
    }

    fn force(&self, id: &HopId) -> Result<Vec<ForceFrame>, ContractError> {
        let path = self.require_file(id, self.hop_dir(id).join("force.csv"))?;
        let frames = tables::read_force(&path)?;
        metrics::counter!("hop_store_tables_total", "table" => "force").increment(1);
        debug!(%id, frames = frames.len(), "force table read");
        Ok(frames)
    }

    fn timing(&self, id: &HopId) -> Result<EventTiming, ContractError> {
        let path = self.require_file(
            id,
            self.root.join(id.subject.as_ref()).join("time.csv"),
        )?;
        let timings = tables::read_timing_table(&path)?;

        timings
            .get(&id.hop)
            .copied()
            .ok_or_else(|| ContractError::TimingNotFound {
                subject: id.subject.to_string(),
                hop: id.hop,
            })
    }

    fn sight_label(&self, id: &HopId) -> Option<SightLabel> {
        self.labels
            .get(&(id.subject.to_string(), id.hop))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn xyz_content(frames: usize) -> String {
        let mut cols = Vec::new();
        for point in 1..=6 {
            for axis in ["X", "Y", "Z"] {
                cols.push(format!("pt{point}_{axis}"));
            }
        }
        let mut out = cols.join(",");
        out.push('\n');
        for frame in 0..frames {
            let row: Vec<String> = (0..18).map(|i| format!("{}.{}", frame, i)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    fn build_archive(dir: &tempfile::TempDir) {
        let hop_dir = dir.path().join("Atlas").join("5");
        fs::create_dir_all(&hop_dir).unwrap();
        fs::write(hop_dir.join("xyz.csv"), xyz_content(4)).unwrap();
        fs::write(hop_dir.join("force.csv"), "0,0,0\n0,0,1\n0,0,2\n").unwrap();
        fs::write(
            dir.path().join("Atlas").join("time.csv"),
            "Hop,Onset,First Touch,Recovery\n5,10.0,20.0,60.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("data.csv"),
            "ID,Hop,Hop Phase,Sight\nAtlas,5,Landing,Sighted\n",
        )
        .unwrap();
    }

    #[test]
    fn test_open_and_read_hop() {
        let dir = tempfile::tempdir().unwrap();
        build_archive(&dir);

        let store = CsvHopStore::open(dir.path()).unwrap();
        let id = HopId::new("Atlas", 5);

        let landmarks = store.landmarks(&id).unwrap();
        assert_eq!(landmarks.len(), 4);
        assert!(landmarks[0].is_complete());

        let force = store.force(&id).unwrap();
        assert_eq!(force.len(), 3);
        assert!((force[2].normal - 2.0).abs() < 1e-12);

        let timing = store.timing(&id).unwrap();
        assert!((timing.first_touch_ms - 20.0).abs() < 1e-12);

        assert_eq!(store.sight_label(&id), Some(SightLabel::Sighted));
    }

    #[test]
    fn test_missing_hop_table() {
        let dir = tempfile::tempdir().unwrap();
        build_archive(&dir);

        let store = CsvHopStore::open(dir.path()).unwrap();
        let err = store.landmarks(&HopId::new("Atlas", 99)).unwrap_err();
        assert!(matches!(err, ContractError::MissingInput { hop: 99, .. }));
    }

    #[test]
    fn test_timing_row_not_found() {
        let dir = tempfile::tempdir().unwrap();
        build_archive(&dir);
        let hop_dir = dir.path().join("Atlas").join("7");
        fs::create_dir_all(&hop_dir).unwrap();

        let store = CsvHopStore::open(dir.path()).unwrap();
        let err = store.timing(&HopId::new("Atlas", 7)).unwrap_err();
        assert!(matches!(err, ContractError::TimingNotFound { hop: 7, .. }));
    }

    #[test]
    fn test_missing_metadata_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        build_archive(&dir);
        fs::remove_file(dir.path().join("data.csv")).unwrap();

        let store = CsvHopStore::open(dir.path()).unwrap();
        assert_eq!(store.sight_label(&HopId::new("Atlas", 5)), None);
    }
}
