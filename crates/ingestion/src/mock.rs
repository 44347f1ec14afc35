//! Mock hop store
//!
//! Generates deterministic synthetic recordings for tests and demos
//! that have no archive on disk. The synthetic force trace carries a
//! flat stretch followed by a sustained ramp so the contact detector
//! has something real to find.

use std::collections::HashSet;

use contracts::{
    ContractError, EventTiming, ForceFrame, HopId, HopStore, LandmarkFrame, Point3, SightLabel,
};

/// Shape of the synthetic recordings.
#[derive(Debug, Clone)]
pub struct MockHopConfig {
    /// Landmark frames per hop
    pub kinematic_frames: usize,

    /// Force samples per hop
    pub force_frames: usize,

    /// Force sample index where the contact ramp starts
    pub contact_frame: usize,

    /// Normal-force increment per sample during the ramp
    pub ramp_step: f64,

    /// Event timestamps reported for every hop
    pub timing: EventTiming,

    /// Label reported for every hop
    pub sight: SightLabel,
}

impl Default for MockHopConfig {
    fn default() -> Self {
        Self {
            kinematic_frames: 500,
            force_frames: 200,
            contact_frame: 60,
            ramp_step: 0.2,
            timing: EventTiming {
                onset_ms: 100.0,
                first_touch_ms: 300.0,
                recovery_ms: 900.0,
            },
            sight: SightLabel::Sighted,
        }
    }
}

/// In-memory `HopStore` producing the same synthetic hop for any id,
/// except ids registered as absent.
pub struct MockHopStore {
    config: MockHopConfig,
    absent: HashSet<HopId>,
}

impl MockHopStore {
    pub fn new(config: MockHopConfig) -> Self {
        Self {
            config,
            absent: HashSet::new(),
        }
    }

    /// Register a hop whose tables are "missing from the archive".
    /// Every read for it fails with `MissingInput`.
    pub fn with_absent_hop(mut self, id: HopId) -> Self {
        self.absent.insert(id);
        self
    }

    fn check_present(&self, id: &HopId, what: &str) -> Result<(), ContractError> {
        if self.absent.contains(id) {
            Err(ContractError::missing_input(id.subject.as_ref(), id.hop, what))
        } else {
            Ok(())
        }
    }
}

impl Default for MockHopStore {
    fn default() -> Self {
        Self::new(MockHopConfig::default())
    }
}

impl HopStore for MockHopStore {
    fn landmarks(&self, id: &HopId) -> Result<Vec<LandmarkFrame>, ContractError> {
        self.check_present(id, "xyz.csv")?;

        let frames = (0..self.config.kinematic_frames)
            .map(|frame| {
                let t = frame as f64 * 0.01;
                // Six well-separated points drifting smoothly so every
                // triangle stays non-degenerate.
                LandmarkFrame::from_points([
                    Point3::new(0.0 + t, 0.0, 0.0),
                    Point3::new(1.0 + t, 0.5, 0.2),
                    Point3::new(1.5 + t, -0.5, 0.1),
                    Point3::new(2.0 + t, 0.0, 0.3),
                    Point3::new(3.0 + t, 0.4, 0.5 + 0.1 * (t * 2.0).sin()),
                    Point3::new(4.0 + t, -0.2, 0.2),
                ])
            })
            .collect();

        Ok(frames)
    }

    fn force(&self, id: &HopId) -> Result<Vec<ForceFrame>, ContractError> {
        self.check_present(id, "force.csv")?;

        let config = &self.config;
        let frames = (0..config.force_frames)
            .map(|sample| {
                let normal = if sample >= config.contact_frame {
                    (sample - config.contact_frame + 1) as f64 * config.ramp_step
                } else {
                    0.0
                };
                ForceFrame::new(0.01 * sample as f64, -0.005 * sample as f64, normal)
            })
            .collect();

        Ok(frames)
    }

    fn timing(&self, id: &HopId) -> Result<EventTiming, ContractError> {
        self.check_present(id, "time.csv")?;
        Ok(self.config.timing)
    }

    fn sight_label(&self, id: &HopId) -> Option<SightLabel> {
        if self.absent.contains(id) {
            None
        } else {
            Some(self.config.sight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_shapes() {
        let store = MockHopStore::default();
        let id = HopId::new("Atlas", 5);

        let landmarks = store.landmarks(&id).unwrap();
        assert_eq!(landmarks.len(), 500);
        assert!(landmarks.iter().all(LandmarkFrame::is_complete));

        let force = store.force(&id).unwrap();
        assert_eq!(force.len(), 200);
        assert!((force[59].normal).abs() < 1e-12);
        assert!(force[60].normal > 0.0);

        assert_eq!(store.sight_label(&id), Some(SightLabel::Sighted));
    }

    #[test]
    fn test_absent_hop_fails_every_read() {
        let id = HopId::new("Atlas", 5);
        let store = MockHopStore::default().with_absent_hop(id.clone());

        assert!(matches!(
            store.landmarks(&id),
            Err(ContractError::MissingInput { .. })
        ));
        assert!(matches!(
            store.force(&id),
            Err(ContractError::MissingInput { .. })
        ));
        assert!(matches!(
            store.timing(&id),
            Err(ContractError::MissingInput { .. })
        ));
        assert_eq!(store.sight_label(&id), None);

        // Other hops are unaffected
        assert!(store.landmarks(&HopId::new("Atlas", 8)).is_ok());
    }
}
