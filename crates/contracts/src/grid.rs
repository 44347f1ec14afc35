//! SamplingGrid - fixed sampling intervals of the two recording chains.
//!
//! The kinematic chain (landmarks, therefore angles) and the force
//! plate sample at different fixed rates. Alignment decimates both to
//! a common coarser grid; the decimation strides are derived from the
//! interval ratio and must divide exactly.

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Fixed sampling intervals, in seconds per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingGrid {
    /// Kinematic (landmark/angle) sampling interval
    pub kinematic_interval_s: f64,

    /// Force-plate sampling interval
    pub force_interval_s: f64,

    /// Common interval both series are decimated to during alignment
    pub aligned_interval_s: f64,
}

impl Default for SamplingGrid {
    fn default() -> Self {
        // Rig constants: 500 Hz kinematic, 200 Hz force plate,
        // aligned onto a 100 Hz grid.
        Self {
            kinematic_interval_s: 0.002,
            force_interval_s: 0.005,
            aligned_interval_s: 0.01,
        }
    }
}

impl SamplingGrid {
    /// Every Nth kinematic frame lands on the aligned grid.
    pub fn kinematic_stride(&self) -> usize {
        (self.aligned_interval_s / self.kinematic_interval_s).round() as usize
    }

    /// Every Nth force frame lands on the aligned grid.
    pub fn force_stride(&self) -> usize {
        (self.aligned_interval_s / self.force_interval_s).round() as usize
    }

    /// Convert a timestamp in seconds to a kinematic frame index,
    /// rounding up so the window never starts before the instant.
    pub fn kinematic_index_ceil(&self, t_s: f64) -> usize {
        let idx = (t_s / self.kinematic_interval_s).ceil();
        if idx <= 0.0 {
            0
        } else {
            idx as usize
        }
    }

    /// Convert a timestamp in seconds to a kinematic frame index,
    /// rounding down so the window never extends past the instant.
    pub fn kinematic_index_floor(&self, t_s: f64) -> usize {
        let idx = (t_s / self.kinematic_interval_s).floor();
        if idx <= 0.0 {
            0
        } else {
            idx as usize
        }
    }

    /// Check the intervals are positive and the strides divide exactly.
    pub fn validate(&self) -> Result<(), ContractError> {
        for (field, value) in [
            ("grid.kinematic_interval_s", self.kinematic_interval_s),
            ("grid.force_interval_s", self.force_interval_s),
            ("grid.aligned_interval_s", self.aligned_interval_s),
        ] {
            if !(value > 0.0) {
                return Err(ContractError::config_validation(
                    field,
                    format!("interval must be > 0, got {value}"),
                ));
            }
        }

        for (field, interval) in [
            ("grid.kinematic_interval_s", self.kinematic_interval_s),
            ("grid.force_interval_s", self.force_interval_s),
        ] {
            let ratio = self.aligned_interval_s / interval;
            if (ratio - ratio.round()).abs() > 1e-9 || ratio < 1.0 {
                return Err(ContractError::config_validation(
                    field,
                    format!(
                        "aligned interval {} is not an integer multiple of {}",
                        self.aligned_interval_s, interval
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strides() {
        let grid = SamplingGrid::default();
        assert_eq!(grid.kinematic_stride(), 5);
        assert_eq!(grid.force_stride(), 2);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_ceil_index_never_precedes_instant() {
        let grid = SamplingGrid::default();
        // 0.0051 s is between frames 2 and 3 on the 0.002 s grid
        let idx = grid.kinematic_index_ceil(0.0051);
        assert_eq!(idx, 3);
        assert!(idx as f64 * grid.kinematic_interval_s >= 0.0051);
    }

    #[test]
    fn test_floor_index() {
        let grid = SamplingGrid::default();
        assert_eq!(grid.kinematic_index_floor(0.0059), 2);
        assert_eq!(grid.kinematic_index_floor(-1.0), 0);
    }

    #[test]
    fn test_non_divisible_grid_rejected() {
        let grid = SamplingGrid {
            kinematic_interval_s: 0.003,
            force_interval_s: 0.005,
            aligned_interval_s: 0.01,
        };
        assert!(grid.validate().is_err());
    }
}
