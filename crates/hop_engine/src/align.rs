//! Multi-rate alignment onto the common sampling grid.
//!
//! The angle series (kinematic rate) and the force series (force-plate
//! rate) describe the same event on different clocks. Alignment slices
//! the angle series to the first-touch..recovery window, slices the
//! force series from the detected contact index, decimates both onto
//! the common grid, and truncates them to equal length.

use contracts::{AlignedRow, AngleFrame, EventTiming, ForceFrame, SamplingGrid};

/// The aligned per-event table plus its window diagnostics.
#[derive(Debug, Clone, Default)]
pub struct AlignedWindow {
    /// Equal-length angle and force channels, zero-based rows
    pub rows: Vec<AlignedRow>,

    /// Kinematic frames selected by timing, before decimation
    pub kinematic_window_frames: usize,

    /// Rows discarded because an angle channel was missing
    pub dropped_rows: usize,
}

impl AlignedWindow {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Align one event's angle and force series.
///
/// `contact_index` is the detector's result; `None` falls back to
/// aligning from the start of the force series. A zero-row result is a
/// valid terminal state, not an error.
pub fn align(
    angles: &[AngleFrame],
    force: &[ForceFrame],
    timing: &EventTiming,
    contact_index: Option<usize>,
    grid: &SamplingGrid,
) -> AlignedWindow {
    // Ceiling at the start so the window never begins before the true
    // first-touch instant; floor at the end.
    let start = grid.kinematic_index_ceil(timing.first_touch_s());
    let end = grid.kinematic_index_floor(timing.recovery_s());

    if angles.is_empty() || start >= angles.len() || end < start {
        return AlignedWindow::default();
    }
    let end = end.min(angles.len() - 1);

    let angle_window: Vec<&AngleFrame> = angles[start..=end]
        .iter()
        .step_by(grid.kinematic_stride())
        .collect();

    let force_start = contact_index.unwrap_or(0).min(force.len());
    let force_window: Vec<&ForceFrame> = force[force_start..]
        .iter()
        .step_by(grid.force_stride())
        .collect();

    let common = angle_window.len().min(force_window.len());
    let mut rows = Vec::with_capacity(common);
    let mut dropped = 0usize;

    for (angle, force) in angle_window.iter().zip(force_window.iter()).take(common) {
        let (Some(elbow), Some(pro_ret), Some(dep_ele)) = (
            angle.elbow_flex_ext,
            angle.humeral_pro_ret,
            angle.humeral_dep_ele,
        ) else {
            dropped += 1;
            continue;
        };

        rows.push(AlignedRow {
            elbow_flex_ext: elbow,
            humeral_pro_ret: pro_ret,
            humeral_dep_ele: dep_ele,
            fore_aft: force.fore_aft,
            lateral: force.lateral,
            normal: force.normal,
        });
    }

    AlignedWindow {
        rows,
        kinematic_window_frames: end - start + 1,
        dropped_rows: dropped,
    }
}
