//! Raw per-sample records: landmark, angle and force frames.
//!
//! All three are plain immutable value types. Missing data is modeled
//! as `Option` at this boundary so no arithmetic ever runs on absent
//! coordinates by accident.

use serde::{Deserialize, Serialize};

/// Number of tracked anatomical landmarks per frame.
pub const LANDMARK_COUNT: usize = 6;

/// A 3D point in the rig's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One time sample of the six tracked landmarks (pt1..pt6).
///
/// A point is `None` when any of its three coordinates was absent in
/// the raw table. A frame with any missing point is not a valid input
/// for angle computation; the Geometry Engine maps it to an all-missing
/// `AngleFrame` rather than computing from partial data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub points: [Option<Point3>; LANDMARK_COUNT],
}

impl LandmarkFrame {
    /// Build a frame from six fully-known points.
    pub fn from_points(points: [Point3; LANDMARK_COUNT]) -> Self {
        Self {
            points: points.map(Some),
        }
    }

    /// True when all six landmarks are present.
    pub fn is_complete(&self) -> bool {
        self.points.iter().all(Option::is_some)
    }
}

/// The three joint angles derived from one `LandmarkFrame`, in degrees.
///
/// `None` is the missing-value sentinel carried forward from an
/// incomplete landmark frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleFrame {
    /// Elbow flexion/extension
    pub elbow_flex_ext: Option<f64>,

    /// Humeral protraction/retraction
    pub humeral_pro_ret: Option<f64>,

    /// Humeral depression/elevation
    pub humeral_dep_ele: Option<f64>,
}

impl AngleFrame {
    /// All three angles present.
    pub fn is_complete(&self) -> bool {
        self.elbow_flex_ext.is_some()
            && self.humeral_pro_ret.is_some()
            && self.humeral_dep_ele.is_some()
    }

    /// All three angles missing.
    pub fn missing() -> Self {
        Self::default()
    }
}

/// One time sample of the three force-plate axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceFrame {
    /// Fore-aft axis
    pub fore_aft: f64,

    /// Lateral axis
    pub lateral: f64,

    /// Normal (vertical loading) axis
    pub normal: f64,
}

impl ForceFrame {
    pub fn new(fore_aft: f64, lateral: f64, normal: f64) -> Self {
        Self {
            fore_aft,
            lateral,
            normal,
        }
    }
}
