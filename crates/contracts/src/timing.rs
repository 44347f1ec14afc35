//! EventTiming - per-hop event timestamps from the recording rig.

use serde::{Deserialize, Serialize};

/// The three event timestamps recorded for one hop, in the rig's
/// native unit (milliseconds).
///
/// Exactly one `EventTiming` exists per (subject, hop) pair. Timestamps
/// convert to frame indices through the fixed sampling interval of the
/// target series (see `SamplingGrid`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventTiming {
    /// Hop onset (take-off preparation begins)
    pub onset_ms: f64,

    /// First ground contact of the forelimb
    pub first_touch_ms: f64,

    /// End of the landing phase
    pub recovery_ms: f64,
}

impl EventTiming {
    pub fn new(onset_ms: f64, first_touch_ms: f64, recovery_ms: f64) -> Self {
        Self {
            onset_ms,
            first_touch_ms,
            recovery_ms,
        }
    }

    /// First touch in seconds.
    pub fn first_touch_s(&self) -> f64 {
        self.first_touch_ms * 1e-3
    }

    /// Recovery in seconds.
    pub fn recovery_s(&self) -> f64 {
        self.recovery_ms * 1e-3
    }
}
