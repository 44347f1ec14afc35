//! HopStore trait - data-access abstraction
//!
//! Defines the read-side collaborator the pipeline pulls raw tables
//! from. The CSV-backed store and the mock store implement the same
//! interface so the pipeline never knows where a table came from.

use crate::{ContractError, EventTiming, ForceFrame, HopId, LandmarkFrame, SightLabel};

/// Read access to the raw per-hop recordings.
///
/// All methods load data fresh; implementations must not cache mutable
/// state across calls, since batch processing may query the same store
/// from many tasks concurrently.
pub trait HopStore: Send + Sync {
    /// Landmark trajectory for one hop, one frame per kinematic sample.
    ///
    /// # Errors
    /// `MissingInput` when the table does not exist, `TableParse` when
    /// it exists but is malformed.
    fn landmarks(&self, id: &HopId) -> Result<Vec<LandmarkFrame>, ContractError>;

    /// Force-plate trace for one hop, one frame per force sample.
    fn force(&self, id: &HopId) -> Result<Vec<ForceFrame>, ContractError>;

    /// Event timestamps for one hop.
    ///
    /// # Errors
    /// `TimingNotFound` when the subject's timing table has no row for
    /// this hop number.
    fn timing(&self, id: &HopId) -> Result<EventTiming, ContractError>;

    /// Sight label from the landing-phase metadata record matching this
    /// hop. `None` when no record matches; the pipeline maps that to
    /// `SightLabel::Unknown` rather than failing.
    fn sight_label(&self, id: &HopId) -> Option<SightLabel>;
}
