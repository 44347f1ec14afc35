//! Per-hop orchestration.
//!
//! Composes geometry, contact detection, alignment and normalization
//! into one pure pass over one hop's raw tables. Cross-hop state never
//! exists; batch fan-out lives in `batch`.

use std::sync::Arc;

use contracts::{
    AngleFrame, ContactConfig, ContractError, HopId, HopMeta, HopStore, ProcessedHop,
    SamplingGrid,
};
use tracing::{debug, instrument, warn};

use crate::{align, compute_angles, find_contact_index, normalize};

/// The per-event processing pipeline.
///
/// Holds the read-side store and the two rig-level configs; all per-hop
/// state is local to one `process` call, so one pipeline instance can
/// serve many concurrent batch tasks.
pub struct HopPipeline<S> {
    store: Arc<S>,
    grid: SamplingGrid,
    contact: ContactConfig,
}

impl<S: HopStore> HopPipeline<S> {
    pub fn new(store: Arc<S>, grid: SamplingGrid, contact: ContactConfig) -> Self {
        Self {
            store,
            grid,
            contact,
        }
    }

    /// Process one hop end to end.
    ///
    /// Only missing or malformed input propagates as `Err`. Degenerate
    /// geometry, an undetected contact and an empty aligned window all
    /// resolve to their documented fallbacks so a batch can finish.
    #[instrument(skip(self), fields(hop = %id))]
    pub fn process(&self, id: &HopId) -> Result<ProcessedHop, ContractError> {
        let landmarks = self.store.landmarks(id)?;
        let force = self.store.force(id)?;
        let timing = self.store.timing(id)?;
        let sight = self.store.sight_label(id).unwrap_or_default();

        let angles: Vec<AngleFrame> = landmarks.iter().map(compute_angles).collect();

        let normal: Vec<f64> = force.iter().map(|f| f.normal).collect();
        let contact_index = find_contact_index(&normal, &self.contact);
        if contact_index.is_none() {
            warn!(%id, "no sustained force rise, aligning from force start");
        }

        let mut window = align(&angles, &force, &timing, contact_index, &self.grid);
        normalize(&mut window);

        debug!(
            %id,
            rows = window.len(),
            dropped = window.dropped_rows,
            contact = ?contact_index,
            "hop processed"
        );

        let meta = HopMeta {
            contact_index,
            kinematic_window_frames: window.kinematic_window_frames,
            dropped_rows: window.dropped_rows,
            aligned_rows: window.len(),
        };
        observability::record_hop_metrics(&meta);

        Ok(ProcessedHop {
            id: id.clone(),
            sight,
            rows: window.rows,
            meta,
        })
    }
}
