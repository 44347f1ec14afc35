//! # Hop Engine
//!
//! Per-event processing core.
//!
//! Responsible for:
//! - Joint angles from landmark triangles (geometry)
//! - Ground contact detection on the normal force channel (contact)
//! - Multi-rate alignment onto the common sampling grid (align)
//! - Per-event z-score normalization (normalize)
//! - Orchestration per hop and batch fan-out (pipeline, batch)
//!
//! ## Usage
//!
//! ```ignore
//! use hop_engine::HopPipeline;
//!
//! let pipeline = HopPipeline::new(store, grid, contact_config);
//! let processed = pipeline.process(&id)?;
//! ```

mod align;
mod batch;
mod contact;
mod geometry;
mod normalize;
mod pipeline;

pub use align::{align, AlignedWindow};
pub use batch::{process_batch, BatchOutcome, BatchStats};
pub use contact::find_contact_index;
pub use geometry::compute_angles;
pub use normalize::normalize;
pub use pipeline::HopPipeline;

// Re-export contracts types
pub use contracts::{AngleFrame, ContactConfig, HopId, ProcessedHop, SamplingGrid};
