//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Event timestamps come from the recording rig in milliseconds (f64)
//! - Each series has a fixed sampling interval in seconds (see `SamplingGrid`);
//!   timestamps convert to frame indices through that interval

mod blueprint;
mod error;
mod frames;
mod grid;
mod hop;
mod sink;
mod store;
mod subject_id;
mod timing;

pub use blueprint::*;
pub use error::*;
pub use frames::*;
pub use grid::*;
pub use hop::*;
pub use sink::HopSink;
pub use store::HopStore;
pub use subject_id::SubjectId;
pub use timing::EventTiming;
