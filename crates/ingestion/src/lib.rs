//! # Ingestion
//!
//! Data access layer for the raw recording archive.
//!
//! Responsibilities:
//! - Read the per-hop landmark and force tables from the archive
//! - Read the per-subject timing table and the phase metadata table
//! - Expose everything behind the `HopStore` trait so the pipeline
//!   never touches the filesystem directly
//!
//! Archive layout:
//!
//! ```text
//! <root>/
//!   data.csv                  phase metadata (sight labels)
//!   <subject>/
//!     time.csv                event timestamps, keyed by hop number
//!     <hop>/
//!       xyz.csv               landmark trajectory, 18 columns
//!       force.csv             force-plate trace, headerless
//! ```
//!
//! The `MockHopStore` generates synthetic hops with the same shapes
//! for tests and demos that have no archive on disk.

mod mock;
mod store;
mod tables;

pub use mock::{MockHopConfig, MockHopStore};
pub use store::CsvHopStore;
