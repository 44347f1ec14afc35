//! # Dispatcher
//!
//! Output fan-out module.
//!
//! Responsible for:
//! - Consuming `ProcessedHop` records
//! - Fan-out to multiple sinks
//! - Isolating slow sinks behind per-sink queues so one sink never
//!   blocks the batch

pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use contracts::{HopSink, ProcessedHop};
pub use dispatcher::{create_dispatcher, Dispatcher, DispatcherBuilder, DispatcherConfig};
pub use error::DispatcherError;
pub use handle::SinkHandle;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{CsvSink, JsonSink, LogSink};
