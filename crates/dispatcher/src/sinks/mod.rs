//! Sink implementations

mod csv;
mod json;
mod log;

pub use csv::{CsvSink, CsvSinkConfig};
pub use json::{JsonSink, JsonSinkConfig};
pub use log::LogSink;

use contracts::HopId;

/// Filename stem shared by the file sinks: `<subject>_<hop>`.
pub(crate) fn file_stem(id: &HopId) -> String {
    format!("{}_{}", id.subject, id.hop)
}
