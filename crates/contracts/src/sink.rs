//! HopSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use crate::{ContractError, ProcessedHop};

/// Processed-hop output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(HopSink: Send)]
pub trait LocalHopSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one processed hop
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, hop: &ProcessedHop) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
