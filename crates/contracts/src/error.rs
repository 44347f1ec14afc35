//! Layered error definitions
//!
//! Categorized by source: config / input tables / sink
//!
//! Degenerate geometry, an undetected contact, and an empty aligned
//! window are NOT errors; each is absorbed with a documented fallback
//! so a batch of many hops can complete even when individual hops are
//! malformed. Only missing or unparseable input propagates.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Input Errors =====
    /// A required raw table for a hop cannot be located
    #[error("missing input for {subject} hop {hop}: {what}")]
    MissingInput {
        subject: String,
        hop: u32,
        what: String,
    },

    /// A raw table exists but cannot be parsed
    #[error("table parse error in '{path}': {message}")]
    TableParse { path: String, message: String },

    /// No timing record exists for the requested hop
    #[error("no timing record for {subject} hop {hop}")]
    TimingNotFound { subject: String, hop: u32 },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create missing input error
    pub fn missing_input(subject: impl Into<String>, hop: u32, what: impl Into<String>) -> Self {
        Self::MissingInput {
            subject: subject.into(),
            hop,
            what: what.into(),
        }
    }

    /// Create table parse error
    pub fn table_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TableParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
