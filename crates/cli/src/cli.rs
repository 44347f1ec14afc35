//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Hop Align - joint-angle and force-plate alignment pipeline
#[derive(Parser, Debug)]
#[command(
    name = "hop-align",
    author,
    version,
    about = "Hop recording alignment pipeline",
    long_about = "Processes single-leg hop recordings from a motion-capture archive.\n\n\
                  Computes joint angles from 3D landmarks, detects force-plate \n\
                  contact, aligns both streams onto a shared output grid, \n\
                  normalizes each event, and dispatches to configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "HOP_ALIGN_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "HOP_ALIGN_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the alignment pipeline over the configured hops
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "HOP_ALIGN_CONFIG")]
    pub config: PathBuf,

    /// Override the archive data root from configuration
    #[arg(long, env = "HOP_ALIGN_DATA_ROOT")]
    pub data_root: Option<String>,

    /// Maximum number of hops processed concurrently
    #[arg(short, long, default_value = "4", env = "HOP_ALIGN_JOBS")]
    pub jobs: usize,

    /// Validate configuration and exit without running pipeline
    #[arg(long)]
    pub dry_run: bool,

    /// Channel buffer size for the dispatcher queue
    #[arg(long, default_value = "100", env = "HOP_ALIGN_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "HOP_ALIGN_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show per-subject hop lists
    #[arg(long)]
    pub subjects: bool,

    /// Show sink configuration
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_maps_to_observability() {
        assert!(matches!(
            observability::LogFormat::from(LogFormat::Json),
            observability::LogFormat::Json
        ));
        assert!(matches!(
            observability::LogFormat::from(LogFormat::Compact),
            observability::LogFormat::Compact
        ));
    }
}
