//! `run` command implementation.

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .map_err(|e| CliError::config_parse(format!("{}: {e}", args.config.display())))?;

    // Apply CLI overrides
    if let Some(ref root) = args.data_root {
        info!(root = %root, "Overriding data root from CLI");
        blueprint.data.root = root.clone();
    }

    let hop_count = blueprint.hop_ids().len();
    info!(
        root = %blueprint.data.root,
        subjects = blueprint.subjects.len(),
        hops = hop_count,
        sinks = blueprint.sinks.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        jobs: args.jobs,
        buffer_size: args.buffer_size,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting pipeline...");

    // Run pipeline with shutdown signal
    tokio::select! {
        result = pipeline.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        hops_processed = stats.hops_processed,
                        hops_failed = stats.hops_failed,
                        duration_secs = stats.duration.as_secs_f64(),
                        "Pipeline completed successfully"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(CliError::pipeline_execution(format!("{e:#}")).into());
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping pipeline...");
        }
    }

    info!("Hop Align finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::PipelineBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Data:");
    println!("  Root: {}", blueprint.data.root);

    println!("\nGrid:");
    println!(
        "  Kinematic interval: {} s (stride {})",
        blueprint.grid.kinematic_interval_s,
        blueprint.grid.kinematic_stride()
    );
    println!(
        "  Force interval: {} s (stride {})",
        blueprint.grid.force_interval_s,
        blueprint.grid.force_stride()
    );
    println!("  Aligned interval: {} s", blueprint.grid.aligned_interval_s);

    println!("\nContact:");
    println!("  Lookahead: {} samples", blueprint.contact.lookahead);
    println!("  Rise threshold: {}", blueprint.contact.rise_threshold);

    println!("\nSubjects ({}):", blueprint.subjects.len());
    for subject in &blueprint.subjects {
        println!("  - {} - {} hops", subject.name, subject.hops.len());
    }

    if !blueprint.sinks.is_empty() {
        println!("\nSinks ({}):", blueprint.sinks.len());
        for sink in &blueprint.sinks {
            println!("  - {} ({:?})", sink.name, sink.sink_type);
        }
    }

    println!();
}
