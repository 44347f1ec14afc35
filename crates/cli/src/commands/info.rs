//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    data: DataInfo,
    grid: GridInfo,
    contact: ContactInfo,
    subjects: Vec<SubjectInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
    total_hops: usize,
}

#[derive(Serialize)]
struct DataInfo {
    root: String,
}

#[derive(Serialize)]
struct GridInfo {
    kinematic_interval_s: f64,
    force_interval_s: f64,
    aligned_interval_s: f64,
    kinematic_stride: usize,
    force_stride: usize,
}

#[derive(Serialize)]
struct ContactInfo {
    lookahead: usize,
    rise_threshold: f64,
}

#[derive(Serialize)]
struct SubjectInfo {
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hops: Vec<u32>,
    hop_count: usize,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
    queue_capacity: usize,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::PipelineBlueprint, args: &InfoArgs) -> ConfigInfo {
    let subjects = blueprint
        .subjects
        .iter()
        .map(|s| SubjectInfo {
            name: s.name.clone(),
            hops: if args.subjects { s.hops.clone() } else { Vec::new() },
            hop_count: s.hops.len(),
        })
        .collect();

    let sinks = if args.sinks {
        blueprint
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
                queue_capacity: s.queue_capacity,
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        data: DataInfo {
            root: blueprint.data.root.clone(),
        },
        grid: GridInfo {
            kinematic_interval_s: blueprint.grid.kinematic_interval_s,
            force_interval_s: blueprint.grid.force_interval_s,
            aligned_interval_s: blueprint.grid.aligned_interval_s,
            kinematic_stride: blueprint.grid.kinematic_stride(),
            force_stride: blueprint.grid.force_stride(),
        },
        contact: ContactInfo {
            lookahead: blueprint.contact.lookahead,
            rise_threshold: blueprint.contact.rise_threshold,
        },
        subjects,
        sinks,
        total_hops: blueprint.hop_ids().len(),
    }
}

fn print_config_info(blueprint: &contracts::PipelineBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                Hop Align Configuration                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Data source
    println!("📍 Data");
    println!("   └─ Root: {}", blueprint.data.root);

    // Sampling grid
    println!("\n⏱️  Sampling Grid");
    println!(
        "   ├─ Kinematic: {} s (stride {})",
        blueprint.grid.kinematic_interval_s,
        blueprint.grid.kinematic_stride()
    );
    println!(
        "   ├─ Force: {} s (stride {})",
        blueprint.grid.force_interval_s,
        blueprint.grid.force_stride()
    );
    println!("   └─ Aligned: {} s", blueprint.grid.aligned_interval_s);

    // Contact detector
    println!("\n⚙️  Contact Detector");
    println!("   ├─ Lookahead: {} samples", blueprint.contact.lookahead);
    println!("   └─ Rise threshold: {}", blueprint.contact.rise_threshold);

    // Subjects
    println!("\n🏃 Subjects ({})", blueprint.subjects.len());
    for (i, subject) in blueprint.subjects.iter().enumerate() {
        let is_last = i == blueprint.subjects.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };

        if args.subjects {
            println!(
                "   {} {} - hops {:?}",
                prefix, subject.name, subject.hops
            );
        } else {
            println!(
                "   {} {} - {} hops",
                prefix,
                subject.name,
                subject.hops.len()
            );
        }
    }

    // Sinks
    if !blueprint.sinks.is_empty() {
        println!("\n📤 Sinks ({})", blueprint.sinks.len());
        for (i, sink) in blueprint.sinks.iter().enumerate() {
            let is_last = i == blueprint.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            if args.sinks {
                println!(
                    "   {} {} ({:?}, queue {})",
                    prefix, sink.name, sink.sink_type, sink.queue_capacity
                );
            } else {
                println!("   {} {} ({:?})", prefix, sink.name, sink.sink_type);
            }
        }
    }

    println!("\n   Total hops: {}\n", blueprint.hop_ids().len());
}
