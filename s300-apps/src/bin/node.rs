use std::{io, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use s300::{AnchoredTimeSync, DummyDeviceLink, TickOutcome};
use s300_apps::{
    utils::{get_apps_config_path, init_tracing, resolve_node_config},
    JsonLinesSink, Node, NodeConfig,
};
use s300_tracing::Tracing;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Acquires laser scans and writes them, with the sensor pose, as JSON lines.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct NodeArgs {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
    /// Writes JSON trace logs of every device, sync and publish call to this directory.
    #[clap(long, value_parser)]
    trace_log_dir: Option<PathBuf>,
    /// Writes scans to this file instead of stdout.
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
    /// Stops after this many ticks.
    #[clap(long)]
    max_ticks: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = NodeArgs::parse();
    let _guard = init_tracing(args.trace_log_dir.as_deref());
    debug!(?args);

    if args.show_default_config {
        print!("{}", toml::to_string(&NodeConfig::default())?);
        return Ok(());
    }

    let config_path = get_apps_config_path(args.config_path);
    let config = resolve_node_config(config_path.as_deref())?;
    info!(
        "Starting {} at {} Hz (frame {})",
        config.device_name, config.rate, config.frame_id
    );

    let writer: Box<dyn io::Write + Send> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(fs_err::File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let sink = Arc::new(JsonLinesSink::new(writer));
    let mut node = Node::new(
        &config,
        Tracing::new(DummyDeviceLink::new()),
        Tracing::new(AnchoredTimeSync::new(&config.time_sync)),
        Tracing::new(sink.clone()),
        Tracing::new(sink),
    );

    let mut interval = tokio::time::interval(config.period());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks = 0;
    loop {
        if args.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
        if node.tick() != TickOutcome::Published {
            debug!(ticks, "tick dropped");
        }
        ticks += 1;
    }

    let stats = node.acquisition().stats();
    info!(
        "Stopped after {} ticks: {} published, {} read failures, {} publish failures, {} connect attempts",
        ticks, stats.published, stats.read_failures, stats.publish_failures, stats.connect_attempts
    );
    Ok(())
}
