//! `hexir-node` – the runnable decision core.
//!
//! Wires the pieces together and runs them until Ctrl-C:
//!
//! 1. Loads `hexir.toml` (missing file → documented defaults).
//! 2. Initialises structured logging from `RUST_LOG`
//!    (`HEXIR_LOG_FORMAT=json` switches to newline-delimited JSON).
//! 3. Spawns the ingestion task (sample bus → sensor hub), the control
//!    loop (hub → avoidance policy → drive sink), and a headless sensor
//!    simulator standing in for the hardware transport.

mod config;
mod control;
mod ingest;
mod sim_feed;

use std::env;
use std::sync::Arc;

use tracing::info;

use hexir_bus::SampleBus;
use hexir_hal::{DiffDriveSink, SimWheel, VelocitySink};
use hexir_nav::AvoidancePolicy;
use hexir_sense::SensorHub;
use hexir_types::HexirError;

use crate::config::NodeConfig;

/// Parse the config path from the command line.
///
/// Supports `hexir <path>`, `hexir --config <path>`, and `hexir -c <path>`;
/// defaults to `/etc/hexir.toml`.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/hexir.toml".to_string()
}

fn init_logging() {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if env::var("HEXIR_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), HexirError> {
    init_logging();

    let config_path = parse_config_path();
    info!(path = %config_path, "loading configuration");
    let config = NodeConfig::load(&config_path)?;
    info!(?config, "configuration in force");

    let hub = Arc::new(SensorHub::new());
    let bus = SampleBus::default();
    let policy = AvoidancePolicy::new(config.profile, config.avoidance.mode);
    let sink: Box<dyn VelocitySink> = Box::new(DiffDriveSink::new(
        config.drive.track_width,
        SimWheel::new("left_wheel"),
        SimWheel::new("right_wheel"),
    ));

    let ingest_task = tokio::spawn(ingest::run(hub.clone(), bus.clone()));
    let feed_task = tokio::spawn(sim_feed::run(bus.clone(), config.control.tick_ms));
    let control_task = tokio::spawn(control::run(
        hub,
        bus,
        policy,
        sink,
        config.avoidance.range_to_avoid,
        config.control.tick_ms,
    ));

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| HexirError::Channel(format!("ctrl-c handler failed: {e}")))?;
    info!("ctrl-c received, shutting down");

    control_task.abort();
    feed_task.abort();
    ingest_task.abort();
    Ok(())
}
