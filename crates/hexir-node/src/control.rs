//! Control-loop task: one avoidance cycle per tick.
//!
//! Each cycle pulls a fresh proximity snapshot from the hub, runs the
//! avoidance policy against the nominal cruise command, and hands the
//! result to the drive sink. When avoidance fires, an alert event goes out
//! on the bus for any observer (dashboard, logger, replay capture).

use std::sync::Arc;

use hexir_bus::{SampleBus, Topic};
use hexir_hal::VelocitySink;
use hexir_nav::{AvoidancePolicy, any_obstacle_near};
use hexir_sense::SensorHub;
use hexir_types::{Event, SamplePayload, VelocityCommand};
use tracing::{debug, error, info, trace};

/// Run the control loop until the task is aborted.
pub async fn run(
    hub: Arc<SensorHub>,
    bus: SampleBus,
    mut policy: AvoidancePolicy,
    mut sink: Box<dyn VelocitySink>,
    range_to_avoid: f64,
    tick_ms: u64,
) {
    let mut interval = tokio::time::interval(std::time::Duration::from_millis(tick_ms));
    info!(tick_ms, range_to_avoid, mode = ?policy.mode(), "control loop started");

    loop {
        interval.tick().await;

        let bank = hub.proximity();
        if any_obstacle_near(&bank, range_to_avoid) {
            debug!("multiple proximity channels below threshold");
        }

        let nominal = VelocityCommand::new(policy.default_linear(), 0.0);
        let outcome = policy.apply(&bank, nominal, range_to_avoid);

        if let Err(e) = sink.drive(outcome.command) {
            error!(sink = sink.id(), error = %e, "drive sink rejected command");
        }

        if outcome.triggered {
            let event = Event::now(
                "hexir-node::control",
                SamplePayload::ObstacleDetected {
                    command: outcome.command,
                },
            );
            // Nobody listening on Alerts is a normal condition.
            if let Err(e) = bus.publish_to(Topic::Alerts, event) {
                trace!(error = %e, "alert not delivered");
            }
        }
    }
}
