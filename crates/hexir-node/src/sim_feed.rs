//! Headless sensor simulator.
//!
//! Publishes a deterministic synthetic scene so the full node can run
//! without hardware: the center IR channel sweeps toward the robot and
//! back in a triangle wave while the side channels hold clear, odometry
//! advances along +X, and the encoders tick up.

use hexir_bus::{SampleBus, Topic};
use hexir_types::{
    EncoderWheel, Event, IrChannel, OdometrySample, SamplePayload, Vector3,
};
use tracing::info;

const SOURCE: &str = "hexir-node::sim_feed";

/// Distance of the simulated frontal obstacle at step `t` of the sweep:
/// a triangle wave between 5 and 95 sensor units with period 60.
fn center_distance(t: u64) -> f64 {
    let phase = (t % 60) as f64;
    5.0 + (phase - 30.0).abs() * 3.0
}

/// Publish one step of the synthetic scene.
fn publish_step(bus: &SampleBus, t: u64) {
    let center = center_distance(t);
    let readings = [
        (IrChannel::Center, center),
        (IrChannel::Right, 60.0),
        (IrChannel::Left, 80.0),
        (IrChannel::CRight, 70.0),
        (IrChannel::CLeft, 70.0),
        (IrChannel::Back, 90.0),
    ];
    for (channel, distance) in readings {
        let _ = bus.publish_to(
            Topic::Proximity,
            Event::now(SOURCE, SamplePayload::Proximity { channel, distance }),
        );
    }

    // Lower-rate odometry and encoder traffic.
    if t % 10 == 0 {
        let sample = OdometrySample {
            position: Vector3::new(t as f64 * 0.01, 0.0, 0.0),
            twist_linear: Vector3::new(0.5, 0.0, 0.0),
            ..OdometrySample::default()
        };
        let _ = bus.publish_to(Topic::Odometry, Event::now(SOURCE, SamplePayload::Odometry(sample)));

        for wheel in EncoderWheel::ALL {
            let _ = bus.publish_to(
                Topic::Encoders,
                Event::now(
                    SOURCE,
                    SamplePayload::Encoder {
                        wheel,
                        ticks: (t * 12) as i32,
                    },
                ),
            );
        }
    }
}

/// Run the simulator until the task is aborted.
pub async fn run(bus: SampleBus, tick_ms: u64) {
    let mut interval = tokio::time::interval(std::time::Duration::from_millis(tick_ms));
    info!(tick_ms, "sim feed started");

    let mut t: u64 = 0;
    loop {
        interval.tick().await;
        publish_step(&bus, t);
        t = t.wrapping_add(1);
    }
}
