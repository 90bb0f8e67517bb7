//! Ingestion task: drains the sample bus into the sensor hub.

use std::sync::Arc;

use hexir_bus::{SampleBus, Topic};
use hexir_sense::SensorHub;
use hexir_types::SamplePayload;
use tracing::{debug, info};

/// Apply one bus payload to the hub. Alert payloads are control-loop
/// output, not sensor input, and are ignored here.
pub fn apply_sample(hub: &SensorHub, payload: SamplePayload) {
    match payload {
        SamplePayload::Proximity { channel, distance } => hub.update_proximity(channel, distance),
        SamplePayload::Odometry(sample) => hub.update_odometry(sample),
        SamplePayload::Magnetometer(v) => hub.update_magnetometer(v),
        SamplePayload::Gyroscope(v) => hub.update_gyroscope(v),
        SamplePayload::Accelerometer(v) => hub.update_accelerometer(v),
        SamplePayload::Encoder { wheel, ticks } => hub.update_encoder(wheel, ticks),
        SamplePayload::ObstacleDetected { command } => {
            debug!(?command, "alert payload on sensor path, ignoring");
        }
    }
}

/// Subscribe to every sensor topic and apply deliveries most-recent-wins
/// until the bus shuts down. Lag on any lane is logged and skipped; a
/// dropped sample is stale by definition.
pub async fn run(hub: Arc<SensorHub>, bus: SampleBus) {
    let mut proximity = bus.subscribe_to(Topic::Proximity);
    let mut odometry = bus.subscribe_to(Topic::Odometry);
    let mut inertial = bus.subscribe_to(Topic::Inertial);
    let mut encoders = bus.subscribe_to(Topic::Encoders);

    info!("ingestion task started");
    loop {
        let event = tokio::select! {
            e = proximity.recv_skip_lag() => e,
            e = odometry.recv_skip_lag() => e,
            e = inertial.recv_skip_lag() => e,
            e = encoders.recv_skip_lag() => e,
        };
        match event {
            Some(event) => apply_sample(&hub, event.payload),
            None => {
                info!("sample bus closed, ingestion task exiting");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexir_types::{EncoderWheel, IrChannel, OdometrySample, Vector3};

    #[test]
    fn proximity_sample_lands_in_hub() {
        let hub = SensorHub::new();
        apply_sample(
            &hub,
            SamplePayload::Proximity {
                channel: IrChannel::CLeft,
                distance: 14.0,
            },
        );
        assert_eq!(hub.proximity().get(IrChannel::CLeft), 14.0);
    }

    #[test]
    fn each_payload_targets_its_own_group() {
        let hub = SensorHub::new();
        apply_sample(&hub, SamplePayload::Gyroscope(Vector3::new(0.0, 0.0, 0.3)));
        apply_sample(
            &hub,
            SamplePayload::Encoder {
                wheel: EncoderWheel::BackRight,
                ticks: 77,
            },
        );
        apply_sample(
            &hub,
            SamplePayload::Odometry(OdometrySample {
                position: Vector3::new(2.0, 1.0, 0.0),
                ..OdometrySample::default()
            }),
        );

        assert_eq!(hub.inertial().gyroscope, Vector3::new(0.0, 0.0, 0.3));
        assert_eq!(hub.encoders().get(EncoderWheel::BackRight), 77);
        assert_eq!(hub.odometry().position, Vector3::new(2.0, 1.0, 0.0));
        // Proximity untouched by any of the above.
        assert_eq!(hub.proximity(), Default::default());
    }

    #[test]
    fn alert_payload_is_ignored() {
        let hub = SensorHub::new();
        apply_sample(
            &hub,
            SamplePayload::ObstacleDetected {
                command: hexir_types::VelocityCommand::new(0.0, 0.5),
            },
        );
        assert_eq!(hub.proximity(), Default::default());
        assert_eq!(hub.odometry(), Default::default());
    }

    #[tokio::test]
    async fn run_applies_published_events() {
        let hub = Arc::new(SensorHub::new());
        let bus = SampleBus::default();

        let task = tokio::spawn(run(hub.clone(), bus.clone()));
        // Give the task a moment to subscribe.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        bus.publish_to(
            Topic::Proximity,
            hexir_types::Event::now(
                "test",
                SamplePayload::Proximity {
                    channel: IrChannel::Center,
                    distance: 9.0,
                },
            ),
        )
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(hub.proximity().get(IrChannel::Center), 9.0);
        task.abort();
    }
}
