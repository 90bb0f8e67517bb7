//! `hexir-bus` – in-process, topic-routed sensor sample bus.
//!
//! Transport bindings (serial readers, simulators, replay tools) publish
//! [`Event`]s here; the node's ingestion task subscribes and applies them
//! to the sensor hub. Built on [`tokio::sync::broadcast`] so every
//! subscriber receives every message without any single subscriber
//! blocking the others.
//!
//! # Topics
//!
//! | Topic | Traffic |
//! |---|---|
//! | [`Topic::Proximity`] | Six IR distance channels, highest frequency |
//! | [`Topic::Odometry`] | Pose + twist snapshots |
//! | [`Topic::Inertial`] | Magnetometer / gyroscope / accelerometer vectors |
//! | [`Topic::Encoders`] | Four wheel tick counters |
//! | [`Topic::Alerts`] | Obstacle-detected events from the control loop |

use hexir_types::{Event, HexirError};
use tokio::sync::broadcast;
use tracing::warn;

/// Buffered events per topic before old ones are dropped for slow
/// subscribers.
const DEFAULT_CAPACITY: usize = 256;

/// First-class routing lanes on the sample bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// IR distance readings, one event per channel delivery.
    Proximity,
    /// Full odometry snapshots.
    Odometry,
    /// Magnetometer, gyroscope, and accelerometer vectors.
    Inertial,
    /// Wheel encoder tick counters.
    Encoders,
    /// Obstacle-detected diagnostics from the control loop.
    Alerts,
}

/// Shared sample bus. Clone it cheaply – all clones share the same
/// underlying broadcast channels.
#[derive(Clone, Debug)]
pub struct SampleBus {
    proximity: broadcast::Sender<Event>,
    odometry: broadcast::Sender<Event>,
    inertial: broadcast::Sender<Event>,
    encoders: broadcast::Sender<Event>,
    alerts: broadcast::Sender<Event>,
}

impl SampleBus {
    /// Create a bus; `capacity` applies to every topic channel
    /// independently.
    pub fn new(capacity: usize) -> Self {
        let (proximity, _) = broadcast::channel(capacity);
        let (odometry, _) = broadcast::channel(capacity);
        let (inertial, _) = broadcast::channel(capacity);
        let (encoders, _) = broadcast::channel(capacity);
        let (alerts, _) = broadcast::channel(capacity);
        Self {
            proximity,
            odometry,
            inertial,
            encoders,
            alerts,
        }
    }

    /// Publish `event` on the given [`Topic`] lane.
    ///
    /// Returns the number of active receivers handed the event, or
    /// [`HexirError::Channel`] when nobody is listening on the topic.
    pub fn publish_to(&self, topic: Topic, event: Event) -> Result<usize, HexirError> {
        self.topic_sender(topic)
            .send(event)
            .map_err(|_| HexirError::Channel(format!("no subscribers for topic {topic:?}")))
    }

    /// Subscribe to a single [`Topic`] lane.
    pub fn subscribe_to(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            receiver: self.topic_sender(topic).subscribe(),
        }
    }

    fn topic_sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Proximity => &self.proximity,
            Topic::Odometry => &self.odometry,
            Topic::Inertial => &self.inertial,
            Topic::Encoders => &self.encoders,
            Topic::Alerts => &self.alerts,
        }
    }
}

impl Default for SampleBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// An async receiver bound to a single [`Topic`] lane.
pub struct TopicReceiver {
    topic: Topic,
    receiver: broadcast::Receiver<Event>,
}

impl TopicReceiver {
    /// Wait for the next event on this topic.
    ///
    /// Returns `Err(RecvError::Lagged(n))` when the subscriber fell behind
    /// and `n` events were dropped, and `Err(RecvError::Closed)` when the
    /// bus has shut down.
    pub async fn recv(&mut self) -> Result<Event, broadcast::error::RecvError> {
        self.receiver.recv().await
    }

    /// Like [`recv`](Self::recv), but logs and skips over lag instead of
    /// surfacing it. Returns `None` when the bus has shut down.
    pub async fn recv_skip_lag(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(topic = ?self.topic, lagged_by = n, "sample bus subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// The [`Topic`] this receiver is bound to.
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexir_types::{IrChannel, SamplePayload};

    fn proximity_event(channel: IrChannel, distance: f64) -> Event {
        Event::now(
            "hexir-bus::test",
            SamplePayload::Proximity { channel, distance },
        )
    }

    #[tokio::test]
    async fn publish_and_receive_on_topic() -> Result<(), Box<dyn std::error::Error>> {
        let bus = SampleBus::default();
        let mut rx = bus.subscribe_to(Topic::Proximity);

        let event = proximity_event(IrChannel::Center, 7.0);
        bus.publish_to(Topic::Proximity, event.clone())?;

        let received = rx.recv().await?;
        assert_eq!(received.id, event.id);
        Ok(())
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() -> Result<(), Box<dyn std::error::Error>> {
        let bus = SampleBus::default();
        let mut rx1 = bus.subscribe_to(Topic::Encoders);
        let mut rx2 = bus.subscribe_to(Topic::Encoders);

        let event = Event::now(
            "hexir-bus::test",
            SamplePayload::Encoder {
                wheel: hexir_types::EncoderWheel::FrontLeft,
                ticks: 9,
            },
        );
        bus.publish_to(Topic::Encoders, event.clone())?;

        assert_eq!(rx1.recv().await?.id, event.id);
        assert_eq!(rx2.recv().await?.id, event.id);
        Ok(())
    }

    #[tokio::test]
    async fn topics_are_isolated() -> Result<(), Box<dyn std::error::Error>> {
        let bus = SampleBus::default();
        let mut alerts = bus.subscribe_to(Topic::Alerts);
        let _proximity = bus.subscribe_to(Topic::Proximity);

        bus.publish_to(Topic::Proximity, proximity_event(IrChannel::Left, 3.0))?;

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            alerts.recv(),
        )
        .await;
        assert!(result.is_err(), "Alerts subscriber must not see Proximity traffic");
        Ok(())
    }

    #[test]
    fn publish_without_subscribers_is_an_error() {
        let bus = SampleBus::default();
        let result = bus.publish_to(Topic::Odometry, proximity_event(IrChannel::Back, 1.0));
        assert!(matches!(result, Err(HexirError::Channel(_))));
    }

    #[tokio::test]
    async fn slow_subscriber_observes_lag() {
        let bus = SampleBus::new(64);
        let mut slow = bus.subscribe_to(Topic::Proximity);

        for i in 0..10_000 {
            let _ = bus.publish_to(
                Topic::Proximity,
                proximity_event(IrChannel::Center, i as f64),
            );
        }

        let result = slow.recv().await;
        assert!(
            matches!(result, Err(broadcast::error::RecvError::Lagged(_))),
            "expected Lagged, got {result:?}"
        );
    }

    #[tokio::test]
    async fn recv_skip_lag_recovers_and_yields_events() {
        let bus = SampleBus::new(64);
        let mut slow = bus.subscribe_to(Topic::Proximity);

        for i in 0..1_000 {
            let _ = bus.publish_to(
                Topic::Proximity,
                proximity_event(IrChannel::Center, i as f64),
            );
        }

        // Lag is swallowed; the next buffered event comes through.
        let event = slow.recv_skip_lag().await.expect("bus still open");
        assert!(matches!(event.payload, SamplePayload::Proximity { .. }));
    }
}
