//! `hexir-types` – shared data model for the HexIR decision core.
//!
//! Every other crate in the workspace speaks these types: the six-channel
//! proximity bank, the odometry/inertial/encoder snapshots, the velocity
//! command pair handed to the drive base, and the [`Event`] wrapper routed
//! over the sample bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Channel enumerations
// ────────────────────────────────────────────────────────────────────────────

/// One of the six fixed-position IR proximity sensors on the chassis.
///
/// `CRight` / `CLeft` sit between the center sensor and the side sensors.
/// The back sensor is collected but never consulted by the avoidance logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrChannel {
    Center,
    Right,
    Left,
    CRight,
    CLeft,
    Back,
}

impl IrChannel {
    /// All six channels, in bank order.
    pub const ALL: [IrChannel; 6] = [
        IrChannel::Center,
        IrChannel::Right,
        IrChannel::Left,
        IrChannel::CRight,
        IrChannel::CLeft,
        IrChannel::Back,
    ];

    /// The five forward-facing channels. The back sensor is excluded from
    /// every avoidance decision.
    pub const FORWARD: [IrChannel; 5] = [
        IrChannel::Center,
        IrChannel::Right,
        IrChannel::Left,
        IrChannel::CRight,
        IrChannel::CLeft,
    ];

    /// Position of this channel in a [`ProximityBank`].
    pub fn index(self) -> usize {
        match self {
            IrChannel::Center => 0,
            IrChannel::Right => 1,
            IrChannel::Left => 2,
            IrChannel::CRight => 3,
            IrChannel::CLeft => 4,
            IrChannel::Back => 5,
        }
    }
}

/// One of the four wheel encoders, one per H-bridge output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncoderWheel {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl EncoderWheel {
    /// All four wheels, in bank order.
    pub const ALL: [EncoderWheel; 4] = [
        EncoderWheel::FrontLeft,
        EncoderWheel::FrontRight,
        EncoderWheel::BackLeft,
        EncoderWheel::BackRight,
    ];

    /// Position of this wheel in an [`EncoderBank`].
    pub fn index(self) -> usize {
        match self {
            EncoderWheel::FrontLeft => 0,
            EncoderWheel::FrontRight => 1,
            EncoderWheel::BackLeft => 2,
            EncoderWheel::BackRight => 3,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Geometric primitives
// ────────────────────────────────────────────────────────────────────────────

/// A plain 3-vector (metres, m/s, rad/s, µT … depending on the channel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Orientation quaternion as delivered by the odometry source.
///
/// Defaults to all zeros, matching the pre-first-delivery state of the rest
/// of the sensor model (not the identity rotation).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Sensor banks
// ────────────────────────────────────────────────────────────────────────────

/// Current value of all six proximity channels (sensor units; smaller means
/// closer). Most-recent-wins per channel, no history; every channel reads
/// `0.0` until its first delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityBank {
    readings: [f64; 6],
}

impl ProximityBank {
    /// Current distance reading for `channel`.
    pub fn get(&self, channel: IrChannel) -> f64 {
        self.readings[channel.index()]
    }

    /// Replace the reading for `channel`, leaving all others untouched.
    pub fn set(&mut self, channel: IrChannel, distance: f64) {
        self.readings[channel.index()] = distance;
    }
}

/// Most recent magnetometer, gyroscope, and accelerometer samples. No
/// fusion is performed here; each vector is overwritten independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InertialBank {
    pub magnetometer: Vector3,
    pub gyroscope: Vector3,
    pub accelerometer: Vector3,
}

/// Raw tick counters for the four wheel encoders. No delta or velocity
/// derivation happens in this core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EncoderBank {
    ticks: [i32; 4],
}

impl EncoderBank {
    /// Current tick count for `wheel`.
    pub fn get(&self, wheel: EncoderWheel) -> i32 {
        self.ticks[wheel.index()]
    }

    /// Replace the tick count for `wheel`, leaving all others untouched.
    pub fn set(&mut self, wheel: EncoderWheel, ticks: i32) {
        self.ticks[wheel.index()] = ticks;
    }
}

/// A single most-recent odometry snapshot, fully overwritten per delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OdometrySample {
    pub position: Vector3,
    pub orientation: Quaternion,
    pub twist_linear: Vector3,
    pub twist_angular: Vector3,
}

// ────────────────────────────────────────────────────────────────────────────
// Velocity types
// ────────────────────────────────────────────────────────────────────────────

/// The (linear, angular) pair the robot will execute this cycle.
///
/// Sign convention: negative angular turns left, positive turns right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    pub linear: f64,
    pub angular: f64,
}

impl VelocityCommand {
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }
}

fn default_velocity() -> f64 {
    0.5
}

/// The four configurable velocity magnitudes. Signs are assigned by the
/// avoidance policy, never stored here. Each field falls back to `0.5`
/// when unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityProfile {
    #[serde(default = "default_velocity")]
    pub default_linear: f64,
    #[serde(default = "default_velocity")]
    pub default_angular: f64,
    #[serde(default = "default_velocity")]
    pub obstacle_linear: f64,
    #[serde(default = "default_velocity")]
    pub obstacle_angular: f64,
}

impl Default for VelocityProfile {
    fn default() -> Self {
        Self {
            default_linear: default_velocity(),
            default_angular: default_velocity(),
            obstacle_linear: default_velocity(),
            obstacle_angular: default_velocity(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bus events
// ────────────────────────────────────────────────────────────────────────────

/// Payloads routed over the sample bus: one variant per sensor channel
/// group, plus the obstacle alert emitted by the control loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SamplePayload {
    Proximity { channel: IrChannel, distance: f64 },
    Odometry(OdometrySample),
    Magnetometer(Vector3),
    Gyroscope(Vector3),
    Accelerometer(Vector3),
    Encoder { wheel: EncoderWheel, ticks: i32 },
    /// Avoidance fired; carries the corrected command for observers.
    ObstacleDetected { command: VelocityCommand },
}

/// Unified wrapper for everything published on the sample bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g. `"hexir-node::sim_feed"`
    pub source: String,
    pub payload: SamplePayload,
}

impl Event {
    /// Wrap `payload` with a fresh id and the current timestamp.
    pub fn now(source: impl Into<String>, payload: SamplePayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Global error type spanning configuration, bus, and drive-base failures.
///
/// The decision core itself is infallible: sensor readings are accepted
/// unconditionally and propagate as-is. Errors only arise at the process
/// boundaries.
#[derive(Error, Debug)]
pub enum HexirError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bus channel error: {0}")]
    Channel(String),

    #[error("Hardware fault on {component}: {details}")]
    HardwareFault { component: String, details: String },
}
