//! `hexir-sense` – live sensor snapshot for the decision core.
//!
//! [`SensorHub`] owns the current value of every sensor channel: the six
//! IR proximity readings, the most recent odometry sample, the three
//! inertial vectors, and the four wheel-encoder counters. Deliveries arrive
//! asynchronously and are applied most-recent-wins; the avoidance logic
//! pulls copies on demand.
//!
//! Each channel group sits behind its own lock so a reader never observes
//! a half-written group (e.g. a partially overwritten odometry pose), while
//! updates to different groups proceed independently.
//!
//! No validation is performed on input magnitudes: out-of-range or NaN
//! values are accepted and propagate. Correctness depends on well-formed
//! upstream input.
//!
//! # Example
//!
//! ```rust
//! use hexir_sense::SensorHub;
//! use hexir_types::IrChannel;
//!
//! let hub = SensorHub::new();
//! hub.update_proximity(IrChannel::Center, 8.0);
//!
//! let bank = hub.proximity();
//! assert_eq!(bank.get(IrChannel::Center), 8.0);
//! assert_eq!(bank.get(IrChannel::Back), 0.0); // untouched channels stay 0
//! ```

use std::sync::{PoisonError, RwLock};

use hexir_types::{
    EncoderBank, EncoderWheel, InertialBank, IrChannel, OdometrySample, ProximityBank, Vector3,
};
use tracing::trace;

/// Shared-mutable sensor state, one instance per robot, alive for the
/// process lifetime. All update methods take `&self` so the hub can be
/// shared behind an `Arc` between the ingestion task and the control loop.
#[derive(Debug, Default)]
pub struct SensorHub {
    proximity: RwLock<ProximityBank>,
    odometry: RwLock<OdometrySample>,
    inertial: RwLock<InertialBank>,
    encoders: RwLock<EncoderBank>,
}

impl SensorHub {
    /// Create a hub with every channel zeroed, matching the state before
    /// any delivery has arrived.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Updates (one per channel group, total and idempotent) ────────────

    /// Overwrite the reading for a single proximity channel.
    pub fn update_proximity(&self, channel: IrChannel, distance: f64) {
        trace!(?channel, distance, "proximity update");
        lock_write(&self.proximity).set(channel, distance);
    }

    /// Overwrite the entire odometry snapshot in one atomic step.
    pub fn update_odometry(&self, sample: OdometrySample) {
        trace!(x = sample.position.x, y = sample.position.y, "odometry update");
        *lock_write(&self.odometry) = sample;
    }

    /// Overwrite the magnetometer vector.
    pub fn update_magnetometer(&self, v: Vector3) {
        lock_write(&self.inertial).magnetometer = v;
    }

    /// Overwrite the gyroscope vector.
    pub fn update_gyroscope(&self, v: Vector3) {
        lock_write(&self.inertial).gyroscope = v;
    }

    /// Overwrite the accelerometer vector.
    pub fn update_accelerometer(&self, v: Vector3) {
        lock_write(&self.inertial).accelerometer = v;
    }

    /// Overwrite the tick counter for a single wheel encoder.
    pub fn update_encoder(&self, wheel: EncoderWheel, ticks: i32) {
        trace!(?wheel, ticks, "encoder update");
        lock_write(&self.encoders).set(wheel, ticks);
    }

    // ── Snapshots (copy-out, group-atomic) ───────────────────────────────

    /// Copy of the current proximity bank.
    pub fn proximity(&self) -> ProximityBank {
        *lock_read(&self.proximity)
    }

    /// Copy of the most recent odometry sample.
    pub fn odometry(&self) -> OdometrySample {
        *lock_read(&self.odometry)
    }

    /// Copy of the current inertial bank.
    pub fn inertial(&self) -> InertialBank {
        *lock_read(&self.inertial)
    }

    /// Copy of the current encoder bank.
    pub fn encoders(&self) -> EncoderBank {
        *lock_read(&self.encoders)
    }
}

// Updates must stay total even if a writer panicked mid-hold; recover the
// guard instead of propagating the poison.
fn lock_write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock_read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}
