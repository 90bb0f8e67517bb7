//! Differential-drive decomposition sink.
//!
//! [`DiffDriveSink`] translates the policy's (linear, angular) command
//! into per-wheel speeds over a configurable track width and forwards
//! them to two [`WheelOutput`] drivers:
//!
//! Sign convention follows the decision core (negative angular turns
//! left), so a left turn slows the left wheel:
//!
//! ```text
//! left  = linear + angular · track_width / 2
//! right = linear − angular · track_width / 2
//! ```

use hexir_types::{HexirError, VelocityCommand};
use tracing::debug;

use crate::sink::VelocitySink;

/// A speed-controlled wheel driver (one physical motor channel).
pub trait WheelOutput: Send {
    /// Stable identifier, e.g. `"left_wheel"`.
    fn id(&self) -> &str;

    /// Command the wheel to run at `speed` (same units as linear velocity).
    ///
    /// # Errors
    ///
    /// Returns [`HexirError::HardwareFault`] when the motor channel
    /// rejects the command.
    fn set_speed(&mut self, speed: f64) -> Result<(), HexirError>;

    /// The most recently commanded speed.
    fn speed(&self) -> f64;
}

/// Velocity sink for a two-wheel differential drive base.
pub struct DiffDriveSink {
    id: String,
    track_width: f64,
    left: Box<dyn WheelOutput>,
    right: Box<dyn WheelOutput>,
}

impl DiffDriveSink {
    /// Build a sink around two wheel drivers spaced `track_width` apart.
    pub fn new(track_width: f64, left: Box<dyn WheelOutput>, right: Box<dyn WheelOutput>) -> Self {
        Self {
            id: "drive_base".to_string(),
            track_width,
            left,
            right,
        }
    }

    /// Most recent left wheel speed.
    pub fn left_speed(&self) -> f64 {
        self.left.speed()
    }

    /// Most recent right wheel speed.
    pub fn right_speed(&self) -> f64 {
        self.right.speed()
    }
}

impl VelocitySink for DiffDriveSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn drive(&mut self, command: VelocityCommand) -> Result<(), HexirError> {
        let half_track = self.track_width * 0.5;
        let left = command.linear + command.angular * half_track;
        let right = command.linear - command.angular * half_track;

        debug!(left, right, "diff drive decomposition");
        self.left.set_speed(left)?;
        self.right.set_speed(right)?;
        Ok(())
    }
}
