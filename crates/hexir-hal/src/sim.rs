//! Simulated drivers for headless runs and CI: no hardware required.

use hexir_types::{HexirError, VelocityCommand};
use tracing::debug;

use crate::diff_drive::WheelOutput;
use crate::sink::VelocitySink;

/// A simulated velocity sink that records the most recent command.
/// Always succeeds.
#[derive(Debug, Default)]
pub struct SimSink {
    last: Option<VelocityCommand>,
}

impl SimSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently executed command, if any cycle has run.
    pub fn last_command(&self) -> Option<VelocityCommand> {
        self.last
    }
}

impl VelocitySink for SimSink {
    fn id(&self) -> &str {
        "sim"
    }

    fn drive(&mut self, command: VelocityCommand) -> Result<(), HexirError> {
        debug!(linear = command.linear, angular = command.angular, "sim drive");
        self.last = Some(command);
        Ok(())
    }
}

/// A simulated wheel driver that records the most recent speed command.
/// Always succeeds.
#[derive(Debug)]
pub struct SimWheel {
    id: String,
    speed: f64,
}

impl SimWheel {
    pub fn new(id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            id: id.into(),
            speed: 0.0,
        })
    }
}

impl WheelOutput for SimWheel {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_speed(&mut self, speed: f64) -> Result<(), HexirError> {
        self.speed = speed;
        Ok(())
    }

    fn speed(&self) -> f64 {
        self.speed
    }
}
