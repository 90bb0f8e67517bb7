//! The [`VelocitySink`] trait.

use hexir_types::{HexirError, VelocityCommand};

/// Accepts the final velocity pair for execution, once per control cycle.
///
/// Every sink has a stable string identifier so faults can name the
/// component that rejected a command.
pub trait VelocitySink: Send {
    /// Stable identifier, e.g. `"drive_base"` or `"sim"`.
    fn id(&self) -> &str;

    /// Execute `command` this cycle.
    ///
    /// # Errors
    ///
    /// Returns [`HexirError::HardwareFault`] when the underlying drive
    /// hardware rejects the command.
    fn drive(&mut self, command: VelocityCommand) -> Result<(), HexirError>;
}
