//! `hexir-hal` – the actuation boundary.
//!
//! The decision core hands its final (linear, angular) pair to a
//! [`VelocitySink`]; everything behind that trait is swappable. Two sinks
//! ship with the crate:
//!
//! - [`SimSink`] – records the most recent command and always succeeds,
//!   for headless runs and tests.
//! - [`DiffDriveSink`] – decomposes the pair into left/right wheel speeds
//!   over a configurable track width and forwards them to two
//!   [`WheelOutput`] drivers.

pub mod diff_drive;
pub mod sim;
pub mod sink;

pub use diff_drive::{DiffDriveSink, WheelOutput};
pub use sim::{SimSink, SimWheel};
pub use sink::VelocitySink;
