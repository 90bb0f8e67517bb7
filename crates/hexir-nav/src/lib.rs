//! `hexir-nav` – obstacle-avoidance decision logic.
//!
//! # Modules
//!
//! - [`cascade`] – the priority-ordered rule evaluator over the six
//!   proximity readings, plus the coarse [`any_obstacle_near`] gate.
//! - [`policy`] – [`AvoidancePolicy`][policy::AvoidancePolicy]: the
//!   moving/stopping variants that turn a nominal command into an
//!   obstacle-avoiding one.
//! - [`chooser`] – [`TurnChooser`][chooser::TurnChooser]: the random sign
//!   chooser used to break symmetric-threat ties.

pub mod cascade;
pub mod chooser;
pub mod policy;

pub use cascade::{Assessment, any_obstacle_near, assess};
pub use chooser::{RandomTurn, TurnChooser};
pub use policy::{AvoidanceMode, AvoidanceOutcome, AvoidancePolicy};
