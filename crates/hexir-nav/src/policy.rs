//! Obstacle-avoidance policy: the two linear-velocity dispositions layered
//! on top of the [`cascade`](crate::cascade).
//!
//! Both variants run the identical rule cascade; they differ only in what
//! happens to linear velocity once any rule triggers:
//!
//! - [`AvoidanceMode::Moving`] keeps driving at the obstacle-linear
//!   magnitude while turning away.
//! - [`AvoidanceMode::Stopping`] halts and turns in place.
//!
//! On no trigger, the caller's command passes through byte-identical and
//! the outcome reports `triggered = false`.
//!
//! # Example
//!
//! ```rust
//! use hexir_nav::policy::{AvoidanceMode, AvoidancePolicy};
//! use hexir_types::{ProximityBank, VelocityCommand, VelocityProfile};
//!
//! let mut policy = AvoidancePolicy::new(VelocityProfile::default(), AvoidanceMode::Stopping);
//!
//! // Fresh bank: every channel reads 0.0, so the center rule fires and the
//! // stopping variant zeroes linear velocity.
//! let bank = ProximityBank::default();
//! let outcome = policy.apply(&bank, VelocityCommand::new(0.5, 0.0), 10.0);
//! assert!(outcome.triggered);
//! assert_eq!(outcome.command.linear, 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use hexir_types::{ProximityBank, VelocityCommand, VelocityProfile};

use crate::cascade::assess;
use crate::chooser::{RandomTurn, TurnChooser};

/// Linear-velocity disposition applied when the cascade triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvoidanceMode {
    /// Keep moving at the obstacle-linear magnitude while turning away.
    #[default]
    Moving,
    /// Set linear velocity to exactly zero and turn in place.
    Stopping,
}

/// Result of one avoidance cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceOutcome {
    /// The command to hand to the drive base this cycle.
    pub command: VelocityCommand,
    /// Whether avoidance fired. False means `command` equals the nominal
    /// input exactly.
    pub triggered: bool,
}

/// One avoidance strategy bound to a [`VelocityProfile`].
///
/// The profile is passed in explicitly at construction; there is no
/// process-wide parameter lookup. All four magnitudes remain settable at
/// runtime.
pub struct AvoidancePolicy {
    profile: VelocityProfile,
    mode: AvoidanceMode,
    chooser: Box<dyn TurnChooser>,
}

impl AvoidancePolicy {
    /// Policy with the default entropy-seeded turn chooser.
    pub fn new(profile: VelocityProfile, mode: AvoidanceMode) -> Self {
        Self::with_chooser(profile, mode, Box::new(RandomTurn::new()))
    }

    /// Policy with a caller-supplied chooser (fixed or seeded, for tests
    /// and reproducible runs).
    pub fn with_chooser(
        profile: VelocityProfile,
        mode: AvoidanceMode,
        chooser: Box<dyn TurnChooser>,
    ) -> Self {
        Self {
            profile,
            mode,
            chooser,
        }
    }

    /// Run one avoidance cycle against a fresh proximity snapshot.
    ///
    /// Evaluates the full cascade, then applies this variant's linear
    /// disposition and emits the "obstacle detected" diagnostic when any
    /// rule fired.
    pub fn apply(
        &mut self,
        bank: &ProximityBank,
        nominal: VelocityCommand,
        range_to_avoid: f64,
    ) -> AvoidanceOutcome {
        let assessment = assess(
            bank,
            nominal,
            &self.profile,
            range_to_avoid,
            self.chooser.as_mut(),
        );

        let mut command = assessment.command;
        if assessment.triggered {
            command.linear = match self.mode {
                AvoidanceMode::Moving => self.profile.obstacle_linear,
                AvoidanceMode::Stopping => 0.0,
            };
            info!(
                mode = ?self.mode,
                linear = command.linear,
                angular = command.angular,
                "obstacle detected"
            );
        }

        AvoidanceOutcome {
            command,
            triggered: assessment.triggered,
        }
    }

    // ── Profile access ───────────────────────────────────────────────────

    /// The profile currently in force.
    pub fn profile(&self) -> VelocityProfile {
        self.profile
    }

    /// The linear-velocity disposition of this policy.
    pub fn mode(&self) -> AvoidanceMode {
        self.mode
    }

    pub fn default_linear(&self) -> f64 {
        self.profile.default_linear
    }

    pub fn default_angular(&self) -> f64 {
        self.profile.default_angular
    }

    pub fn obstacle_linear(&self) -> f64 {
        self.profile.obstacle_linear
    }

    pub fn obstacle_angular(&self) -> f64 {
        self.profile.obstacle_angular
    }

    pub fn set_default_linear(&mut self, velocity: f64) {
        self.profile.default_linear = velocity;
    }

    pub fn set_default_angular(&mut self, velocity: f64) {
        self.profile.default_angular = velocity;
    }

    pub fn set_obstacle_linear(&mut self, velocity: f64) {
        self.profile.obstacle_linear = velocity;
    }

    pub fn set_obstacle_angular(&mut self, velocity: f64) {
        self.profile.obstacle_angular = velocity;
    }
}

impl std::fmt::Debug for AvoidancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvoidancePolicy")
            .field("profile", &self.profile)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
