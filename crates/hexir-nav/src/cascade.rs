//! Priority-ordered proximity rule cascade.
//!
//! [`assess`] maps the six IR readings plus a trigger threshold to a
//! corrected velocity command. Rules are evaluated top-to-bottom and the
//! first match wins:
//!
//! 1. Center below threshold (dominant case, see below)
//! 2. CRight *and* CLeft below threshold → randomly signed turn
//! 3. Only CRight → turn left
//! 4. Only CLeft → turn right
//! 5. Only Right → turn left
//! 6. Only Left → turn right
//! 7. Nothing below threshold → command passes through untouched
//!
//! Sign convention: negative angular turns left, positive turns right.
//!
//! ## Center-rule quirk
//!
//! In the center-triggered case the symmetric-threat branch (|Right − Left|
//! under the symmetry band, or both side sensors clear) assigns a randomly
//! signed angular value — and then the Right/Left directional comparison
//! runs regardless and overwrites it. The random draw therefore only ever
//! affects linear velocity. This matches the shipped controller exactly;
//! the ordering is load-bearing and pinned by tests, so do not "fix" it.

use hexir_types::{IrChannel, ProximityBank, VelocityCommand, VelocityProfile};

use crate::chooser::TurnChooser;

/// Readings within this band of each other count as a symmetric frontal
/// threat (sensor units).
pub const SYMMETRY_BAND: f64 = 5.0;

/// Result of one cascade evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    /// The corrected command. Equal to the nominal input when `triggered`
    /// is false.
    pub command: VelocityCommand,
    /// Whether any rule fired.
    pub triggered: bool,
}

/// Evaluate the cascade against a fresh snapshot of the proximity bank.
///
/// Pure with respect to the readings: nothing is cached between calls.
/// `range_to_avoid` is the distance below which a channel is considered to
/// detect an obstacle.
pub fn assess(
    bank: &ProximityBank,
    nominal: VelocityCommand,
    profile: &VelocityProfile,
    range_to_avoid: f64,
    chooser: &mut dyn TurnChooser,
) -> Assessment {
    let center = bank.get(IrChannel::Center);
    let right = bank.get(IrChannel::Right);
    let left = bank.get(IrChannel::Left);
    let c_right = bank.get(IrChannel::CRight);
    let c_left = bank.get(IrChannel::CLeft);

    let mut command = nominal;
    let mut triggered = false;

    if center < range_to_avoid {
        if (right - left).abs() < SYMMETRY_BAND
            || (right > range_to_avoid && left > range_to_avoid)
        {
            command.linear = profile.obstacle_linear;
            command.angular = chooser.signed(profile.obstacle_angular);
        }

        // Runs unconditionally and supersedes the random draw above; only
        // the symmetric branch's linear assignment survives (module docs).
        if right < left {
            command.angular = -profile.obstacle_angular; // turn left
        } else {
            command.angular = profile.obstacle_angular; // turn right
        }

        triggered = true;
    } else if c_right < range_to_avoid && c_left < range_to_avoid {
        command.angular = chooser.signed(profile.obstacle_angular);
        triggered = true;
    } else if c_right < range_to_avoid {
        command.angular = -profile.obstacle_angular; // turn left
        triggered = true;
    } else if c_left < range_to_avoid {
        command.angular = profile.obstacle_angular; // turn right
        triggered = true;
    } else if right < range_to_avoid {
        command.angular = -profile.obstacle_angular; // turn left
        triggered = true;
    } else if left < range_to_avoid {
        command.angular = profile.obstacle_angular; // turn right
        triggered = true;
    }

    Assessment { command, triggered }
}

/// Coarse "is something close" gate, independent of the directional
/// cascade: true when more than one of the five forward-facing channels
/// reads below `threshold`. The back sensor never participates.
pub fn any_obstacle_near(bank: &ProximityBank, threshold: f64) -> bool {
    let count = IrChannel::FORWARD
        .iter()
        .filter(|&&channel| bank.get(channel) < threshold)
        .count();
    count > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always answers with the given sign, so tests can observe exactly
    /// where the random draw lands.
    pub(crate) struct FixedChooser(pub f64);

    impl TurnChooser for FixedChooser {
        fn signed(&mut self, magnitude: f64) -> f64 {
            self.0 * magnitude
        }
    }

    fn bank(center: f64, right: f64, left: f64, c_right: f64, c_left: f64, back: f64) -> ProximityBank {
        let mut b = ProximityBank::default();
        b.set(IrChannel::Center, center);
        b.set(IrChannel::Right, right);
        b.set(IrChannel::Left, left);
        b.set(IrChannel::CRight, c_right);
        b.set(IrChannel::CLeft, c_left);
        b.set(IrChannel::Back, back);
        b
    }

    fn profile() -> VelocityProfile {
        VelocityProfile {
            default_linear: 0.5,
            default_angular: 0.5,
            obstacle_linear: 0.3,
            obstacle_angular: 0.9,
        }
    }

    const NOMINAL: VelocityCommand = VelocityCommand {
        linear: 0.5,
        angular: 0.0,
    };

    // ------------------------------------------------------------------ rule 1

    #[test]
    fn center_symmetric_threat_turns_right() {
        // Right = Left = 10, threshold 15: the symmetric branch fires
        // (difference 0 < 5), then the directional comparison (Right < Left
        // is false) forces a right turn regardless of the random sign.
        let b = bank(5.0, 10.0, 10.0, 50.0, 50.0, 50.0);
        let mut chooser = FixedChooser(-1.0); // random draw says "left"

        let out = assess(&b, NOMINAL, &profile(), 15.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.linear, 0.3); // symmetric branch set linear
        assert_eq!(out.command.angular, 0.9); // ... but the turn is right
    }

    #[test]
    fn center_with_closer_right_turns_left() {
        let b = bank(5.0, 8.0, 40.0, 50.0, 50.0, 50.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 15.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, -0.9);
        // Both sides not clear and |Right - Left| >= band: the symmetric
        // branch never ran, so linear is still the nominal value.
        assert_eq!(out.command.linear, 0.5);
    }

    #[test]
    fn center_with_both_sides_clear_takes_symmetric_branch() {
        // Sides far apart (difference >= band) but both above threshold:
        // the OR arm fires, sets linear, and the comparison still decides
        // the final angular sign.
        let b = bank(5.0, 20.0, 40.0, 50.0, 50.0, 50.0);
        let mut chooser = FixedChooser(-1.0);

        let out = assess(&b, NOMINAL, &profile(), 15.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.linear, 0.3);
        assert_eq!(out.command.angular, -0.9); // Right < Left → turn left
    }

    #[test]
    fn center_rule_ignores_cright_and_cleft() {
        // Center dominates: rule 2 would have matched too, but rule 1 wins.
        let b = bank(5.0, 8.0, 40.0, 1.0, 1.0, 50.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 15.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, -0.9); // decided by Right/Left only
    }

    // ------------------------------------------------------------------ rule 2

    #[test]
    fn both_diagonals_use_random_sign() {
        let b = bank(50.0, 50.0, 50.0, 5.0, 5.0, 50.0);

        let mut leftish = FixedChooser(-1.0);
        let out = assess(&b, NOMINAL, &profile(), 15.0, &mut leftish);
        assert!(out.triggered);
        assert_eq!(out.command.angular, -0.9);

        let mut rightish = FixedChooser(1.0);
        let out = assess(&b, NOMINAL, &profile(), 15.0, &mut rightish);
        assert_eq!(out.command.angular, 0.9);
    }

    // ------------------------------------------------------------------ rules 3-6

    #[test]
    fn only_cright_turns_left() {
        let b = bank(20.0, 20.0, 20.0, 5.0, 20.0, 20.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, -0.9);
        // The cascade leaves linear alone outside the symmetric branch.
        assert_eq!(out.command.linear, 0.5);
    }

    #[test]
    fn only_cleft_turns_right() {
        let b = bank(20.0, 20.0, 20.0, 20.0, 5.0, 20.0);
        let mut chooser = FixedChooser(-1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, 0.9);
    }

    #[test]
    fn only_right_turns_left() {
        let b = bank(20.0, 5.0, 20.0, 20.0, 20.0, 20.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, -0.9);
    }

    #[test]
    fn only_left_turns_right() {
        let b = bank(20.0, 20.0, 5.0, 20.0, 20.0, 20.0);
        let mut chooser = FixedChooser(-1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, 0.9);
    }

    #[test]
    fn diagonal_pair_outranks_single_side() {
        // Rules 3/5 would match individually; rule 2 wins because both
        // diagonals are low.
        let b = bank(20.0, 5.0, 20.0, 5.0, 5.0, 20.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(out.triggered);
        assert_eq!(out.command.angular, 0.9); // chooser-decided, not rule 5
    }

    // ------------------------------------------------------------------ rule 7

    #[test]
    fn all_clear_passes_command_through() {
        let b = bank(100.0, 100.0, 100.0, 100.0, 100.0, 100.0);
        let nominal = VelocityCommand::new(0.42, -0.13);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, nominal, &profile(), 10.0, &mut chooser);
        assert!(!out.triggered);
        assert_eq!(out.command, nominal);
    }

    #[test]
    fn reading_at_threshold_does_not_trigger() {
        // Strict less-than comparison throughout.
        let b = bank(10.0, 10.0, 10.0, 10.0, 10.0, 10.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(!out.triggered);
    }

    #[test]
    fn back_channel_never_triggers_avoidance() {
        let b = bank(100.0, 100.0, 100.0, 100.0, 100.0, 1.0);
        let mut chooser = FixedChooser(1.0);

        let out = assess(&b, NOMINAL, &profile(), 10.0, &mut chooser);
        assert!(!out.triggered);
    }

    // ------------------------------------------------------------------ aggregate gate

    #[test]
    fn aggregate_true_with_two_forward_channels_low() {
        let b = bank(5.0, 100.0, 100.0, 5.0, 100.0, 100.0);
        assert!(any_obstacle_near(&b, 10.0));
    }

    #[test]
    fn aggregate_false_with_single_low_channel() {
        let b = bank(5.0, 100.0, 100.0, 100.0, 100.0, 100.0);
        assert!(!any_obstacle_near(&b, 10.0));
    }

    #[test]
    fn aggregate_ignores_back_channel() {
        // Back + one forward channel low: back does not count, so only one
        // qualifying channel remains and the gate stays closed.
        let b = bank(5.0, 100.0, 100.0, 100.0, 100.0, 5.0);
        assert!(!any_obstacle_near(&b, 10.0));
    }

    #[test]
    fn aggregate_on_fresh_bank_counts_zeroed_channels() {
        // Before the first delivery every channel reads 0.0, which counts
        // as "obstacle at zero distance". Documented, not validated away.
        let b = ProximityBank::default();
        assert!(any_obstacle_near(&b, 10.0));
    }
}
