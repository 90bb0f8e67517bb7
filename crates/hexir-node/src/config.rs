//! Node configuration – reads a TOML file, falling back to documented
//! defaults for anything unset.
//!
//! A missing file is not an error: the node runs on pure defaults (every
//! velocity magnitude 0.5, moving avoidance, 100 ms tick). A present but
//! malformed file is rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use hexir_nav::AvoidanceMode;
use hexir_types::{HexirError, VelocityProfile};

/// Top-level node configuration (`hexir.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    /// The four velocity magnitudes; each defaults to 0.5.
    #[serde(default)]
    pub profile: VelocityProfile,

    #[serde(default)]
    pub avoidance: AvoidanceSection,

    #[serde(default)]
    pub control: ControlSection,

    #[serde(default)]
    pub drive: DriveSection,
}

/// `[avoidance]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvoidanceSection {
    /// Distance below which a proximity channel counts as an obstacle
    /// (sensor units).
    #[serde(default = "default_range_to_avoid")]
    pub range_to_avoid: f64,

    /// `"moving"` or `"stopping"`.
    #[serde(default)]
    pub mode: AvoidanceMode,
}

/// `[control]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSection {
    /// Control-cycle cadence in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// `[drive]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveSection {
    /// Wheel separation used by the differential-drive decomposition
    /// (same length unit as linear velocity).
    #[serde(default = "default_track_width")]
    pub track_width: f64,
}

fn default_range_to_avoid() -> f64 {
    20.0
}

fn default_tick_ms() -> u64 {
    100
}

fn default_track_width() -> f64 {
    0.3
}

impl Default for AvoidanceSection {
    fn default() -> Self {
        Self {
            range_to_avoid: default_range_to_avoid(),
            mode: AvoidanceMode::default(),
        }
    }
}

impl Default for ControlSection {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for DriveSection {
    fn default() -> Self {
        Self {
            track_width: default_track_width(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HexirError::Config`] when the file exists but cannot be
    /// read or parsed. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HexirError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| HexirError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| HexirError::Config(format!("cannot parse {}: {e}", path.display())))
    }
}
