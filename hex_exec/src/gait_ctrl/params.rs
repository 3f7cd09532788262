//! Parameters structure for GaitCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use util::maths::clamp;
use crate::leg::{LegPosition, NUM_LEGS};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

pub const MIN_STAND_HEIGHT_MM: f64 = 20.0;
pub const MAX_STAND_HEIGHT_MM: f64 = 80.0;

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for gait control, loaded from `gait_ctrl.toml`.
///
/// Every field may be omitted from the file, in which case the default is
/// used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitCtrlParams {

    /// Initial gait configuration.
    pub gait: GaitConfig,

    // ---- GEOMETRY ----

    /// Angle of each leg's canonical stance direction, indexed by 
    /// `LegId::index`.
    ///
    /// Units: degrees,
    /// Frame: Body (counter-clockwise from forward)
    pub leg_mount_angles_deg: [f64; NUM_LEGS],

    // ---- TIMING ----

    /// Cycle time of a rotation step if the command doesn't give one.
    ///
    /// Units: seconds
    pub rotate_cycle_time_s: f64,

    /// Boot and shutdown choreography.
    pub boot: BootParams,
}

/// The live gait configuration.
///
/// Created once per controller and updated field by field. Height and speed
/// are always clamped into range on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    /// Height of the body above the feet when standing.
    ///
    /// Units: millimeters, 20 to 80
    pub stand_height_mm: f64,

    /// Planar distance of each foot from its mount in the canonical stance.
    ///
    /// Units: millimeters
    pub stance_width_mm: f64,

    /// Speed multiplier, all default timings are divided by this.
    ///
    /// Units: none, 0.1 to 1.0
    pub speed: f64,

    /// Ramp posture changes over several eased demands.
    pub smooth_motion: bool,

    /// Number of demands in a ramp, at least 1.
    pub smooth_steps: u32,
}

/// Boot and shutdown choreography parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootParams {
    /// Compact storage pose, applied to every leg.
    pub curl_pos: LegPosition,

    /// Height of the feet when lying flat with the legs extended.
    ///
    /// Units: millimeters
    pub lie_flat_z_mm: f64,

    /// Height change between two rungs when rising or lying down.
    ///
    /// Units: millimeters
    pub rung_mm: f64,

    /// Pause after each rung.
    ///
    /// Units: seconds
    pub rung_pause_s: f64,

    /// Pause after each stage (curl, lie flat, rise).
    ///
    /// Units: seconds
    pub stage_pause_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for GaitCtrlParams {
    fn default() -> Self {
        Self {
            gait: GaitConfig::default(),
            leg_mount_angles_deg: [45.0, 90.0, 135.0, -45.0, -90.0, -135.0],
            rotate_cycle_time_s: 0.4,
            boot: BootParams::default()
        }
    }
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            stand_height_mm: 40.0,
            stance_width_mm: 80.0,
            speed: 0.8,
            smooth_motion: true,
            smooth_steps: 5
        }
    }
}

impl Default for BootParams {
    fn default() -> Self {
        Self {
            curl_pos: LegPosition::new(30.0, 0.0, -20.0),
            lie_flat_z_mm: -10.0,
            rung_mm: 10.0,
            rung_pause_s: 0.1,
            stage_pause_s: 0.3
        }
    }
}

impl GaitConfig {
    /// Return this config with every field forced into range.
    pub fn clamped(mut self) -> Self {
        self.set_stand_height(self.stand_height_mm);
        self.set_speed(self.speed);
        self.smooth_steps = self.smooth_steps.max(1);
        self
    }

    /// Set the standing height, clamped to 20-80 mm. Returns the value 
    /// applied.
    pub fn set_stand_height(&mut self, height_mm: f64) -> f64 {
        self.stand_height_mm = clamp(height_mm, MIN_STAND_HEIGHT_MM, MAX_STAND_HEIGHT_MM);
        self.stand_height_mm
    }

    /// Set the speed multiplier, clamped to 0.1-1.0. Returns the value 
    /// applied.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.speed = clamp(speed, MIN_SPEED, MAX_SPEED);
        self.speed
    }

    /// Enable or disable smoothing. `steps` is raised to at least 1.
    pub fn set_smoothing(&mut self, enabled: bool, steps: u32) {
        self.smooth_motion = enabled;
        self.smooth_steps = steps.max(1);
    }

    /// Number of demands a ramp should use, 1 when smoothing is disabled.
    pub fn ramp_steps(&self) -> u32 {
        if self.smooth_motion {
            self.smooth_steps
        }
        else {
            1
        }
    }
}
