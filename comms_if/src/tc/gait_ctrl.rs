//! # Gait control telecommands
//!
//! One command per operation of the gait engine. Every parameter is a 
//! primitive in degrees, millimeters, counts or seconds. Omitted parameters
//! take the defaults below, both on the command line and in JSON.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use structopt::StructOpt;
use std::{fmt, str::FromStr};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

pub const DEFAULT_WALK_STEPS: u32 = 4;
pub const DEFAULT_WALK_STEP_LENGTH_MM: f64 = 35.0;
pub const DEFAULT_WALK_STEP_HEIGHT_MM: f64 = 25.0;

pub const DEFAULT_WAVE_STEPS: u32 = 2;
pub const DEFAULT_WAVE_STEP_LENGTH_MM: f64 = 25.0;
pub const DEFAULT_WAVE_STEP_HEIGHT_MM: f64 = 20.0;

pub const DEFAULT_RIPPLE_STEPS: u32 = 2;
pub const DEFAULT_RIPPLE_STEP_LENGTH_MM: f64 = 22.0;
pub const DEFAULT_RIPPLE_STEP_HEIGHT_MM: f64 = 18.0;

pub const DEFAULT_ROTATE_ANGLE_DEG: f64 = 30.0;
pub const DEFAULT_ROTATE_STEPS: u32 = 4;
pub const DEFAULT_ROTATE_STEP_HEIGHT_MM: f64 = 25.0;

pub const DEFAULT_TILT_MM: f64 = 20.0;
pub const DEFAULT_TWIST_DEG: f64 = 15.0;
pub const DEFAULT_SIT_HEIGHT_MM: f64 = 20.0;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A gait or posture command executed by the gait engine.
///
/// Directions and rotations follow the right hand rule about the body's Z+ (upwards) axis: a
/// direction of 0 degrees is straight ahead, 90 degrees is to the left, and positive rotations
/// are counter-clockwise seen from above.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
pub enum GaitCmd {
    /// Walk using the tripod gait, two alternating groups of three legs.
    #[structopt(name = "walk")]
    Walk {
        /// Direction of travel in degrees.
        #[structopt(long, default_value = "0", allow_hyphen_values = true)]
        #[serde(default)]
        direction_deg: f64,

        /// Number of complete two-phase cycles.
        #[structopt(long, default_value = "4")]
        #[serde(default = "default_walk_steps")]
        steps: u32,

        /// Planar length of one step in millimeters.
        #[structopt(long, default_value = "35")]
        #[serde(default = "default_walk_step_length_mm")]
        step_length_mm: f64,

        /// Lift height of the swing legs in millimeters.
        #[structopt(long, default_value = "25")]
        #[serde(default = "default_walk_step_height_mm")]
        step_height_mm: f64,

        /// Duration of one complete cycle in seconds, `0.5 / speed` if omitted.
        #[structopt(long)]
        #[serde(default)]
        cycle_time_s: Option<f64>,
    },

    /// Walk using the wave gait, one leg at a time.
    #[structopt(name = "wave")]
    WaveWalk {
        /// Direction of travel in degrees.
        #[structopt(long, default_value = "0", allow_hyphen_values = true)]
        #[serde(default)]
        direction_deg: f64,

        /// Number of complete six-leg cycles.
        #[structopt(long, default_value = "2")]
        #[serde(default = "default_wave_steps")]
        steps: u32,

        /// Planar length of one step in millimeters.
        #[structopt(long, default_value = "25")]
        #[serde(default = "default_wave_step_length_mm")]
        step_length_mm: f64,

        /// Lift height of the swing leg in millimeters.
        #[structopt(long, default_value = "20")]
        #[serde(default = "default_wave_step_height_mm")]
        step_height_mm: f64,

        /// Duration of one leg's movement in seconds, `0.2 / speed` if omitted.
        #[structopt(long)]
        #[serde(default)]
        leg_time_s: Option<f64>,
    },

    /// Walk using the ripple gait, six overlapping phases.
    #[structopt(name = "ripple")]
    RippleWalk {
        /// Direction of travel in degrees.
        #[structopt(long, default_value = "0", allow_hyphen_values = true)]
        #[serde(default)]
        direction_deg: f64,

        /// Number of complete six-phase cycles.
        #[structopt(long, default_value = "2")]
        #[serde(default = "default_ripple_steps")]
        steps: u32,

        /// Planar length of one step in millimeters.
        #[structopt(long, default_value = "22")]
        #[serde(default = "default_ripple_step_length_mm")]
        step_length_mm: f64,

        /// Lift height of the swing leg in millimeters.
        #[structopt(long, default_value = "18")]
        #[serde(default = "default_ripple_step_height_mm")]
        step_height_mm: f64,

        /// Duration of one phase's swing in seconds, `0.12 / speed` if omitted.
        #[structopt(long)]
        #[serde(default)]
        phase_time_s: Option<f64>,
    },

    /// Rotate in place using the tripod gait.
    #[structopt(name = "rotate")]
    Rotate {
        /// Rotation per cycle in degrees, positive is counter-clockwise.
        #[structopt(long, default_value = "30", allow_hyphen_values = true)]
        #[serde(default = "default_rotate_angle_deg")]
        angle_deg: f64,

        /// Number of rotation cycles.
        #[structopt(long, default_value = "4")]
        #[serde(default = "default_rotate_steps")]
        steps: u32,

        /// Lift height of the swing legs in millimeters.
        #[structopt(long, default_value = "25")]
        #[serde(default = "default_rotate_step_height_mm")]
        step_height_mm: f64,

        /// Duration of one cycle in seconds, taken from the parameters if omitted.
        #[structopt(long)]
        #[serde(default)]
        cycle_time_s: Option<f64>,
    },

    /// Stand at the given height, or the configured height if omitted.
    #[structopt(name = "stand")]
    Stand {
        #[structopt(long)]
        #[serde(default)]
        height_mm: Option<f64>,
    },

    /// Lower the body to a sitting height.
    #[structopt(name = "sit")]
    Sit {
        #[structopt(long, default_value = "20")]
        #[serde(default = "default_sit_height_mm")]
        height_mm: f64,
    },

    /// Squat by offsetting every leg's height, positive is lower.
    #[structopt(name = "squat")]
    Squat {
        #[structopt(long, default_value = "0", allow_hyphen_values = true)]
        #[serde(default)]
        offset_mm: f64,
    },

    /// Return every leg to its canonical stance position.
    #[structopt(name = "reset")]
    ResetPositions,

    /// Tilt the body forward, front legs lowered.
    #[structopt(name = "tilt-forward")]
    TiltForward {
        #[structopt(long, default_value = "20", allow_hyphen_values = true)]
        #[serde(default = "default_tilt_mm")]
        offset_mm: f64,
    },

    /// Tilt the body backward, back legs lowered.
    #[structopt(name = "tilt-back")]
    TiltBack {
        #[structopt(long, default_value = "20", allow_hyphen_values = true)]
        #[serde(default = "default_tilt_mm")]
        offset_mm: f64,
    },

    /// Tilt the body left, left legs lowered.
    #[structopt(name = "tilt-left")]
    TiltLeft {
        #[structopt(long, default_value = "20", allow_hyphen_values = true)]
        #[serde(default = "default_tilt_mm")]
        offset_mm: f64,
    },

    /// Tilt the body right, right legs lowered.
    #[structopt(name = "tilt-right")]
    TiltRight {
        #[structopt(long, default_value = "20", allow_hyphen_values = true)]
        #[serde(default = "default_tilt_mm")]
        offset_mm: f64,
    },

    /// Twist the body about its vertical axis without lifting any leg.
    #[structopt(name = "twist")]
    Twist {
        #[structopt(long, default_value = "15", allow_hyphen_values = true)]
        #[serde(default = "default_twist_deg")]
        angle_deg: f64,
    },

    /// Unfold from the curled storage pose and stand up.
    #[structopt(name = "boot")]
    BootUp,

    /// Lie down, curl up and disable the actuators.
    #[structopt(name = "shutdown")]
    ShutDown,
}

/// The gait used for planar walking commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaitType {
    /// Two alternating groups of three legs. Fastest.
    Tripod,

    /// One leg at a time, five on the ground. Most stable.
    Wave,

    /// Six overlapping phases, at least four legs on the ground.
    Ripple,
}

/// Error returned when parsing an unknown gait name.
#[derive(Debug, Error)]
#[error("Unknown gait: {0}")]
pub struct GaitTypeParseError(pub String);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for GaitType {
    fn default() -> Self {
        GaitType::Wave
    }
}

impl FromStr for GaitType {
    type Err = GaitTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tripod" => Ok(GaitType::Tripod),
            "wave" => Ok(GaitType::Wave),
            "ripple" => Ok(GaitType::Ripple),
            _ => Err(GaitTypeParseError(s.to_string()))
        }
    }
}

impl fmt::Display for GaitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaitType::Tripod => write!(f, "tripod"),
            GaitType::Wave => write!(f, "wave"),
            GaitType::Ripple => write!(f, "ripple"),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// SERDE DEFAULTS
// ------------------------------------------------------------------------------------------------

fn default_walk_steps() -> u32 { DEFAULT_WALK_STEPS }
fn default_walk_step_length_mm() -> f64 { DEFAULT_WALK_STEP_LENGTH_MM }
fn default_walk_step_height_mm() -> f64 { DEFAULT_WALK_STEP_HEIGHT_MM }
fn default_wave_steps() -> u32 { DEFAULT_WAVE_STEPS }
fn default_wave_step_length_mm() -> f64 { DEFAULT_WAVE_STEP_LENGTH_MM }
fn default_wave_step_height_mm() -> f64 { DEFAULT_WAVE_STEP_HEIGHT_MM }
fn default_ripple_steps() -> u32 { DEFAULT_RIPPLE_STEPS }
fn default_ripple_step_length_mm() -> f64 { DEFAULT_RIPPLE_STEP_LENGTH_MM }
fn default_ripple_step_height_mm() -> f64 { DEFAULT_RIPPLE_STEP_HEIGHT_MM }
fn default_rotate_angle_deg() -> f64 { DEFAULT_ROTATE_ANGLE_DEG }
fn default_rotate_steps() -> u32 { DEFAULT_ROTATE_STEPS }
fn default_rotate_step_height_mm() -> f64 { DEFAULT_ROTATE_STEP_HEIGHT_MM }
fn default_tilt_mm() -> f64 { DEFAULT_TILT_MM }
fn default_twist_deg() -> f64 { DEFAULT_TWIST_DEG }
fn default_sit_height_mm() -> f64 { DEFAULT_SIT_HEIGHT_MM }
