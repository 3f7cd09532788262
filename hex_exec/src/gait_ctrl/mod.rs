//! # Gait control module
//!
//! The primary locomotion engine. Provides posture commands (stand, sit,
//! squat, tilt, twist), the tripod gait, the single leg wave gait, rotation in
//! place and the boot and shutdown choreographies.
//!
//! Every operation runs to completion on the calling thread, issuing demands
//! to a [`LegPositionStore`](crate::leg::LegPositionStore) interleaved with
//! timed suspensions through the injected delay. Multi-phase operations check
//! the optional [`CancelToken`](crate::cancel::CancelToken) at each sub-phase
//! boundary.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
mod calc_boot;
mod calc_posture;
mod calc_rotate;
mod calc_tripod;
mod calc_wave;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Tripod cycle time at full speed, divided by the speed multiplier.
///
/// Units: seconds
pub const WALK_CYCLE_TIME_S: f64 = 0.5;

/// Wave gait time per leg at full speed, divided by the speed multiplier.
///
/// Units: seconds
pub const WAVE_LEG_TIME_S: f64 = 0.2;

/// Duration of the stand ramp at full speed, divided by the speed multiplier.
///
/// Units: seconds
pub const STAND_RAMP_TIME_S: f64 = 0.3;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during GaitCtrl operation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GaitCtrlError {
    #[error("{op} was cancelled before completion")]
    Cancelled {
        op: &'static str
    },
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Planar displacement of a step of `length_mm` in `direction_deg`.
///
/// A direction of 0 is forward (+x), 90 is left (+y).
pub fn planar_step(direction_deg: f64, length_mm: f64) -> (f64, f64) {
    let rad = direction_deg.to_radians();
    (length_mm * rad.cos(), length_mm * rad.sin())
}
