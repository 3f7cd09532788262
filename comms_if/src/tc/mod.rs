//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications 
//! interface.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Gait control commands
pub mod gait_ctrl;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// Internal
use gait_ctrl::{GaitCmd, GaitType};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the hexapod by the dispatcher.
///
/// In JSON form the variant name is given in `type` and the data in 
/// `payload`, for example `{"type": "SET_HEIGHT", "payload": 45.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tc {
    /// Execute a gait or posture command.
    Gait(GaitCmd),

    /// Walk by a planar displacement using the currently selected gait.
    WalkVector {
        dx_mm: f64,
        dy_mm: f64
    },

    /// Turn in place by the given angle, split into 15 degree tripod steps.
    Turn {
        angle_deg: f64
    },

    /// Stop and stand at the configured height.
    Stop,

    /// Select the gait used by `WalkVector`.
    SetGait(GaitType),

    /// Set the standing height. Values outside 20-80 mm are clamped.
    SetHeight(f64),

    /// Set the speed multiplier. Values outside 0.1-1.0 are clamped.
    SetSpeed(f64),

    /// Enable or disable smoothing ramps and set their step count.
    SetSmoothing {
        enabled: bool,
        steps: u32
    },

    /// Move every leg to the neutral calibration pose.
    CenterAll,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }

    /// Serialise the TC into a JSON packet
    pub fn to_json(&self) -> Result<String, TcParseError> {
        serde_json::to_string(self).map_err(TcParseError::InvalidJson)
    }
}
