//! # Hexapod Executable Parameters
//!
//! This module provide parameters for the hexapod executable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

use crate::leg::{LegPosition, NUM_LEGS};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HexExecParams {

    /// Minimum log level, one of "info", "debug" or "trace"
    pub log_level: String,

    /// Gait control parameter file, relative to the params directory
    pub gait_ctrl_params: String,

    /// Neutral pose of the simulated legs, used on startup and by 
    /// `CENTER_ALL`. The canonical stance is used if omitted.
    pub neutral_pos: Option<[LegPosition; NUM_LEGS]>,

    /// Write every leg demand to `arch/legs/demands.csv` in the session
    pub archive_demands: bool,
}

impl Default for HexExecParams {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            gait_ctrl_params: String::from("gait_ctrl.toml"),
            neutral_pos: None,
            archive_demands: false
        }
    }
}
