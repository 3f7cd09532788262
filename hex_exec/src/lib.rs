//! # Hexapod library.
//!
//! The locomotion engine of the hexapod: leg definitions, the leg position 
//! store contract, the gait engines and the command processor which drives 
//! them.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Cooperative cancellation of running gaits
pub mod cancel;

/// Data store - the engines, the legs and the selected gait
pub mod data_store;

/// Delay implementations and timing helpers
pub mod delay;

/// Gait control module - posture, tripod, wave, rotation, boot and shutdown
pub mod gait_ctrl;

/// Interpolator - eased ramps between leg positions
pub mod interp;

/// Leg identifiers, positions, groups and the leg position store
pub mod leg;

/// Executable parameters
pub mod params;

/// Ripple gait engine
pub mod ripple_gait;

/// Telecommand processor - maps telecommands onto the gait engines
pub mod tc_processor;

#[cfg(test)]
pub(crate) mod test_utils;
