//! # Communications interface crate.
//!
//! Provides the command interface through which a dispatcher drives the 
//! hexapod locomotion engine. Framing and transport are not part of this
//! crate, only the commands themselves.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommand definitions
pub mod tc;
