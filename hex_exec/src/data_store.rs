//! # Data Store
//!
//! Everything the command processor acts on: both gait engines, the leg 
//! position store (if one is attached) and the selected walking gait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;

// Internal
use comms_if::tc::gait_ctrl::GaitType;
use crate::{
    cancel::CancelToken,
    gait_ctrl::{GaitCtrl, GaitCtrlParams},
    ripple_gait::RippleGait
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
pub struct DataStore<S, D> {
    // Gait engines
    pub gait_ctrl: GaitCtrl<D>,
    pub ripple_gait: RippleGait<D>,

    /// The leg position store, `None` if the legs are unavailable.
    pub legs: Option<S>,

    /// Gait used by planar walking commands.
    pub gait_type: GaitType,

    /// Number of telecommands executed so far.
    pub num_tcs: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S, D> DataStore<S, D> 
where
    D: DelayUs<u32> + Clone
{
    /// Build both engines around a shared delay.
    pub fn new(params: GaitCtrlParams, delay: D, legs: Option<S>) -> Self {
        Self {
            ripple_gait: RippleGait::new(delay.clone()),
            gait_ctrl: GaitCtrl::new(params, delay),
            legs,
            gait_type: GaitType::default(),
            num_tcs: 0
        }
    }

    /// Make both engines honour the given cancellation token.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.gait_ctrl.set_cancel_token(token.clone());
        self.ripple_gait.set_cancel_token(token);
    }
}
