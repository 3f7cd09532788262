//! Implementations for the GaitCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::warn;

// Internal
use super::{GaitConfig, GaitCtrlError, GaitCtrlParams};
use crate::{
    cancel::CancelToken,
    interp::ramp_positions,
    leg::{LegId, LegPosition, LegPositionStore, NUM_LEGS}
};
use util::time::secs_to_us;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gait control module state.
///
/// Owns the live [`GaitConfig`] and the delay used for every suspension. The
/// leg position store is passed into each operation so that the caller keeps
/// ownership of it (and may not have one at all).
pub struct GaitCtrl<D> {

    pub(crate) params: GaitCtrlParams,

    /// Live gait configuration, updated in place by posture, speed and height
    /// commands.
    pub config: GaitConfig,

    pub(crate) delay: D,

    cancel: Option<CancelToken>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D> GaitCtrl<D> 
where
    D: DelayUs<u32>
{
    /// Create a new controller from its parameters.
    ///
    /// The initial configuration is taken from `params.gait`, clamped.
    pub fn new(params: GaitCtrlParams, delay: D) -> Self {
        Self {
            config: params.gait.clamped(),
            params,
            delay,
            cancel: None
        }
    }

    /// Check `token` at every sub-phase boundary of multi-phase operations.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }

    /// The canonical stance of every leg.
    ///
    /// Each foot sits `stance_width` out from its mount along the leg's mount
    /// angle, at `-stand_height`.
    pub fn canonical_stance(&self) -> [LegPosition; NUM_LEGS] {
        canonical_stance(
            &self.params.leg_mount_angles_deg, 
            self.config.stance_width_mm, 
            self.config.stand_height_mm
        )
    }

    /// Height of a planted foot.
    pub(crate) fn ground_z(&self) -> f64 {
        -self.config.stand_height_mm
    }

    /// Return `Cancelled` if cancellation has been requested.
    pub(crate) fn check_cancel(&self, op: &'static str) -> Result<(), GaitCtrlError> {
        match self.cancel {
            Some(ref t) if t.is_cancelled() => {
                warn!("Cancellation requested, stopping {}", op);
                Err(GaitCtrlError::Cancelled { op })
            },
            _ => Ok(())
        }
    }

    /// Ramp the given legs to their targets over `duration_s`, honouring the
    /// smoothing configuration.
    pub(crate) fn smooth_move_legs<S>(
        &mut self, 
        store: &mut S, 
        targets: &[(LegId, LegPosition)],
        duration_s: f64
    )
    where
        S: LegPositionStore + ?Sized
    {
        let steps = self.config.ramp_steps();
        let step_delay_us = secs_to_us(duration_s / steps as f64);

        ramp_positions(store, &mut self.delay, targets, steps, step_delay_us);
    }

    /// Move every leg to the same height, keeping x and y.
    pub(crate) fn set_all_z<S>(&mut self, store: &mut S, z_mm: f64)
    where
        S: LegPositionStore + ?Sized
    {
        for leg in LegId::ALL.iter() {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.with_z(z_mm));
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Canonical stance for the given mount angles (degrees), stance width and 
/// stand height (millimeters).
pub fn canonical_stance(
    mount_angles_deg: &[f64; NUM_LEGS], 
    stance_width_mm: f64,
    stand_height_mm: f64
) -> [LegPosition; NUM_LEGS] {
    let mut stance = [LegPosition::default(); NUM_LEGS];

    for (pos, angle_deg) in stance.iter_mut().zip(mount_angles_deg.iter()) {
        let rad = angle_deg.to_radians();
        *pos = LegPosition::new(
            stance_width_mm * rad.cos(),
            stance_width_mm * rad.sin(),
            -stand_height_mm
        );
    }

    stance
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::delay::NoDelay;

    #[test]
    fn test_canonical_stance() {
        let ctrl = GaitCtrl::new(GaitCtrlParams::default(), NoDelay);
        let stance = ctrl.canonical_stance();

        // Middle legs point straight out to the sides
        assert!(stance[LegId::L2.index()].approx_eq(&LegPosition::new(0.0, 80.0, -40.0), 1e-9));
        assert!(stance[LegId::R2.index()].approx_eq(&LegPosition::new(0.0, -80.0, -40.0), 1e-9));

        for pos in stance.iter() {
            assert!((pos.x_mm.hypot(pos.y_mm) - 80.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_initial_config_clamped() {
        let mut params = GaitCtrlParams::default();
        params.gait.speed = 4.0;
        params.gait.smooth_steps = 0;

        let ctrl = GaitCtrl::new(params, NoDelay);
        assert_eq!(ctrl.config.speed, 1.0);
        assert_eq!(ctrl.config.smooth_steps, 1);
    }

    #[test]
    fn test_check_cancel() {
        let mut ctrl = GaitCtrl::new(GaitCtrlParams::default(), NoDelay);
        assert!(ctrl.check_cancel("walk").is_ok());

        let token = CancelToken::new();
        ctrl.set_cancel_token(token.clone());
        assert!(ctrl.check_cancel("walk").is_ok());

        token.cancel();
        assert_eq!(
            ctrl.check_cancel("walk"), 
            Err(GaitCtrlError::Cancelled { op: "walk" })
        );
    }
}
