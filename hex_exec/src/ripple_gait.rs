//! # Ripple gait
//!
//! A six phase gait with overlapping stance shifts. Legs swing one after the
//! other in the order `R1, R2, R3, L3, L2, L1`, and after each swing the 
//! remaining legs shift back by a sixth of the step.
//!
//! Independent of [`GaitCtrl`](crate::gait_ctrl::GaitCtrl), but driving the
//! same leg position store and reading the same gait configuration.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::{debug, trace, warn};

// Internal
use crate::{
    cancel::CancelToken,
    gait_ctrl::{planar_step, GaitConfig, GaitCtrlError},
    leg::{LegId, LegPosition, LegPositionStore, NUM_LEGS, RIPPLE_SEQUENCE}
};
use util::time::secs_to_us;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Swing time per leg at full speed, divided by the speed multiplier.
///
/// Units: seconds
pub const RIPPLE_PHASE_TIME_S: f64 = 0.12;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Ripple gait engine.
pub struct RippleGait<D> {
    delay: D,

    cancel: Option<CancelToken>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D> RippleGait<D>
where
    D: DelayUs<u32>
{
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            cancel: None
        }
    }

    /// Check `token` at every phase boundary.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }

    /// Walk with the ripple gait.
    ///
    /// For each leg in the sequence the positions of the other five legs are
    /// captured before anything moves. The active leg is then lifted and 
    /// swung by the full step (held for `phase_time_s`), planted (held for 
    /// half as long), and finally the other legs are shifted back by a sixth
    /// of the step from their captured positions.
    ///
    /// `phase_time_s` defaults to `0.12 / speed`.
    #[allow(clippy::too_many_arguments)]
    pub fn walk<S>(
        &mut self,
        store: &mut S,
        config: &GaitConfig,
        direction_deg: f64,
        steps: u32,
        step_length_mm: f64,
        step_height_mm: f64,
        phase_time_s: Option<f64>
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        const OP: &str = "ripple_walk";

        let phase_time_s = phase_time_s.unwrap_or(RIPPLE_PHASE_TIME_S / config.speed);
        let (dx, dy) = planar_step(direction_deg, step_length_mm);
        let (shift_dx, shift_dy) = (dx / NUM_LEGS as f64, dy / NUM_LEGS as f64);
        let swing_us = secs_to_us(phase_time_s);
        let plant_us = secs_to_us(phase_time_s / 2.0);
        let ground_z = -config.stand_height_mm;

        debug!(
            "Ripple walk: {:.1} deg, {} steps, {:.1} mm long, {:.1} mm high, \
            {:.3} s phase", 
            direction_deg, steps, step_length_mm, step_height_mm, phase_time_s
        );

        for cycle in 0..steps {
            trace!("Ripple cycle {}/{}", cycle + 1, steps);

            for leg in RIPPLE_SEQUENCE.iter() {
                self.check_cancel(OP)?;

                // Capture every stance leg before mutating any of them
                let mut stance: Vec<(LegId, LegPosition)> = 
                    Vec::with_capacity(NUM_LEGS - 1);
                for other in RIPPLE_SEQUENCE.iter().filter(|l| *l != leg) {
                    stance.push((*other, store.current_position(*other)));
                }

                trace!("Ripple swing {}", leg);

                // Lift and swing
                let start = store.current_position(*leg);
                let swung = start.offset_xy(dx, dy);
                store.move_leg(*leg, swung.with_z(start.z_mm + step_height_mm));
                self.delay.delay_us(swing_us);

                // Plant
                self.check_cancel(OP)?;
                store.move_leg(*leg, swung.with_z(ground_z));
                self.delay.delay_us(plant_us);

                // Shift the stance legs from their captured positions
                for (other, pos) in stance {
                    store.move_leg(other, pos.offset_xy(-shift_dx, -shift_dy));
                }
            }
        }

        Ok(())
    }

    fn check_cancel(&self, op: &'static str) -> Result<(), GaitCtrlError> {
        match self.cancel {
            Some(ref t) if t.is_cancelled() => {
                warn!("Cancellation requested, stopping {}", op);
                Err(GaitCtrlError::Cancelled { op })
            },
            _ => Ok(())
        }
    }
}
