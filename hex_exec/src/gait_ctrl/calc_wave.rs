//! Wave gait calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::{debug, trace};

// Internal
use super::*;
use crate::{
    delay::split_us,
    leg::{LegId, LegPositionStore, NUM_LEGS, WAVE_SEQUENCE}
};
use util::time::secs_to_us;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D> GaitCtrl<D> 
where
    D: DelayUs<u32>
{
    /// Walk with the wave gait, swinging one leg at a time.
    ///
    /// Legs are stepped in the order `R3, R2, R1, L3, L2, L1`. While a leg 
    /// swings by the full step every other leg pushes back by a sixth of it,
    /// so five feet are on the ground at all times. `leg_time_s` defaults to
    /// `0.2 / speed`.
    pub fn wave_walk<S>(
        &mut self,
        store: &mut S,
        direction_deg: f64,
        steps: u32,
        step_length_mm: f64,
        step_height_mm: f64,
        leg_time_s: Option<f64>
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        const OP: &str = "wave_walk";

        let leg_time_s = leg_time_s.unwrap_or(WAVE_LEG_TIME_S / self.config.speed);
        let step = planar_step(direction_deg, step_length_mm);
        let leg_us = secs_to_us(leg_time_s);

        debug!(
            "Wave walk: {:.1} deg, {} steps, {:.1} mm long, {:.1} mm high, \
            {:.3} s per leg", 
            direction_deg, steps, step_length_mm, step_height_mm, leg_time_s
        );

        for cycle in 0..steps {
            trace!("Wave cycle {}/{}", cycle + 1, steps);

            for leg in WAVE_SEQUENCE.iter() {
                self.single_leg_step(store, *leg, step, step_height_mm, leg_us, OP)?;
            }
        }

        Ok(())
    }

    /// Swing a single leg by `step_mm` while every other leg pushes back by 
    /// a sixth of it.
    ///
    /// The swing is computed from the leg's position before it was lifted.
    pub(crate) fn single_leg_step<S>(
        &mut self,
        store: &mut S,
        leg: LegId,
        step_mm: (f64, f64),
        lift_mm: f64,
        leg_us: u32,
        op: &'static str
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        let (dx, dy) = step_mm;
        let (push_dx, push_dy) = (dx / NUM_LEGS as f64, dy / NUM_LEGS as f64);

        trace!("Wave swing {}", leg);

        // Lift
        self.check_cancel(op)?;
        let start = store.current_position(leg);
        let lifted_z = start.z_mm + lift_mm;
        store.move_leg(leg, start.with_z(lifted_z));
        self.delay.delay_us(split_us(leg_us, 3, 0));

        // Swing while the others push back
        self.check_cancel(op)?;
        let swung = start.offset_xy(dx, dy);
        store.move_leg(leg, swung.with_z(lifted_z));
        for other in WAVE_SEQUENCE.iter().filter(|l| **l != leg) {
            let pos = store.current_position(*other);
            store.move_leg(*other, pos.offset_xy(-push_dx, -push_dy));
        }
        self.delay.delay_us(split_us(leg_us, 3, 1));

        // Plant
        self.check_cancel(op)?;
        store.move_leg(leg, swung.with_z(self.ground_z()));
        self.delay.delay_us(split_us(leg_us, 3, 2));

        Ok(())
    }
}
