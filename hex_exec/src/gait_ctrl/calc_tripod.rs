//! Tripod gait calculations

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
    leg::{LegId, LegPositionStore, TRIPOD_1, TRIPOD_2}
};
use util::time::secs_to_us;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D> GaitCtrl<D> 
where
    D: DelayUs<u32>
{
    /// Walk with the tripod gait.
    ///
    /// Each step is two phases of `cycle_time_s / 2`: first tripod 1 swings
    /// while tripod 2 pushes back, then the roles swap. `cycle_time_s` 
    /// defaults to `0.5 / speed`.
    ///
    /// A swing leg moves by `+step/2` and the same leg moves by `-step/2` on
    /// the other phase, so every leg ends a full step where it started. The
    /// body is what moves.
    pub fn walk<S>(
        &mut self,
        store: &mut S,
        direction_deg: f64,
        steps: u32,
        step_length_mm: f64,
        step_height_mm: f64,
        cycle_time_s: Option<f64>
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        const OP: &str = "walk";

        let cycle_time_s = cycle_time_s
            .unwrap_or(WALK_CYCLE_TIME_S / self.config.speed);
        let (dx, dy) = planar_step(direction_deg, step_length_mm);
        let phase_us = secs_to_us(cycle_time_s / 2.0);

        debug!(
            "Tripod walk: {:.1} deg, {} steps, {:.1} mm long, {:.1} mm high, \
            {:.3} s cycle", 
            direction_deg, steps, step_length_mm, step_height_mm, cycle_time_s
        );

        for step in 0..steps {
            trace!("Tripod step {}/{}", step + 1, steps);

            self.tripod_step(
                store, &TRIPOD_1, &TRIPOD_2, (dx, dy), step_height_mm, phase_us, OP
            )?;
            self.tripod_step(
                store, &TRIPOD_2, &TRIPOD_1, (dx, dy), step_height_mm, phase_us, OP
            )?;
        }

        Ok(())
    }

    /// One phase of the tripod gait: lift, swing and push, plant.
    ///
    /// Each of the three sub-phases is followed by a third of `phase_us`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn tripod_step<S>(
        &mut self,
        store: &mut S,
        swing_legs: &[LegId],
        stance_legs: &[LegId],
        step_mm: (f64, f64),
        lift_mm: f64,
        phase_us: u32,
        op: &'static str
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        let (half_dx, half_dy) = (step_mm.0 / 2.0, step_mm.1 / 2.0);

        // Lift
        self.check_cancel(op)?;
        for leg in swing_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.with_z(pos.z_mm + lift_mm));
        }
        self.delay.delay_us(split_us(phase_us, 3, 0));

        // Swing forward while the stance legs push back
        self.check_cancel(op)?;
        for leg in swing_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.offset_xy(half_dx, half_dy));
        }
        for leg in stance_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.offset_xy(-half_dx, -half_dy));
        }
        self.delay.delay_us(split_us(phase_us, 3, 1));

        // Plant
        self.check_cancel(op)?;
        let ground_z = self.ground_z();
        for leg in swing_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.with_z(ground_z));
        }
        self.delay.delay_us(split_us(phase_us, 3, 2));

        Ok(())
    }
}
