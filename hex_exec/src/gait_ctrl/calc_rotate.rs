//! Rotation in place calculations

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
    /// Rotate in place by `angle_deg` per step (counter-clockwise positive)
    /// using the tripod skeleton.
    ///
    /// In each phase the swing tripod turns by `+angle/2` and is planted, 
    /// while the stance tripod turns by `-angle/2`. `cycle_time_s` defaults
    /// to the configured rotation cycle time and is not scaled by speed.
    pub fn rotate<S>(
        &mut self,
        store: &mut S,
        angle_deg: f64,
        steps: u32,
        step_height_mm: f64,
        cycle_time_s: Option<f64>
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        const OP: &str = "rotate";

        let cycle_time_s = cycle_time_s.unwrap_or(self.params.rotate_cycle_time_s);
        let half_rad = (angle_deg / 2.0).to_radians();
        let phase_us = secs_to_us(cycle_time_s / 2.0);

        debug!(
            "Rotate: {:.1} deg x {} steps, {:.1} mm high, {:.3} s cycle", 
            angle_deg, steps, step_height_mm, cycle_time_s
        );

        for step in 0..steps {
            trace!("Rotate step {}/{}", step + 1, steps);

            self.rotate_tripod(
                store, &TRIPOD_1, &TRIPOD_2, half_rad, step_height_mm, phase_us, OP
            )?;
            self.rotate_tripod(
                store, &TRIPOD_2, &TRIPOD_1, half_rad, step_height_mm, phase_us, OP
            )?;
        }

        Ok(())
    }

    /// One phase of the rotation gait: lift, then turn and plant the swing
    /// legs while counter-turning the stance legs.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn rotate_tripod<S>(
        &mut self,
        store: &mut S,
        swing_legs: &[LegId],
        stance_legs: &[LegId],
        half_rad: f64,
        lift_mm: f64,
        phase_us: u32,
        op: &'static str
    ) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        // Lift
        self.check_cancel(op)?;
        for leg in swing_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.with_z(pos.z_mm + lift_mm));
        }
        self.delay.delay_us(split_us(phase_us, 2, 0));

        // Turn
        self.check_cancel(op)?;
        let ground_z = self.ground_z();
        for leg in swing_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.rotated_xy(half_rad).with_z(ground_z));
        }
        for leg in stance_legs {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.rotated_xy(-half_rad));
        }
        self.delay.delay_us(split_us(phase_us, 2, 1));

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        delay::NoDelay,
        leg::{LegPosition, NUM_LEGS},
        test_utils::{recorder, positions_at_delays, total_delay_us, turned_deg},
    };

    fn stance() -> [LegPosition; NUM_LEGS] {
        GaitCtrl::new(GaitCtrlParams::default(), NoDelay).canonical_stance()
    }

    #[test]
    fn test_rotate_swing_rotation_composes() {
        let initial = stance();
        let (mut store, delay, log) = recorder(initial);
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.rotate(&mut store, 30.0, 12, 25.0, None).unwrap();

        // Two delays per phase, the second one ends the phase
        let snapshots = positions_at_delays(initial, &log.borrow());
        assert_eq!(snapshots.len(), 12 * 2 * 2);

        let mut prev = initial;
        let mut total_swing_deg = 0.0;
        let mut step_swing_deg = 0.0;

        for (phase, end) in snapshots.iter().skip(1).step_by(2).enumerate() {
            let (swing, stance) = if phase % 2 == 0 {
                (TRIPOD_1, TRIPOD_2)
            } 
            else {
                (TRIPOD_2, TRIPOD_1)
            };

            for leg in swing.iter() {
                let i = leg.index();
                assert!((turned_deg(&prev[i], &end[i]) - 15.0).abs() < 1e-9);
                assert_eq!(end[i].z_mm, -40.0);
            }
            for leg in stance.iter() {
                let i = leg.index();
                assert!((turned_deg(&prev[i], &end[i]) + 15.0).abs() < 1e-9);
            }

            step_swing_deg += turned_deg(&prev[swing[0].index()], &end[swing[0].index()]);
            total_swing_deg += turned_deg(&prev[swing[0].index()], &end[swing[0].index()]);

            // A full step turns the swing legs by the commanded angle
            if phase % 2 == 1 {
                assert!((step_swing_deg - 30.0).abs() < 1e-9);
                step_swing_deg = 0.0;
            }

            prev = *end;
        }

        assert!((total_swing_deg - 360.0).abs() < 1e-6);

        // Each leg turns +15 and -15 per step, ending where it started
        for leg in LegId::ALL.iter() {
            let i = leg.index();
            assert!(store.position(*leg).approx_eq(&initial[i], 1e-6));
            assert!((store.position(*leg).x_mm.hypot(store.position(*leg).y_mm) - 80.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotate_timing() {
        let (mut store, delay, log) = recorder(stance());
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);
        gait.config.set_speed(0.1);

        // Default cycle ignores speed
        gait.rotate(&mut store, -20.0, 3, 25.0, None).unwrap();
        assert_eq!(total_delay_us(&log.borrow()), 3 * 400_000);

        log.borrow_mut().clear();
        gait.rotate(&mut store, -20.0, 1, 25.0, Some(1.0)).unwrap();
        assert_eq!(total_delay_us(&log.borrow()), 1_000_000);
    }
}
