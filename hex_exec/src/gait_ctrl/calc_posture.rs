//! Posture calculations: stand, sit, squat, reset, tilt and twist
//!
//! None of these lift a foot, so none of them are cancellable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::debug;

// Internal
use super::*;
use comms_if::tc::gait_ctrl::DEFAULT_SIT_HEIGHT_MM;
use crate::leg::{
    LegId, LegPosition, LegPositionStore,
    FRONT_LEGS, MIDDLE_LEGS, BACK_LEGS, LEFT_LEGS, RIGHT_LEGS
};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D> GaitCtrl<D> 
where
    D: DelayUs<u32>
{
    /// Lower or raise every foot to `-height_mm`, keeping x and y.
    ///
    /// Uses the configured stand height when `height_mm` is `None` or zero.
    /// No clamping is applied here, that is up to the caller. The move is
    /// ramped over `0.3 / speed` seconds.
    pub fn stand<S>(&mut self, store: &mut S, height_mm: Option<f64>)
    where
        S: LegPositionStore + ?Sized
    {
        let height_mm = height_mm
            .filter(|h| *h != 0.0)
            .unwrap_or(self.config.stand_height_mm);
        debug!("Stand at {:.1} mm", height_mm);

        let targets: Vec<(LegId, LegPosition)> = LegId::ALL.iter()
            .map(|leg| (*leg, store.current_position(*leg).with_z(-height_mm)))
            .collect();

        self.smooth_move_legs(store, &targets, STAND_RAMP_TIME_S / self.config.speed);
    }

    /// Lower the body to a sitting height through the stand ramp.
    pub fn sit<S>(&mut self, store: &mut S, height_mm: Option<f64>)
    where
        S: LegPositionStore + ?Sized
    {
        self.stand(store, Some(height_mm.unwrap_or(DEFAULT_SIT_HEIGHT_MM)));
    }

    /// Lower (positive offset) or raise (negative offset) the body relative 
    /// to the stand height.
    ///
    /// Applied directly, without the smoothing ramp.
    pub fn squat<S>(&mut self, store: &mut S, offset_mm: f64)
    where
        S: LegPositionStore + ?Sized
    {
        debug!("Squat by {:.1} mm", offset_mm);

        let z_mm = self.ground_z() - offset_mm;
        self.set_all_z(store, z_mm);
    }

    /// Put every leg back in its canonical stance, discarding any drift 
    /// accumulated by previous gaits.
    pub fn reset_positions<S>(&mut self, store: &mut S)
    where
        S: LegPositionStore + ?Sized
    {
        debug!("Reset leg positions");

        let stance = self.canonical_stance();
        for leg in LegId::ALL.iter() {
            store.move_leg(*leg, stance[leg.index()]);
        }
    }

    /// Tilt the body forward: front feet down by `offset_mm`, back feet up by
    /// the same amount, middle feet at the stand height.
    pub fn tilt_forward<S>(&mut self, store: &mut S, offset_mm: f64)
    where
        S: LegPositionStore + ?Sized
    {
        debug!("Tilt forward by {:.1} mm", offset_mm);

        let ground_z = self.ground_z();
        set_group_z(store, &FRONT_LEGS, ground_z - offset_mm);
        set_group_z(store, &MIDDLE_LEGS, ground_z);
        set_group_z(store, &BACK_LEGS, ground_z + offset_mm);
    }

    pub fn tilt_back<S>(&mut self, store: &mut S, offset_mm: f64)
    where
        S: LegPositionStore + ?Sized
    {
        self.tilt_forward(store, -offset_mm);
    }

    /// Tilt the body left: left feet down by `offset_mm`, right feet up by 
    /// the same amount.
    pub fn tilt_left<S>(&mut self, store: &mut S, offset_mm: f64)
    where
        S: LegPositionStore + ?Sized
    {
        debug!("Tilt left by {:.1} mm", offset_mm);

        let ground_z = self.ground_z();
        set_group_z(store, &LEFT_LEGS, ground_z - offset_mm);
        set_group_z(store, &RIGHT_LEGS, ground_z + offset_mm);
    }

    pub fn tilt_right<S>(&mut self, store: &mut S, offset_mm: f64)
    where
        S: LegPositionStore + ?Sized
    {
        self.tilt_left(store, -offset_mm);
    }

    /// Rotate every foot about its mount by `angle_deg` (counter-clockwise 
    /// positive) without lifting any of them.
    ///
    /// Applied directly, without the smoothing ramp.
    pub fn twist<S>(&mut self, store: &mut S, angle_deg: f64)
    where
        S: LegPositionStore + ?Sized
    {
        debug!("Twist by {:.1} deg", angle_deg);

        let rad = angle_deg.to_radians();
        for leg in LegId::ALL.iter() {
            let pos = store.current_position(*leg);
            store.move_leg(*leg, pos.rotated_xy(rad));
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn set_group_z<S>(store: &mut S, legs: &[LegId], z_mm: f64)
where
    S: LegPositionStore + ?Sized
{
    for leg in legs {
        let pos = store.current_position(*leg);
        store.move_leg(*leg, pos.with_z(z_mm));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        delay::NoDelay,
        test_utils::{recorder, total_delay_us, turned_deg, StoreEvent},
    };

    fn ctrl() -> GaitCtrl<NoDelay> {
        GaitCtrl::new(GaitCtrlParams::default(), NoDelay)
    }

    fn skewed_stance() -> [LegPosition; 6] {
        let mut stance = ctrl().canonical_stance();
        stance[0] = stance[0].offset_xy(3.0, -2.0);
        stance[4] = stance[4].with_z(-37.0);
        stance
    }

    #[test]
    fn test_stand_height() {
        let initial = skewed_stance();
        let (mut store, delay, log) = recorder(initial);
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.stand(&mut store, Some(50.0));

        for leg in LegId::ALL.iter() {
            let before = initial[leg.index()];
            assert_eq!(store.position(*leg), LegPosition::new(before.x_mm, before.y_mm, -50.0));
        }

        // 5 ramp steps with 4 delays over 0.3 / 0.8 s
        let writes = log.borrow().iter()
            .filter(|e| matches!(e, StoreEvent::Write(_, _)))
            .count();
        assert_eq!(writes, 5 * 6);
        assert_eq!(total_delay_us(&log.borrow()), 4 * 75_000);
    }

    #[test]
    fn test_stand_default_and_sit() {
        let (mut store, delay, _log) = recorder(skewed_stance());
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);
        gait.config.set_stand_height(65.0);

        gait.stand(&mut store, None);
        assert!(store.positions().iter().all(|p| p.z_mm == -65.0));

        // Zero is not a height, the configured one is used
        gait.stand(&mut store, Some(30.0));
        gait.stand(&mut store, Some(0.0));
        assert!(store.positions().iter().all(|p| p.z_mm == -65.0));

        gait.sit(&mut store, None);
        assert!(store.positions().iter().all(|p| p.z_mm == -20.0));
    }

    #[test]
    fn test_stand_without_smoothing() {
        let (mut store, delay, log) = recorder(skewed_stance());
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);
        gait.config.set_smoothing(false, 5);

        gait.stand(&mut store, Some(30.0));

        assert_eq!(total_delay_us(&log.borrow()), 0);
        assert!(store.positions().iter().all(|p| p.z_mm == -30.0));
    }

    #[test]
    fn test_squat_is_direct() {
        let (mut store, delay, log) = recorder(skewed_stance());
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.squat(&mut store, 15.0);

        assert_eq!(total_delay_us(&log.borrow()), 0);
        assert!(store.positions().iter().all(|p| p.z_mm == -55.0));

        gait.squat(&mut store, -10.0);
        assert!(store.positions().iter().all(|p| p.z_mm == -30.0));
    }

    #[test]
    fn test_reset_positions_idempotent() {
        let (mut store, _delay, _log) = recorder(skewed_stance());
        let mut gait = ctrl();

        gait.walk(&mut store, 30.0, 3, 35.0, 25.0, None).unwrap();
        gait.twist(&mut store, 7.0);

        gait.reset_positions(&mut store);
        let first = store.positions();
        gait.reset_positions(&mut store);
        let second = store.positions();

        assert_eq!(first, second);
        assert_eq!(first, gait.canonical_stance());
    }

    #[test]
    fn test_tilts() {
        let (mut store, delay, _log) = recorder(ctrl().canonical_stance());
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.tilt_forward(&mut store, 20.0);
        assert_eq!(store.position(LegId::L1).z_mm, -60.0);
        assert_eq!(store.position(LegId::R1).z_mm, -60.0);
        assert_eq!(store.position(LegId::L2).z_mm, -40.0);
        assert_eq!(store.position(LegId::R3).z_mm, -20.0);

        gait.tilt_back(&mut store, 20.0);
        assert_eq!(store.position(LegId::R1).z_mm, -20.0);
        assert_eq!(store.position(LegId::L3).z_mm, -60.0);

        gait.tilt_right(&mut store, 10.0);
        assert!(RIGHT_LEGS.iter().all(|l| store.position(*l).z_mm == -50.0));
        assert!(LEFT_LEGS.iter().all(|l| store.position(*l).z_mm == -30.0));

        // Tilting never moves a foot in the plane
        let stance = ctrl().canonical_stance();
        for leg in LegId::ALL.iter() {
            let p = store.position(*leg);
            assert_eq!((p.x_mm, p.y_mm), (stance[leg.index()].x_mm, stance[leg.index()].y_mm));
        }
    }

    #[test]
    fn test_twist() {
        let stance = ctrl().canonical_stance();
        let (mut store, delay, log) = recorder(stance);
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.twist(&mut store, 15.0);
        for leg in LegId::ALL.iter() {
            let before = stance[leg.index()];
            let after = store.position(*leg);
            assert!((turned_deg(&before, &after) - 15.0).abs() < 1e-9);
            assert_eq!(after.z_mm, before.z_mm);
        }
        assert_eq!(total_delay_us(&log.borrow()), 0);

        gait.twist(&mut store, -15.0);
        for leg in LegId::ALL.iter() {
            assert!(store.position(*leg).approx_eq(&stance[leg.index()], 1e-9));
        }
    }
}
