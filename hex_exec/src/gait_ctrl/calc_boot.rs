//! Boot and shutdown choreographies

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::{info, trace};

// Internal
use super::*;
use crate::leg::{LegId, LegPosition, LegPositionStore};
use util::time::secs_to_us;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D> GaitCtrl<D> 
where
    D: DelayUs<u32>
{
    /// Unfold from the curled storage pose and stand up.
    ///
    /// Curl, lie flat with the legs extended, then rise to the stand height 
    /// in rungs, pausing after each stage.
    pub fn boot_up<S>(&mut self, store: &mut S) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        const OP: &str = "boot_up";
        info!("Booting up");

        let stage_us = secs_to_us(self.params.boot.stage_pause_s);

        self.check_cancel(OP)?;
        self.curl_up(store);
        self.delay.delay_us(stage_us);

        self.check_cancel(OP)?;
        self.lie_flat(store);
        self.delay.delay_us(stage_us);

        self.get_up(store, OP)?;
        self.delay.delay_us(stage_us);

        info!("Boot complete");
        Ok(())
    }

    /// Lie down, curl into the storage pose and de-energise the actuators.
    ///
    /// If cancelled the actuators are left energised.
    pub fn shut_down<S>(&mut self, store: &mut S) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        const OP: &str = "shut_down";
        info!("Shutting down");

        let stage_us = secs_to_us(self.params.boot.stage_pause_s);

        self.lie_down(store, OP)?;
        self.delay.delay_us(stage_us);

        self.check_cancel(OP)?;
        self.curl_up(store);
        self.delay.delay_us(stage_us);

        self.check_cancel(OP)?;
        store.disable_actuators();

        info!("Actuators disabled");
        Ok(())
    }

    fn curl_up<S>(&mut self, store: &mut S)
    where
        S: LegPositionStore + ?Sized
    {
        trace!("Curl up");

        let curl = self.params.boot.curl_pos;
        for leg in LegId::ALL.iter() {
            store.move_leg(*leg, curl);
        }
    }

    fn lie_flat<S>(&mut self, store: &mut S)
    where
        S: LegPositionStore + ?Sized
    {
        trace!("Lie flat");

        let flat = LegPosition::new(
            self.config.stance_width_mm, 0.0, self.params.boot.lie_flat_z_mm
        );
        for leg in LegId::ALL.iter() {
            store.move_leg(*leg, flat);
        }
    }

    fn get_up<S>(&mut self, store: &mut S, op: &'static str) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        let heights = rise_heights(self.config.stand_height_mm, self.params.boot.rung_mm);
        self.climb(store, &heights, op)
    }

    fn lie_down<S>(&mut self, store: &mut S, op: &'static str) -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        let heights = lower_heights(self.config.stand_height_mm, self.params.boot.rung_mm);
        self.climb(store, &heights, op)
    }

    /// Move every leg through the given heights, pausing after each rung.
    fn climb<S>(&mut self, store: &mut S, heights_mm: &[f64], op: &'static str) 
        -> Result<(), GaitCtrlError>
    where
        S: LegPositionStore + ?Sized
    {
        let rung_us = secs_to_us(self.params.boot.rung_pause_s);

        for h in heights_mm {
            self.check_cancel(op)?;
            trace!("Rung at {:.1} mm", h);

            self.set_all_z(store, -h);
            self.delay.delay_us(rung_us);
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Heights passed through when rising: one rung, two rungs and so on up to
/// the stand height, which is always the last entry.
pub fn rise_heights(stand_height_mm: f64, rung_mm: f64) -> Vec<f64> {
    let mut heights = Vec::new();

    if rung_mm > 0.0 {
        let num_rungs = (stand_height_mm / rung_mm + 1e-9).floor() as u32;
        heights.extend((1..=num_rungs).map(|i| i as f64 * rung_mm));
    }

    let reached = heights.last()
        .map_or(false, |h| (h - stand_height_mm).abs() < 1e-9);
    if !reached {
        heights.push(stand_height_mm);
    }

    heights
}

/// Heights passed through when lying down: from the stand height downwards
/// in rungs, stopping before the height drops under one rung.
pub fn lower_heights(stand_height_mm: f64, rung_mm: f64) -> Vec<f64> {
    if rung_mm <= 0.0 {
        return vec![stand_height_mm];
    }

    let num_rungs = ((stand_height_mm - rung_mm) / rung_mm + 1e-9).floor().max(0.0) as u32;

    (0..=num_rungs)
        .map(|i| stand_height_mm - i as f64 * rung_mm)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        cancel::CancelToken,
        delay::NoDelay,
        test_utils::{recorder, total_delay_us, StoreEvent},
    };

    fn curl() -> LegPosition {
        LegPosition::new(30.0, 0.0, -20.0)
    }

    #[test]
    fn test_rung_heights() {
        assert_eq!(rise_heights(40.0, 10.0), vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rise_heights(45.0, 10.0), vec![10.0, 20.0, 30.0, 40.0, 45.0]);
        assert_eq!(rise_heights(20.0, 0.0), vec![20.0]);

        assert_eq!(lower_heights(40.0, 10.0), vec![40.0, 30.0, 20.0, 10.0]);
        assert_eq!(lower_heights(45.0, 10.0), vec![45.0, 35.0, 25.0, 15.0]);
        assert_eq!(lower_heights(20.0, 10.0), vec![20.0, 10.0]);
    }

    #[test]
    fn test_boot_up() {
        let (mut store, delay, log) = recorder([curl(); 6]);
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.boot_up(&mut store).unwrap();

        assert!(store.positions().iter().all(|p| *p == LegPosition::new(80.0, 0.0, -40.0)));

        // 3 stage pauses and 4 rungs
        assert_eq!(total_delay_us(&log.borrow()), 3 * 300_000 + 4 * 100_000);
        assert_eq!(store.num_disables(), 0);
    }

    #[test]
    fn test_boot_then_shut_down() {
        let (mut store, delay, log) = recorder(
            GaitCtrl::new(GaitCtrlParams::default(), NoDelay).canonical_stance()
        );
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);

        gait.boot_up(&mut store).unwrap();
        gait.shut_down(&mut store).unwrap();

        assert!(store.positions().iter().all(|p| *p == curl()));
        assert_eq!(store.num_disables(), 1);

        // Disable is the very last thing to happen
        assert_eq!(log.borrow().last(), Some(&StoreEvent::Disable));
    }

    #[test]
    fn test_cancelled_shut_down_keeps_actuators() {
        let (mut store, delay, _log) = recorder([curl(); 6]);
        let mut gait = GaitCtrl::new(GaitCtrlParams::default(), delay);
        let token = CancelToken::new();
        gait.set_cancel_token(token.clone());

        gait.boot_up(&mut store).unwrap();
        token.cancel();

        assert_eq!(
            gait.shut_down(&mut store), 
            Err(GaitCtrlError::Cancelled { op: "shut_down" })
        );
        assert_eq!(store.num_disables(), 0);
    }
}
