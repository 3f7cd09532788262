//! # Interpolator
//!
//! Eased ramps between leg positions. Ramping a move over several small 
//! demands avoids the torque spike of an instantaneous jump.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::trace;

// Internal
use crate::leg::{LegId, LegPosition, LegPositionStore};
use util::maths::{ease_in_out, lerp};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Linear blend between two positions on all three axes.
pub fn lerp_position(start: &LegPosition, end: &LegPosition, t: f64) -> LegPosition {
    LegPosition {
        x_mm: lerp(start.x_mm, end.x_mm, t),
        y_mm: lerp(start.y_mm, end.y_mm, t),
        z_mm: lerp(start.z_mm, end.z_mm, t),
    }
}

/// Ramp a set of legs from their current positions to their targets.
///
/// For `i` in `1..=steps` every leg is moved to its eased blend at 
/// `ease_in_out(i / steps)`, with `step_delay_us` between steps but not after
/// the last one. The final demand is exactly the target. With `steps <= 1`
/// the targets are applied directly with no delay.
///
/// Start positions are read once, before the first demand.
pub fn ramp_positions<S, D>(
    store: &mut S,
    delay: &mut D,
    targets: &[(LegId, LegPosition)],
    steps: u32,
    step_delay_us: u32
)
where
    S: LegPositionStore + ?Sized,
    D: DelayUs<u32>
{
    if steps <= 1 {
        for (leg, target) in targets {
            store.move_leg(*leg, *target);
        }
        return;
    }

    let starts: Vec<LegPosition> = targets.iter()
        .map(|(leg, _)| store.current_position(*leg))
        .collect();

    for i in 1..=steps {
        if i == steps {
            for (leg, target) in targets {
                store.move_leg(*leg, *target);
            }
            break;
        }

        let t = ease_in_out(i as f64 / steps as f64);
        trace!("Ramp step {}/{}, t = {:.3}", i, steps, t);

        for ((leg, target), start) in targets.iter().zip(starts.iter()) {
            store.move_leg(*leg, lerp_position(start, target, t));
        }

        delay.delay_us(step_delay_us);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        leg::NUM_LEGS,
        test_utils::{recorder, StoreEvent},
    };

    fn standing() -> [LegPosition; NUM_LEGS] {
        [LegPosition::new(80.0, 0.0, -40.0); NUM_LEGS]
    }

    #[test]
    fn test_ramp_reaches_target_exactly() {
        let (mut store, mut delay, log) = recorder(standing());
        let target = LegPosition::new(80.0, 0.0, -57.3);

        ramp_positions(&mut store, &mut delay, &[(LegId::L2, target)], 5, 20_000);

        let writes: Vec<LegPosition> = log.borrow().iter()
            .filter_map(|e| match e {
                StoreEvent::Write(LegId::L2, p) => Some(*p),
                _ => None
            })
            .collect();
        let delays: Vec<u32> = log.borrow().iter()
            .filter_map(|e| match e {
                StoreEvent::Delay(us) => Some(*us),
                _ => None
            })
            .collect();

        assert_eq!(writes.len(), 5);
        assert_eq!(*writes.last().unwrap(), target);
        assert_eq!(delays, vec![20_000; 4]);

        // Eased demands move monotonically toward the target
        for w in writes.windows(2) {
            assert!(w[1].z_mm <= w[0].z_mm);
        }
        assert!(writes[0].z_mm > -45.0);
    }

    #[test]
    fn test_ramp_disabled_is_direct() {
        let (mut store, mut delay, log) = recorder(standing());
        let targets: Vec<(LegId, LegPosition)> = LegId::ALL.iter()
            .map(|l| (*l, LegPosition::new(60.0, 10.0, -20.0)))
            .collect();

        ramp_positions(&mut store, &mut delay, &targets, 1, 20_000);

        let log = log.borrow();
        assert_eq!(log.len(), NUM_LEGS);
        assert!(log.iter().all(|e| matches!(e, StoreEvent::Write(_, _))));
        for leg in LegId::ALL.iter() {
            assert_eq!(store.position(*leg), LegPosition::new(60.0, 10.0, -20.0));
        }
    }

    #[test]
    fn test_ramp_moves_legs_together() {
        let (mut store, mut delay, log) = recorder(standing());
        let targets = [
            (LegId::L1, LegPosition::new(80.0, 0.0, -20.0)),
            (LegId::R1, LegPosition::new(80.0, 0.0, -60.0)),
        ];

        ramp_positions(&mut store, &mut delay, &targets, 3, 1000);

        // Each step writes both legs before delaying
        let kinds: Vec<char> = log.borrow().iter()
            .filter_map(|e| match e {
                StoreEvent::Write(_, _) => Some('w'),
                StoreEvent::Delay(_) => Some('d'),
                _ => None
            })
            .collect();
        assert_eq!(kinds, vec!['w', 'w', 'd', 'w', 'w', 'd', 'w', 'w']);
    }
}
