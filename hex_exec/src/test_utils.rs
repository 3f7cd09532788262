//! Recording store and delay used by the unit tests.
//!
//! Both share one event log so the order of reads, writes and delays can be
//! checked across a whole choreography without waiting on the wall clock.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use embedded_hal::blocking::delay::DelayUs;
use std::{cell::RefCell, rc::Rc};

use crate::leg::{LegId, LegPosition, LegPositionStore, NUM_LEGS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreEvent {
    Read(LegId),
    Write(LegId, LegPosition),
    Center,
    Disable,
    Delay(u32),
}

pub type EventLog = Rc<RefCell<Vec<StoreEvent>>>;

pub struct RecordingStore {
    positions: [LegPosition; NUM_LEGS],
    neutral: [LegPosition; NUM_LEGS],
    log: EventLog,
}

#[derive(Clone)]
pub struct RecordingDelay {
    log: EventLog,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RecordingStore {
    /// Position of a leg without logging a read.
    pub fn position(&self, leg: LegId) -> LegPosition {
        self.positions[leg.index()]
    }

    pub fn positions(&self) -> [LegPosition; NUM_LEGS] {
        self.positions
    }

    pub fn num_disables(&self) -> usize {
        self.log.borrow().iter().filter(|e| **e == StoreEvent::Disable).count()
    }
}

impl LegPositionStore for RecordingStore {
    fn current_position(&self, leg: LegId) -> LegPosition {
        self.log.borrow_mut().push(StoreEvent::Read(leg));
        self.positions[leg.index()]
    }

    fn move_leg(&mut self, leg: LegId, pos: LegPosition) {
        self.log.borrow_mut().push(StoreEvent::Write(leg, pos));
        self.positions[leg.index()] = pos;
    }

    fn center_all(&mut self) {
        self.log.borrow_mut().push(StoreEvent::Center);
        self.positions = self.neutral;
    }

    fn disable_actuators(&mut self) {
        self.log.borrow_mut().push(StoreEvent::Disable);
    }
}

impl DelayUs<u32> for RecordingDelay {
    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(StoreEvent::Delay(us));
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Build a store starting at `initial` and a delay sharing its event log.
pub fn recorder(initial: [LegPosition; NUM_LEGS]) 
    -> (RecordingStore, RecordingDelay, EventLog) 
{
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));

    let store = RecordingStore {
        positions: initial,
        neutral: initial,
        log: log.clone()
    };
    let delay = RecordingDelay { log: log.clone() };

    (store, delay, log)
}

/// Replay the writes in `events` from `initial`, returning the positions of
/// every leg at each delay, i.e. at the end of every sub-phase.
pub fn positions_at_delays(
    initial: [LegPosition; NUM_LEGS],
    events: &[StoreEvent]
) -> Vec<[LegPosition; NUM_LEGS]> {
    let mut positions = initial;
    let mut snapshots = Vec::new();

    for e in events {
        match e {
            StoreEvent::Write(leg, pos) => positions[leg.index()] = *pos,
            StoreEvent::Delay(_) => snapshots.push(positions),
            _ => ()
        }
    }

    snapshots
}

/// Sum of all delays in `events`, in microseconds.
pub fn total_delay_us(events: &[StoreEvent]) -> u64 {
    events.iter()
        .map(|e| match e {
            StoreEvent::Delay(us) => *us as u64,
            _ => 0
        })
        .sum()
}

/// Signed planar heading change from `a` to `b` in degrees, in (-180, 180].
pub fn turned_deg(a: &LegPosition, b: &LegPosition) -> f64 {
    let heading = |p: &LegPosition| p.y_mm.atan2(p.x_mm);
    let d = (heading(b) - heading(a)).to_degrees();
    let d = (d + 540.0) % 360.0 - 180.0;
    if d <= -180.0 { d + 360.0 } else { d }
}
