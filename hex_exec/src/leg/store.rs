//! Leg position store contract and its simulated implementation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use serde::Serialize;

// Internal
use super::{LegId, LegPosition, NUM_LEGS};
use util::{archive::Archiver, session::get_elapsed_seconds};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Owner of the current target position of every leg.
///
/// The gait engine reads and writes leg positions only through this trait. 
/// Implementations forward demands to the actuators (via inverse kinematics 
/// and the servo drivers) and are responsible for any retries.
pub trait LegPositionStore {
    /// The current target position of a leg.
    fn current_position(&self, leg: LegId) -> LegPosition;

    /// Set a new target position for a leg.
    ///
    /// All three axes are updated together. Must be idempotent when called 
    /// repeatedly with the same value.
    fn move_leg(&mut self, leg: LegId, pos: LegPosition);

    /// Move every leg to the neutral calibration pose.
    fn center_all(&mut self);

    /// De-energise the actuators.
    fn disable_actuators(&mut self);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// In-memory leg position store used when no hardware is attached.
pub struct SimLegStore {
    positions: [LegPosition; NUM_LEGS],

    neutral: [LegPosition; NUM_LEGS],

    actuators_enabled: bool,

    num_demands: u64,

    archiver: Option<Archiver>,
}

/// One archived leg demand.
#[derive(Serialize)]
struct DemandRecord {
    time_s: f64,
    leg: &'static str,
    x_mm: f64,
    y_mm: f64,
    z_mm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimLegStore {
    /// Create a new store with every leg at its neutral pose.
    pub fn new(neutral: [LegPosition; NUM_LEGS]) -> Self {
        Self {
            positions: neutral,
            neutral,
            actuators_enabled: true,
            num_demands: 0,
            archiver: None
        }
    }

    /// Archive every demand into the given archiver.
    pub fn with_archiver(mut self, archiver: Archiver) -> Self {
        self.archiver = Some(archiver);
        self
    }

    /// Snapshot of all leg positions, indexed by `LegId::index`.
    pub fn positions(&self) -> [LegPosition; NUM_LEGS] {
        self.positions
    }

    /// `false` after `disable_actuators` until the next demand.
    pub fn actuators_enabled(&self) -> bool {
        self.actuators_enabled
    }

    /// Number of demands issued through `move_leg` so far.
    pub fn num_demands(&self) -> u64 {
        self.num_demands
    }

    fn archive(&mut self, leg: LegId, pos: LegPosition) {
        let result = match self.archiver {
            Some(ref mut a) => a.serialise(DemandRecord {
                time_s: get_elapsed_seconds(),
                leg: leg.name(),
                x_mm: pos.x_mm,
                y_mm: pos.y_mm,
                z_mm: pos.z_mm
            }),
            None => return
        };

        // Stop archiving rather than warn on every demand
        if let Err(e) = result {
            warn!("Could not archive leg demand, archiving disabled: {}", e);
            self.archiver = None;
        }
    }
}

impl LegPositionStore for SimLegStore {
    fn current_position(&self, leg: LegId) -> LegPosition {
        self.positions[leg.index()]
    }

    fn move_leg(&mut self, leg: LegId, pos: LegPosition) {
        trace!("{} -> ({:.2}, {:.2}, {:.2})", leg, pos.x_mm, pos.y_mm, pos.z_mm);

        self.positions[leg.index()] = pos;
        self.actuators_enabled = true;
        self.num_demands += 1;

        self.archive(leg, pos);
    }

    fn center_all(&mut self) {
        for leg in LegId::ALL.iter() {
            let pos = self.neutral[leg.index()];
            self.move_leg(*leg, pos);
        }
    }

    fn disable_actuators(&mut self) {
        self.actuators_enabled = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sim_store() {
        let neutral = [LegPosition::new(80.0, 0.0, -40.0); NUM_LEGS];
        let mut store = SimLegStore::new(neutral);

        store.move_leg(LegId::R2, LegPosition::new(10.0, 20.0, -30.0));
        store.move_leg(LegId::R2, LegPosition::new(10.0, 20.0, -30.0));
        assert_eq!(store.current_position(LegId::R2), LegPosition::new(10.0, 20.0, -30.0));
        assert_eq!(store.current_position(LegId::L1), neutral[0]);
        assert_eq!(store.num_demands(), 2);

        store.disable_actuators();
        assert!(!store.actuators_enabled());

        store.center_all();
        assert!(store.actuators_enabled());
        assert_eq!(store.positions(), neutral);
    }
}
