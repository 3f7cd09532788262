//! # Legs
//!
//! Identifiers, Cartesian positions and the fixed leg groupings used by every
//! gait.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod store;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Rotation2, Vector2};
use serde::{Serialize, Deserialize};
use std::fmt;

// Internal
pub use store::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of legs on the hexapod.
pub const NUM_LEGS: usize = 6;

/// First tripod: front-left, middle-right, back-left.
pub const TRIPOD_1: [LegId; 3] = [LegId::L1, LegId::R2, LegId::L3];

/// Second tripod: front-right, middle-left, back-right.
pub const TRIPOD_2: [LegId; 3] = [LegId::R1, LegId::L2, LegId::R3];

pub const LEFT_LEGS: [LegId; 3] = [LegId::L1, LegId::L2, LegId::L3];
pub const RIGHT_LEGS: [LegId; 3] = [LegId::R1, LegId::R2, LegId::R3];

pub const FRONT_LEGS: [LegId; 2] = [LegId::L1, LegId::R1];
pub const MIDDLE_LEGS: [LegId; 2] = [LegId::L2, LegId::R2];
pub const BACK_LEGS: [LegId; 2] = [LegId::L3, LegId::R3];

/// Order in which the wave gait swings its legs.
pub const WAVE_SEQUENCE: [LegId; NUM_LEGS] = [
    LegId::R3, LegId::R2, LegId::R1, LegId::L3, LegId::L2, LegId::L1
];

/// Order in which the ripple gait swings its legs.
pub const RIPPLE_SEQUENCE: [LegId; NUM_LEGS] = [
    LegId::R1, LegId::R2, LegId::R3, LegId::L3, LegId::L2, LegId::L1
];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Identifies one of the six legs.
///
/// `L`/`R` give the side, `1`/`2`/`3` the front, middle and back positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LegId {
    L1,
    L2,
    L3,
    R1,
    R2,
    R3,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Target offset of a leg's foot from its body mount point.
///
/// Units: millimeters,
/// Frame: Body (x forward, y left, z up, so standing legs have negative z)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegPosition {
    pub x_mm: f64,
    pub y_mm: f64,
    pub z_mm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LegId {
    /// All legs, in array index order.
    pub const ALL: [LegId; NUM_LEGS] = [
        LegId::L1, LegId::L2, LegId::L3, LegId::R1, LegId::R2, LegId::R3
    ];

    /// Index of this leg into `[T; NUM_LEGS]` arrays.
    pub fn index(self) -> usize {
        match self {
            LegId::L1 => 0,
            LegId::L2 => 1,
            LegId::L3 => 2,
            LegId::R1 => 3,
            LegId::R2 => 4,
            LegId::R3 => 5,
        }
    }

    /// The conventional name of the leg.
    pub fn name(self) -> &'static str {
        match self {
            LegId::L1 => "L1",
            LegId::L2 => "L2",
            LegId::L3 => "L3",
            LegId::R1 => "R1",
            LegId::R2 => "R2",
            LegId::R3 => "R3",
        }
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl LegPosition {
    pub fn new(x_mm: f64, y_mm: f64, z_mm: f64) -> Self {
        Self { x_mm, y_mm, z_mm }
    }

    /// Same planar position at a different height.
    pub fn with_z(self, z_mm: f64) -> Self {
        Self { z_mm, ..self }
    }

    /// Shift the planar position, keeping the height.
    pub fn offset_xy(self, dx_mm: f64, dy_mm: f64) -> Self {
        Self {
            x_mm: self.x_mm + dx_mm,
            y_mm: self.y_mm + dy_mm,
            z_mm: self.z_mm
        }
    }

    /// Rotate the planar position counter-clockwise about the mount point,
    /// keeping the height.
    ///
    /// Gives `(x cos a - y sin a, x sin a + y cos a)`.
    pub fn rotated_xy(self, angle_rad: f64) -> Self {
        let v = Rotation2::new(angle_rad) * Vector2::new(self.x_mm, self.y_mm);

        Self {
            x_mm: v.x,
            y_mm: v.y,
            z_mm: self.z_mm
        }
    }

    /// Compare two positions axis by axis within `tol_mm`.
    pub fn approx_eq(&self, other: &LegPosition, tol_mm: f64) -> bool {
        (self.x_mm - other.x_mm).abs() <= tol_mm
            && (self.y_mm - other.y_mm).abs() <= tol_mm
            && (self.z_mm - other.z_mm).abs() <= tol_mm
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_leg_index_order() {
        for (i, leg) in LegId::ALL.iter().enumerate() {
            assert_eq!(leg.index(), i);
        }
    }

    #[test]
    fn test_leg_names() {
        assert_eq!(LegId::R1.to_string(), "R1");
        assert_eq!(LegId::L3.name(), "L3");
    }

    #[test]
    fn test_groups_partition_legs() {
        // Tripods and halves each cover every leg exactly once
        for (a, b) in [(TRIPOD_1, TRIPOD_2), (LEFT_LEGS, RIGHT_LEGS)].iter() {
            let mut legs: Vec<LegId> = a.iter().chain(b.iter()).copied().collect();
            legs.sort();
            assert_eq!(legs, LegId::ALL.to_vec());
        }

        let mut legs: Vec<LegId> = FRONT_LEGS.iter()
            .chain(MIDDLE_LEGS.iter())
            .chain(BACK_LEGS.iter())
            .copied()
            .collect();
        legs.sort();
        assert_eq!(legs, LegId::ALL.to_vec());

        for seq in [WAVE_SEQUENCE, RIPPLE_SEQUENCE].iter() {
            let mut legs = seq.to_vec();
            legs.sort();
            assert_eq!(legs, LegId::ALL.to_vec());
        }
    }

    #[test]
    fn test_rotated_xy() {
        let p = LegPosition::new(80.0, 0.0, -40.0).rotated_xy(FRAC_PI_2);
        assert!(p.approx_eq(&LegPosition::new(0.0, 80.0, -40.0), 1e-9));

        // Rotating back undoes the rotation
        let q = LegPosition::new(56.0, -12.0, -40.0);
        let r = q.rotated_xy(0.3).rotated_xy(-0.3);
        assert!(r.approx_eq(&q, 1e-9));
    }
}
