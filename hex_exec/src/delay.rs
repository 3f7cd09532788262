//! # Delays
//!
//! Every suspension in the gait engine goes through an injected
//! `embedded_hal::blocking::delay::DelayUs<u32>`, so a choreography can be run
//! against the wall clock on the robot or instantly under test.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use embedded_hal::blocking::delay::DelayUs;
use std::{thread, time::Duration};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Delay which blocks the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

/// Delay which returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DelayUs<u32> for HostDelay {
    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(us as u64));
    }
}

impl DelayUs<u32> for NoDelay {
    fn delay_us(&mut self, _us: u32) {}
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Length of part `idx` when `total_us` is split into `parts` sub-periods.
///
/// The remainder of the division is spread over the first parts so that the
/// sub-periods always sum to exactly `total_us`.
pub fn split_us(total_us: u32, parts: u32, idx: u32) -> u32 {
    if parts == 0 {
        return 0;
    }

    let base = total_us / parts;
    let rem = total_us % parts;

    if idx < rem {
        base + 1
    }
    else {
        base
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_split_us_sums_to_total() {
        for total in [0u32, 1, 2, 3, 312_500, 333_333, 1_000_000].iter() {
            for parts in 1..=6u32 {
                let sum: u32 = (0..parts).map(|i| split_us(*total, parts, i)).sum();
                assert_eq!(sum, *total);
            }
        }

        assert_eq!(split_us(312_500, 3, 0), 104_167);
        assert_eq!(split_us(312_500, 3, 1), 104_167);
        assert_eq!(split_us(312_500, 3, 2), 104_166);
        assert_eq!(split_us(100, 0, 0), 0);
    }
}
