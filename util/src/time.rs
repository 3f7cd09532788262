//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Number of microseconds in a second
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    if let Some(ns) = duration.num_nanoseconds() {
        Some(ns as f64 / NANOS_PER_SECOND as f64)
    }
    else {
        None
    }
}

/// Convert a period in seconds into whole microseconds.
///
/// Negative and NaN periods map to zero, periods longer than `u32::MAX` 
/// microseconds saturate.
pub fn secs_to_us(period_s: f64) -> u32 {
    if !(period_s > 0.0) {
        return 0;
    }

    // Float to int casts saturate
    (period_s * MICROS_PER_SECOND).round() as u32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_secs_to_us() {
        assert_eq!(secs_to_us(0.1), 100_000);
        assert_eq!(secs_to_us(0.5 / 3.0), 166_667);
        assert_eq!(secs_to_us(0.0), 0);
        assert_eq!(secs_to_us(-1.0), 0);
        assert_eq!(secs_to_us(f64::NAN), 0);
        assert_eq!(secs_to_us(1e9), u32::MAX);
    }

    #[test]
    fn test_duration_to_seconds() {
        let d = chrono::Duration::milliseconds(1500);
        assert_eq!(duration_to_seconds(d), Some(1.5));
    }
}
